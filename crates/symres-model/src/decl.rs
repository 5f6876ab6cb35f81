//! Declarations.
//!
//! `Declaration` is the common header (identity, name, owner, annotations,
//! origin) and `DeclKind` the closed set of payloads. Declarations refer to
//! each other by `DeclId`; the `DeclarationStore` owns them.

use crate::context::ScopeContext;
use crate::error::SymbolError;
use crate::ids::DeclId;
use crate::store::DeclarationStore;
use crate::types::Type;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use symres_metadata::{
    ClassFlags, ClassId, ClassKind, ClassRecord, FunctionFlags, Modality, Name, NameResolver,
    TypeTable, Variance, Visibility,
};

/// Where a declaration came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclOrigin {
    /// Built directly by the host (tests, source front-ends).
    Source,
    /// Read from a symbol table.
    Deserialized,
    /// Produced by override synthesis.
    FakeOverride,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub class: ClassId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameter {
    /// Id from the symbol table; unique within one package fragment.
    pub id: u32,
    pub name: Name,
    pub index: u32,
    pub owner: DeclId,
    pub variance: Variance,
    pub reified: bool,
    pub upper_bounds: Vec<Type>,
}

impl TypeParameter {
    /// The type referring to this parameter.
    pub fn as_type(&self) -> Type {
        Type::parameter(self.owner, self.index, self.name.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueParameter {
    pub name: Name,
    pub ty: Type,
    pub vararg_element_type: Option<Type>,
    pub declares_default_value: bool,
    pub is_crossinline: bool,
    pub is_noinline: bool,
    pub annotations: Vec<Annotation>,
}

impl ValueParameter {
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: Name::new(name),
            ty,
            vararg_element_type: None,
            declares_default_value: false,
            is_crossinline: false,
            is_noinline: false,
            annotations: Vec::new(),
        }
    }
}

/// Getter or setter description of a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Accessor {
    /// False when the accessor has a custom body.
    pub is_default: bool,
    pub is_external: bool,
    pub is_inline: bool,
    pub visibility: Visibility,
    pub modality: Modality,
}

#[derive(Clone, Debug)]
pub struct PackageFragmentData {
    pub fq_name: Name,
    pub name_resolver: Arc<NameResolver>,
    pub type_table: Arc<TypeTable>,
}

/// Loads the members of a lazily deserialized class.
///
/// Called at most once per class, with the class's own context.
pub type MemberLoader =
    fn(&DeclarationStore, DeclId, &ClassRecord, &ScopeContext) -> Result<Vec<DeclId>, SymbolError>;

/// Members of a class read from a symbol table on first access.
pub struct LazyMembers {
    pub record: Arc<ClassRecord>,
    pub context: ScopeContext,
    loader: MemberLoader,
    cell: OnceCell<Vec<DeclId>>,
}

impl LazyMembers {
    pub fn new(record: Arc<ClassRecord>, context: ScopeContext, loader: MemberLoader) -> Self {
        Self {
            record,
            context,
            loader,
            cell: OnceCell::new(),
        }
    }

    /// The member list if it has already been loaded.
    pub fn loaded(&self) -> Option<&[DeclId]> {
        self.cell.get().map(Vec::as_slice)
    }

    /// Loads the members on first call; later calls return the same list.
    ///
    /// A failed load leaves the cell empty, so the next call retries.
    pub fn get_or_load(
        &self,
        store: &DeclarationStore,
        class: DeclId,
    ) -> Result<&[DeclId], SymbolError> {
        self.cell
            .get_or_try_init(|| (self.loader)(store, class, &self.record, &self.context))
            .map(Vec::as_slice)
    }
}

impl fmt::Debug for LazyMembers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyMembers")
            .field("loaded", &self.cell.get().map(Vec::len))
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum ClassMembers {
    Eager(Vec<DeclId>),
    Lazy(LazyMembers),
}

#[derive(Debug)]
pub struct ClassData {
    pub class_id: ClassId,
    pub kind: ClassKind,
    pub modality: Modality,
    pub visibility: Visibility,
    pub flags: ClassFlags,
    pub type_parameters: Vec<TypeParameter>,
    pub supertypes: Vec<Type>,
    pub type_table: Arc<TypeTable>,
    pub members: ClassMembers,
}

impl ClassData {
    /// The type of `this` inside the class: the class applied to its own
    /// type parameters.
    pub fn default_type(&self) -> Type {
        Type::class(self.class_id.clone()).with_arguments(
            self.type_parameters
                .iter()
                .map(|parameter| crate::types::TypeArgument::invariant(parameter.as_type()))
                .collect(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct FunctionData {
    pub type_parameters: Vec<TypeParameter>,
    pub receiver: Option<Type>,
    pub value_parameters: Vec<ValueParameter>,
    pub return_type: Type,
    pub modality: Modality,
    pub visibility: Visibility,
    pub flags: FunctionFlags,
    /// Supertype members this function overrides.
    pub overridden: Vec<DeclId>,
}

#[derive(Clone, Debug)]
pub struct ConstructorData {
    pub value_parameters: Vec<ValueParameter>,
    pub return_type: Type,
    pub is_primary: bool,
    pub visibility: Visibility,
}

#[derive(Clone, Debug)]
pub struct PropertyData {
    pub type_parameters: Vec<TypeParameter>,
    pub receiver: Option<Type>,
    pub ty: Type,
    pub is_var: bool,
    pub is_delegated: bool,
    pub is_const: bool,
    pub is_lateinit: bool,
    pub getter: Option<Accessor>,
    pub setter: Option<Accessor>,
    pub modality: Modality,
    pub visibility: Visibility,
    pub overridden: Vec<DeclId>,
}

#[derive(Clone, Debug)]
pub struct LocalVariableData {
    pub ty: Type,
    pub is_var: bool,
    pub is_delegated: bool,
}

#[derive(Clone, Debug)]
pub struct TypeParameterHolderData {
    pub type_parameters: Vec<TypeParameter>,
}

#[derive(Debug)]
pub enum DeclKind {
    Module,
    PackageFragment(PackageFragmentData),
    Class(ClassData),
    Function(FunctionData),
    Constructor(ConstructorData),
    Property(PropertyData),
    LocalVariable(LocalVariableData),
    TypeParameterHolder(TypeParameterHolderData),
}

impl DeclKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::PackageFragment(_) => "package",
            Self::Class(_) => "class",
            Self::Function(_) => "function",
            Self::Constructor(_) => "constructor",
            Self::Property(_) => "property",
            Self::LocalVariable(_) => "local variable",
            Self::TypeParameterHolder(_) => "type parameter holder",
        }
    }
}

#[derive(Debug)]
pub struct Declaration {
    pub id: DeclId,
    pub name: Name,
    /// `None` only for modules.
    pub containing: Option<DeclId>,
    pub annotations: Vec<Annotation>,
    pub origin: DeclOrigin,
    pub kind: DeclKind,
}

impl Declaration {
    pub fn new(id: DeclId, name: Name, containing: Option<DeclId>, kind: DeclKind) -> Self {
        Self {
            id,
            name,
            containing,
            annotations: Vec::new(),
            origin: DeclOrigin::Source,
            kind,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: DeclOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.kind {
            DeclKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionData> {
        match &self.kind {
            DeclKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyData> {
        match &self.kind {
            DeclKind::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn as_package_fragment(&self) -> Option<&PackageFragmentData> {
        match &self.kind {
            DeclKind::PackageFragment(fragment) => Some(fragment),
            _ => None,
        }
    }

    pub const fn is_module(&self) -> bool {
        matches!(self.kind, DeclKind::Module)
    }

    /// Type parameters this declaration introduces into nested scopes.
    pub fn type_parameters(&self) -> &[TypeParameter] {
        match &self.kind {
            DeclKind::Class(class) => &class.type_parameters,
            DeclKind::Function(function) => &function.type_parameters,
            DeclKind::Property(property) => &property.type_parameters,
            DeclKind::TypeParameterHolder(holder) => &holder.type_parameters,
            DeclKind::Module
            | DeclKind::PackageFragment(_)
            | DeclKind::Constructor(_)
            | DeclKind::LocalVariable(_) => &[],
        }
    }

    /// The type table this declaration owns, if it owns one.
    pub fn own_type_table(&self) -> Option<&Arc<TypeTable>> {
        match &self.kind {
            DeclKind::PackageFragment(fragment) => Some(&fragment.type_table),
            DeclKind::Class(class) => Some(&class.type_table),
            _ => None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match &self.kind {
            DeclKind::Class(class) => class.visibility,
            DeclKind::Function(function) => function.visibility,
            DeclKind::Constructor(constructor) => constructor.visibility,
            DeclKind::Property(property) => property.visibility,
            DeclKind::LocalVariable(_) => Visibility::Local,
            DeclKind::Module | DeclKind::PackageFragment(_) | DeclKind::TypeParameterHolder(_) => {
                Visibility::Public
            }
        }
    }

    pub fn modality(&self) -> Modality {
        match &self.kind {
            DeclKind::Class(class) => class.modality,
            DeclKind::Function(function) => function.modality,
            DeclKind::Property(property) => property.modality,
            _ => Modality::Final,
        }
    }

    /// Declarations this one directly overrides.
    pub fn overridden(&self) -> &[DeclId] {
        match &self.kind {
            DeclKind::Function(function) => &function.overridden,
            DeclKind::Property(property) => &property.overridden,
            _ => &[],
        }
    }

    /// True for declarations that can take part in overriding.
    pub const fn is_callable_member(&self) -> bool {
        matches!(self.kind, DeclKind::Function(_) | DeclKind::Property(_))
    }
}
