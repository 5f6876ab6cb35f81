//! Materialization of single records into declarations.
//!
//! A `MemberMaterializer` works in one fixed `ScopeContext`: the context of
//! the declaration that will contain whatever it builds. It never inserts
//! anything into the store; callers insert the returned declarations once a
//! whole batch has been read, so a failure leaves no partial state behind.

use crate::members::load_class_members;
use crate::type_deserializer::TypeDeserializer;
use std::sync::Arc;
use symres_metadata::{
    AccessorFlags, AccessorRecord, AnnotationRecord, ClassRecord, ConstructorRecord,
    FunctionRecord, Name, PropertyFlags, PropertyRecord, TypeParameterProto, TypeTable,
    ValueParameterFlags, ValueParameterRecord,
};
use symres_model::{
    Accessor, Annotation, ClassData, ClassMembers, ConstructorData, DeclId, DeclKind, DeclOrigin,
    Declaration, DeclarationStore, FunctionData, LazyMembers, LocalVariableData, PropertyData,
    ScopeContext, SymbolError, TypeParameter, ValueParameter, builtins,
};
use tracing::trace;

const CONSTRUCTOR_NAME: &str = "<init>";
const UNNAMED: &str = "<unnamed>";

pub struct MemberMaterializer<'a> {
    store: &'a DeclarationStore,
    context: ScopeContext,
    scope_path: String,
}

impl<'a> MemberMaterializer<'a> {
    pub fn new(store: &'a DeclarationStore, context: ScopeContext) -> Self {
        let scope_path = context.path(store);
        Self {
            store,
            context,
            scope_path,
        }
    }

    pub fn context(&self) -> &ScopeContext {
        &self.context
    }

    fn name(&self, index: u32) -> Result<Name, SymbolError> {
        self.context
            .name_resolver()
            .string(index)
            .map_err(|error| SymbolError::from(error).at(UNNAMED, &self.scope_path))
    }

    fn annotations(
        &self,
        context: &ScopeContext,
        records: &[AnnotationRecord],
    ) -> Result<Vec<Annotation>, SymbolError> {
        records
            .iter()
            .map(|record| -> Result<Annotation, SymbolError> {
                Ok(Annotation {
                    class: context.name_resolver().class_id(record.class_name)?,
                })
            })
            .collect()
    }

    /// Reads type parameters owned by `owner`.
    ///
    /// Bounds may mention any parameter of the same list, so all parameters
    /// are put in scope before the bounds are read.
    fn type_parameters(
        &self,
        base: &ScopeContext,
        owner: DeclId,
        protos: &[TypeParameterProto],
    ) -> Result<Vec<TypeParameter>, SymbolError> {
        let mut parameters = protos
            .iter()
            .enumerate()
            .map(|(index, proto)| -> Result<TypeParameter, SymbolError> {
                Ok(TypeParameter {
                    id: proto.id,
                    name: base.name_resolver().string(proto.name)?,
                    index: index as u32,
                    owner,
                    variance: proto.variance,
                    reified: proto.reified,
                    upper_bounds: Vec::new(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if protos.iter().all(|proto| proto.upper_bounds.is_empty()) {
            return Ok(parameters);
        }

        let scope = base.with_type_parameters(parameters.clone());
        let types = TypeDeserializer::new(&scope);
        for (parameter, proto) in parameters.iter_mut().zip(protos) {
            parameter.upper_bounds = proto
                .upper_bounds
                .iter()
                .map(|bound| types.type_ref(bound))
                .collect::<Result<_, _>>()?;
        }
        Ok(parameters)
    }

    fn value_parameters(
        &self,
        context: &ScopeContext,
        records: &[ValueParameterRecord],
    ) -> Result<Vec<ValueParameter>, SymbolError> {
        let types = TypeDeserializer::new(context);
        records
            .iter()
            .map(|record| -> Result<ValueParameter, SymbolError> {
                Ok(ValueParameter {
                    name: context.name_resolver().string(record.name)?,
                    ty: types.type_ref(&record.ty)?,
                    vararg_element_type: record
                        .vararg_element_type
                        .as_ref()
                        .map(|ty| types.type_ref(ty))
                        .transpose()?,
                    declares_default_value: record
                        .flags
                        .contains(ValueParameterFlags::DECLARES_DEFAULT_VALUE),
                    is_crossinline: record.flags.contains(ValueParameterFlags::CROSSINLINE),
                    is_noinline: record.flags.contains(ValueParameterFlags::NOINLINE),
                    annotations: self.annotations(context, &record.annotations)?,
                })
            })
            .collect()
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Builds a class whose members are read on first access.
    ///
    /// `type_table` is the class's own table; the members, the supertypes and
    /// the bounds of the class's type parameters all resolve against it.
    #[tracing::instrument(level = "debug", skip_all, fields(scope = %self.scope_path))]
    pub fn load_class(
        &self,
        record: Arc<ClassRecord>,
        type_table: Arc<TypeTable>,
    ) -> Result<Declaration, SymbolError> {
        let id = self.store.reserve();
        let class_id = self
            .context
            .name_resolver()
            .class_id(record.fq_name)
            .map_err(|error| SymbolError::from(error).at(UNNAMED, &self.scope_path))?;
        let name = Name::new(class_id.short_name());

        let base = self.context.child(id, &[], Some(Arc::clone(&type_table)));
        let build = || -> Result<Declaration, SymbolError> {
            let type_parameters = self.type_parameters(&base, id, &record.type_parameters)?;
            let class_context = base.with_type_parameters(type_parameters.clone());
            let types = TypeDeserializer::new(&class_context);
            let mut supertypes = record
                .supertypes
                .iter()
                .map(|supertype| types.type_ref(supertype))
                .collect::<Result<Vec<_>, _>>()?;
            // Every class but the root implicitly extends `Any`.
            if supertypes.is_empty() && class_id != builtins::any() {
                supertypes.push(symres_model::Type::class(builtins::any()));
            }
            let annotations = self.annotations(&self.context, &record.annotations)?;
            trace!(class = %class_id, supertypes = supertypes.len(), "materialized class");

            let data = ClassData {
                class_id: class_id.clone(),
                kind: record.kind,
                modality: record.modality,
                visibility: record.visibility,
                flags: record.flags,
                type_parameters,
                supertypes,
                type_table: Arc::clone(&type_table),
                members: ClassMembers::Lazy(LazyMembers::new(
                    Arc::clone(&record),
                    class_context,
                    load_class_members,
                )),
            };
            Ok(
                Declaration::new(id, name.clone(), Some(self.context.owner()), DeclKind::Class(data))
                    .with_origin(DeclOrigin::Deserialized)
                    .with_annotations(annotations),
            )
        };
        build().map_err(|error| error.at(&name, &self.scope_path))
    }

    // =========================================================================
    // Functions and constructors
    // =========================================================================

    #[tracing::instrument(level = "debug", skip_all, fields(scope = %self.scope_path))]
    pub fn load_function(&self, record: &FunctionRecord) -> Result<Declaration, SymbolError> {
        let id = self.store.reserve();
        let name = self.name(record.name)?;
        let build = || -> Result<Declaration, SymbolError> {
            let type_parameters =
                self.type_parameters(&self.context, id, &record.type_parameters)?;
            let context = self.context.with_type_parameters(type_parameters.clone());
            let types = TypeDeserializer::new(&context);
            let data = FunctionData {
                receiver: record
                    .receiver_type
                    .as_ref()
                    .map(|ty| types.type_ref(ty))
                    .transpose()?,
                value_parameters: self.value_parameters(&context, &record.value_parameters)?,
                return_type: types.type_ref(&record.return_type)?,
                type_parameters,
                modality: record.modality,
                visibility: record.visibility,
                flags: record.flags,
                overridden: Vec::new(),
            };
            Ok(
                Declaration::new(id, name.clone(), Some(self.context.owner()), DeclKind::Function(data))
                    .with_origin(DeclOrigin::Deserialized)
                    .with_annotations(self.annotations(&context, &record.annotations)?),
            )
        };
        build().map_err(|error| error.at(&name, &self.scope_path))
    }

    /// Builds a constructor of the class this materializer's context belongs to.
    #[tracing::instrument(level = "debug", skip_all, fields(scope = %self.scope_path, is_primary = is_primary))]
    pub fn load_constructor(
        &self,
        record: &ConstructorRecord,
        is_primary: bool,
    ) -> Result<Declaration, SymbolError> {
        let owner = self.store.resolve(self.context.owner())?;
        let Some(class) = owner.as_class() else {
            return Err(SymbolError::MalformedChain {
                reason: format!(
                    "constructor declared in {} `{}` instead of a class",
                    owner.kind.label(),
                    owner.name
                ),
            });
        };
        let id = self.store.reserve();
        let build = || -> Result<Declaration, SymbolError> {
            let data = ConstructorData {
                value_parameters: self.value_parameters(&self.context, &record.value_parameters)?,
                return_type: class.default_type(),
                is_primary,
                visibility: record.visibility,
            };
            Ok(Declaration::new(
                id,
                Name::new(CONSTRUCTOR_NAME),
                Some(owner.id),
                DeclKind::Constructor(data),
            )
            .with_origin(DeclOrigin::Deserialized)
            .with_annotations(self.annotations(&self.context, &record.annotations)?))
        };
        build().map_err(|error| error.at(CONSTRUCTOR_NAME, &self.scope_path))
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[tracing::instrument(level = "debug", skip_all, fields(scope = %self.scope_path))]
    pub fn load_property(&self, record: &PropertyRecord) -> Result<Declaration, SymbolError> {
        let id = self.store.reserve();
        let name = self.name(record.name)?;
        let build = || -> Result<Declaration, SymbolError> {
            let type_parameters =
                self.type_parameters(&self.context, id, &record.type_parameters)?;
            let context = self.context.with_type_parameters(type_parameters.clone());
            let types = TypeDeserializer::new(&context);
            let is_var = record.flags.contains(PropertyFlags::IS_VAR);
            let default_accessor = Accessor {
                is_default: true,
                is_external: false,
                is_inline: false,
                visibility: record.visibility,
                modality: record.modality,
            };
            let data = PropertyData {
                receiver: record
                    .receiver_type
                    .as_ref()
                    .map(|ty| types.type_ref(ty))
                    .transpose()?,
                ty: types.type_ref(&record.return_type)?,
                type_parameters,
                is_var,
                is_delegated: record.flags.contains(PropertyFlags::IS_DELEGATED),
                is_const: record.flags.contains(PropertyFlags::IS_CONST),
                is_lateinit: record.flags.contains(PropertyFlags::LATEINIT),
                getter: Some(record.getter.as_ref().map_or(default_accessor, accessor)),
                setter: is_var.then(|| record.setter.as_ref().map_or(default_accessor, accessor)),
                modality: record.modality,
                visibility: record.visibility,
                overridden: Vec::new(),
            };
            Ok(
                Declaration::new(id, name.clone(), Some(self.context.owner()), DeclKind::Property(data))
                    .with_origin(DeclOrigin::Deserialized)
                    .with_annotations(self.annotations(&context, &record.annotations)?),
            )
        };
        build().map_err(|error| error.at(&name, &self.scope_path))
    }

    /// Turns a property into a local variable with the same identity, owner,
    /// annotations, name, type and mutability.
    ///
    /// Accessors are not carried over; a local variable has none. Any other
    /// declaration is returned unchanged.
    pub fn property_to_variable(property: Declaration) -> Declaration {
        let Declaration {
            id,
            name,
            containing,
            annotations,
            origin,
            kind,
        } = property;
        let kind = match kind {
            DeclKind::Property(data) => DeclKind::LocalVariable(LocalVariableData {
                ty: data.ty,
                is_var: data.is_var,
                is_delegated: data.is_delegated,
            }),
            other => other,
        };
        Declaration {
            id,
            name,
            containing,
            annotations,
            origin,
            kind,
        }
    }
}

fn accessor(record: &AccessorRecord) -> Accessor {
    Accessor {
        is_default: !record.flags.contains(AccessorFlags::IS_NOT_DEFAULT),
        is_external: record.flags.contains(AccessorFlags::IS_EXTERNAL),
        is_inline: record.flags.contains(AccessorFlags::IS_INLINE),
        visibility: record.visibility,
        modality: record.modality,
    }
}

