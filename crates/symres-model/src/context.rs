//! Scope contexts.
//!
//! A `ScopeContext` is everything needed to deserialize one declaration:
//! the package fragment's name resolver, the type table indices resolve
//! against, the type parameters visible at that point and the stack of
//! enclosing declarations. Contexts are immutable; `child` derives a new
//! one and shares the parent's parts through `Arc`.

use crate::decl::TypeParameter;
use crate::ids::DeclId;
use crate::store::DeclarationStore;
use smallvec::SmallVec;
use std::sync::Arc;
use symres_common::limits::INLINE_GROUP_CAPACITY;
use symres_metadata::{NameResolver, TypeTable};

#[derive(Debug)]
enum ParameterFrame {
    Cons(Vec<TypeParameter>, Arc<ParameterFrame>),
    Tail(Vec<TypeParameter>),
}

impl ParameterFrame {
    fn parameters(&self) -> &[TypeParameter] {
        match self {
            Self::Cons(parameters, _) | Self::Tail(parameters) => parameters,
        }
    }

    fn parent(&self) -> Option<&Arc<ParameterFrame>> {
        match self {
            Self::Cons(_, parent) => Some(parent),
            Self::Tail(_) => None,
        }
    }
}

/// Type parameters in scope, innermost frame first on lookup.
#[derive(Clone, Debug, Default)]
pub struct TypeParameterScope {
    head: Option<Arc<ParameterFrame>>,
}

impl TypeParameterScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope with `parameters` pushed on top of `self`.
    ///
    /// Pushing an empty list returns `self` unchanged.
    #[must_use]
    pub fn push(&self, parameters: Vec<TypeParameter>) -> Self {
        if parameters.is_empty() {
            return self.clone();
        }
        let frame = match &self.head {
            Some(parent) => ParameterFrame::Cons(parameters, Arc::clone(parent)),
            None => ParameterFrame::Tail(parameters),
        };
        Self {
            head: Some(Arc::new(frame)),
        }
    }

    fn frames(&self) -> impl Iterator<Item = &ParameterFrame> {
        std::iter::successors(self.head.as_deref(), |frame| frame.parent().map(Arc::as_ref))
    }

    /// Finds a parameter by its symbol-table id, together with the number of
    /// frames between the innermost one and the one that declares it.
    pub fn get_with_depth(&self, id: u32) -> Option<(&TypeParameter, u16)> {
        self.frames().zip(0u16..).find_map(|(frame, depth)| {
            frame
                .parameters()
                .iter()
                .find(|parameter| parameter.id == id)
                .map(|parameter| (parameter, depth))
        })
    }

    pub fn get(&self, id: u32) -> Option<&TypeParameter> {
        Some(self.get_with_depth(id)?.0)
    }

    /// Finds the innermost parameter with the given name.
    pub fn get_by_name(&self, name: &str) -> Option<&TypeParameter> {
        self.frames()
            .find_map(|frame| frame.parameters().iter().find(|parameter| parameter.name == name))
    }

    pub fn len(&self) -> usize {
        self.frames().map(|frame| frame.parameters().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct ScopeContext {
    fragment: DeclId,
    name_resolver: Arc<NameResolver>,
    type_table: Arc<TypeTable>,
    type_parameters: TypeParameterScope,
    declarations: SmallVec<[DeclId; INLINE_GROUP_CAPACITY]>,
}

impl ScopeContext {
    /// The root context of a package fragment: its resolver and type table,
    /// no type parameters and an empty declaration stack.
    pub fn package(
        fragment: DeclId,
        name_resolver: Arc<NameResolver>,
        type_table: Arc<TypeTable>,
    ) -> Self {
        Self {
            fragment,
            name_resolver,
            type_table,
            type_parameters: TypeParameterScope::new(),
            declarations: SmallVec::new(),
        }
    }

    /// The context for the members of `declaration`, which is pushed onto the
    /// declaration stack together with its type parameters.
    ///
    /// `type_table` replaces the active table when given; only classes pass one.
    #[must_use]
    pub fn child(
        &self,
        declaration: DeclId,
        type_parameters: &[TypeParameter],
        type_table: Option<Arc<TypeTable>>,
    ) -> Self {
        let mut declarations = self.declarations.clone();
        declarations.push(declaration);
        Self {
            fragment: self.fragment,
            name_resolver: Arc::clone(&self.name_resolver),
            type_table: type_table.unwrap_or_else(|| Arc::clone(&self.type_table)),
            type_parameters: self.type_parameters.push(type_parameters.to_vec()),
            declarations,
        }
    }

    /// The same context with extra type parameters in scope and no new
    /// declaration on the stack. Used while a declaration's own signature is
    /// being read.
    #[must_use]
    pub fn with_type_parameters(&self, type_parameters: Vec<TypeParameter>) -> Self {
        Self {
            type_parameters: self.type_parameters.push(type_parameters),
            ..self.clone()
        }
    }

    pub fn fragment(&self) -> DeclId {
        self.fragment
    }

    pub fn name_resolver(&self) -> &Arc<NameResolver> {
        &self.name_resolver
    }

    pub fn type_table(&self) -> &Arc<TypeTable> {
        &self.type_table
    }

    pub fn type_parameters(&self) -> &TypeParameterScope {
        &self.type_parameters
    }

    /// Enclosing declarations below the package fragment, outer to inner.
    pub fn declarations(&self) -> &[DeclId] {
        &self.declarations
    }

    /// The innermost enclosing declaration, or the package fragment.
    pub fn owner(&self) -> DeclId {
        self.declarations.last().copied().unwrap_or(self.fragment)
    }

    /// Dotted path of the context for error messages, e.g. `pkg.A.foo`.
    pub fn path(&self, store: &DeclarationStore) -> String {
        std::iter::once(self.fragment)
            .chain(self.declarations.iter().copied())
            .map(|id| match store.get(id) {
                Some(declaration) => declaration.name.to_string(),
                None => format!("{id}"),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
