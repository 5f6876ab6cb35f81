//! The member-scope query contract.

use crate::decl::{DeclKind, Declaration};
use crate::error::SymbolError;
use bitflags::bitflags;
use std::sync::Arc;
use symres_metadata::Name;

bitflags! {
    /// Which declaration kinds a `lookup_all` query accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DeclKindFilter: u8 {
        const CLASSIFIERS = 1 << 0;
        const FUNCTIONS = 1 << 1;
        const VARIABLES = 1 << 2;
        const CONSTRUCTORS = 1 << 3;
        const PACKAGES = 1 << 4;

        const CALLABLES = Self::FUNCTIONS.bits() | Self::VARIABLES.bits();
        const ALL = Self::CLASSIFIERS.bits()
            | Self::FUNCTIONS.bits()
            | Self::VARIABLES.bits()
            | Self::CONSTRUCTORS.bits()
            | Self::PACKAGES.bits();
    }
}

impl DeclKindFilter {
    pub fn accepts(self, declaration: &Declaration) -> bool {
        let required = match &declaration.kind {
            DeclKind::Class(_) => Self::CLASSIFIERS,
            DeclKind::Function(_) => Self::FUNCTIONS,
            DeclKind::Property(_) | DeclKind::LocalVariable(_) => Self::VARIABLES,
            DeclKind::Constructor(_) => Self::CONSTRUCTORS,
            DeclKind::Module | DeclKind::PackageFragment(_) => Self::PACKAGES,
            DeclKind::TypeParameterHolder(_) => return false,
        };
        self.intersects(required)
    }
}

/// Name-based queries over the members of one scope.
pub trait MemberScope {
    /// The single classifier named `name`.
    ///
    /// Fails with `AmbiguousLookup` when several classifiers share the name.
    fn lookup_type(&self, name: &str) -> Result<Option<Arc<Declaration>>, SymbolError>;

    /// Properties named `name`; local variables are not members.
    fn lookup_properties(&self, name: &str) -> Vec<Arc<Declaration>>;

    fn lookup_functions(&self, name: &str) -> Vec<Arc<Declaration>>;

    fn lookup_all(
        &self,
        kind_filter: DeclKindFilter,
        name_filter: &dyn Fn(&Name) -> bool,
    ) -> Vec<Arc<Declaration>>;
}
