use crate::set::OverrideSet;
use std::sync::Arc;
use symres_model::{
    DeclId, DeclKind, DeclKindFilter, Declaration, DeclarationStore, MemberScope, Name,
    SymbolError,
};

/// A `MemberScope` over a fixed list of declarations, typically the
/// effective members of a class.
#[derive(Clone, Debug, Default)]
pub struct SyntheticScope {
    declarations: Vec<Arc<Declaration>>,
}

impl SyntheticScope {
    pub fn new(declarations: Vec<Arc<Declaration>>) -> Self {
        Self { declarations }
    }

    pub fn from_ids(
        store: &DeclarationStore,
        ids: impl IntoIterator<Item = DeclId>,
    ) -> Result<Self, SymbolError> {
        let declarations = ids
            .into_iter()
            .map(|id| store.resolve(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(declarations))
    }

    pub fn from_override_set(
        store: &DeclarationStore,
        set: &OverrideSet,
    ) -> Result<Self, SymbolError> {
        Self::from_ids(store, set.member_ids())
    }

    pub fn declarations(&self) -> &[Arc<Declaration>] {
        &self.declarations
    }

    fn named<'s>(
        &'s self,
        name: &'s str,
        kind: impl Fn(&DeclKind) -> bool + 's,
    ) -> impl Iterator<Item = &'s Arc<Declaration>> + 's {
        self.declarations
            .iter()
            .filter(move |declaration| declaration.name == name && kind(&declaration.kind))
    }
}

impl MemberScope for SyntheticScope {
    fn lookup_type(&self, name: &str) -> Result<Option<Arc<Declaration>>, SymbolError> {
        let classifiers: Vec<_> = self
            .named(name, |kind| matches!(kind, DeclKind::Class(_)))
            .collect();
        match classifiers.as_slice() {
            [] => Ok(None),
            [single] => Ok(Some(Arc::clone(single))),
            many => Err(SymbolError::AmbiguousLookup {
                name: Name::new(name),
                count: many.len(),
            }),
        }
    }

    fn lookup_properties(&self, name: &str) -> Vec<Arc<Declaration>> {
        self.named(name, |kind| matches!(kind, DeclKind::Property(_)))
            .cloned()
            .collect()
    }

    fn lookup_functions(&self, name: &str) -> Vec<Arc<Declaration>> {
        self.named(name, |kind| matches!(kind, DeclKind::Function(_)))
            .cloned()
            .collect()
    }

    fn lookup_all(
        &self,
        kind_filter: DeclKindFilter,
        name_filter: &dyn Fn(&Name) -> bool,
    ) -> Vec<Arc<Declaration>> {
        self.declarations
            .iter()
            .filter(|declaration| kind_filter.accepts(declaration) && name_filter(&declaration.name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/synthetic_scope_tests.rs"]
mod tests;
