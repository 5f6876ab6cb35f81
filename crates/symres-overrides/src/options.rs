use crate::relation::{ExactRelation, HierarchyRelation, StructuralRelation, TypeRelation};
use std::sync::Arc;

/// Named built-in relations, for hosts that pick one from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelationKind {
    Exact,
    #[default]
    Structural,
    Hierarchy,
}

impl RelationKind {
    pub fn relation(self) -> Arc<dyn TypeRelation> {
        match self {
            Self::Exact => Arc::new(ExactRelation),
            Self::Structural => Arc::new(StructuralRelation),
            Self::Hierarchy => Arc::new(HierarchyRelation),
        }
    }
}

/// Runtime knobs of override synthesis.
#[derive(Clone, Debug)]
pub struct SynthesisOptions {
    /// Decides return-type compatibility of overrides.
    pub relation: Arc<dyn TypeRelation>,
    /// When false, a member inherited unchanged from exactly one supertype
    /// member is represented by that member itself instead of a fresh fake
    /// override owned by the class.
    pub materialize_unmodified: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            relation: RelationKind::default().relation(),
            materialize_unmodified: true,
        }
    }
}

impl SynthesisOptions {
    #[must_use]
    pub fn with_relation(mut self, kind: RelationKind) -> Self {
        self.relation = kind.relation();
        self
    }

    #[must_use]
    pub fn materialize_unmodified(mut self, materialize: bool) -> Self {
        self.materialize_unmodified = materialize;
        self
    }
}
