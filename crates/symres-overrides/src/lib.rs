//! Override synthesis.
//!
//! Given a class, its declared members and the effective members of each of
//! its supertypes, the synthesizer decides which inherited members the
//! declared ones override, merges inherited members that stand for the same
//! declaration into one synthesized member, and reports the inherited
//! members that clash.
//!
//! - `relation`: return-type compatibility (`TypeRelation`)
//! - `signature`: member signatures and override compatibility
//! - `synthesizer`: the per-class algorithm
//! - `set`: its result (`OverrideSet`, `Conflict`)
//! - `effective`: recursive, cached effective-member resolution
//! - `synthetic_scope`: a queryable scope over any member list

pub mod effective;
pub mod options;
pub mod relation;
pub mod set;
pub mod signature;
pub mod synthesizer;
pub mod synthetic_scope;

pub use effective::EffectiveMembers;
pub use options::{RelationKind, SynthesisOptions};
pub use relation::{ExactRelation, HierarchyRelation, StructuralRelation, TypeRelation};
pub use set::{Conflict, ConflictKind, EffectiveMember, MemberOrigin, OverrideSet, OverrideSynthesis};
pub use signature::{MemberKind, MemberSignature, OverrideCompatibility};
pub use synthesizer::{
    OverriddenLookup, OverrideSynthesizer, SupertypeMembers, synthesize, synthesize_overrides,
};
pub use synthetic_scope::SyntheticScope;

#[cfg(test)]
#[path = "tests/fixture.rs"]
mod fixture;
