//! The result of override synthesis for one class.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use symres_model::{
    ConflictReport, DeclId, Declaration, DeclarationStore, Name, SymbolError, render_declaration,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberOrigin {
    /// Declared in the class itself.
    Declared,
    /// Inherited from exactly one supertype member whose signature the
    /// substitution left unchanged.
    InheritedUnmodified,
    /// Stands for several supertype members, or for one whose signature
    /// changed under substitution.
    SynthesizedBridge,
}

impl MemberOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::InheritedUnmodified => "inherited",
            Self::SynthesizedBridge => "bridge",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveMember {
    pub id: DeclId,
    pub origin: MemberOrigin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    /// Two inherited members with equal signatures that do not stand for
    /// the same declaration.
    InheritedClash,
    /// A declared member with the shape of an inherited one but an invalid
    /// return type or mutability.
    IncompatibleOverride { reason: String },
}

/// `first` and `second` cannot coexist in the class.
///
/// For `IncompatibleOverride`, `first` is the declared member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub name: Name,
    pub first: DeclId,
    pub second: DeclId,
    pub kind: ConflictKind,
}

impl Conflict {
    pub fn report(&self, store: &DeclarationStore) -> ConflictReport {
        let signature = |id: DeclId| {
            store
                .get(id)
                .map_or_else(|| id.to_string(), |declaration| render_declaration(&declaration))
        };
        ConflictReport {
            first: self.first,
            second: self.second,
            first_signature: signature(self.first),
            second_signature: signature(self.second),
            declared: matches!(self.kind, ConflictKind::IncompatibleOverride { .. }),
        }
    }
}

/// Effective members of a class, grouped by name.
///
/// Groups keep declaration order: declared names first, then inherited
/// names in supertype order.
#[derive(Clone, Debug)]
pub struct OverrideSet {
    pub class: DeclId,
    groups: IndexMap<Name, Vec<EffectiveMember>>,
    overridden: FxHashMap<DeclId, Vec<DeclId>>,
}

impl OverrideSet {
    pub(crate) fn new(class: DeclId) -> Self {
        Self {
            class,
            groups: IndexMap::new(),
            overridden: FxHashMap::default(),
        }
    }

    pub(crate) fn push(&mut self, name: Name, member: EffectiveMember) {
        self.groups.entry(name).or_default().push(member);
    }

    pub(crate) fn record_overridden(&mut self, member: DeclId, overridden: DeclId) {
        let list = self.overridden.entry(member).or_default();
        if !list.contains(&overridden) {
            list.push(overridden);
        }
    }

    pub fn group(&self, name: &str) -> &[EffectiveMember] {
        self.groups.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&Name, &[EffectiveMember])> {
        self.groups
            .iter()
            .map(|(name, members)| (name, members.as_slice()))
    }

    pub fn members(&self) -> impl Iterator<Item = &EffectiveMember> {
        self.groups.values().flatten()
    }

    pub fn member_ids(&self) -> Vec<DeclId> {
        self.members().map(|member| member.id).collect()
    }

    pub fn origin(&self, id: DeclId) -> Option<MemberOrigin> {
        self.members()
            .find(|member| member.id == id)
            .map(|member| member.origin)
    }

    /// Supertype members that `member` overrides, as decided by synthesis.
    pub fn overridden_by(&self, member: DeclId) -> &[DeclId] {
        self.overridden.get(&member).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn overridden_lists(&self) -> impl Iterator<Item = (&DeclId, &Vec<DeclId>)> {
        self.overridden.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct OverrideSynthesis {
    pub set: OverrideSet,
    pub conflicts: Vec<Conflict>,
    /// Fake overrides built for `set` and not yet in the store.
    pending: Vec<Arc<Declaration>>,
}

impl OverrideSynthesis {
    pub(crate) fn new(
        set: OverrideSet,
        conflicts: Vec<Conflict>,
        pending: Vec<Arc<Declaration>>,
    ) -> Self {
        Self {
            set,
            conflicts,
            pending,
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Fake overrides that `register` has not inserted yet.
    pub fn pending(&self) -> &[Arc<Declaration>] {
        &self.pending
    }

    /// Inserts the pending fake overrides into `store`. Later calls, and
    /// clones taken afterwards, insert nothing.
    pub fn register(&mut self, store: &DeclarationStore) {
        for fake in self.pending.drain(..) {
            store.insert_shared(fake);
        }
    }

    /// The set with its fake overrides registered, or an `OverrideConflict`
    /// listing every conflict. On conflict nothing is registered.
    pub fn into_result(mut self, store: &DeclarationStore) -> Result<OverrideSet, SymbolError> {
        if self.conflicts.is_empty() {
            self.register(store);
            return Ok(self.set);
        }
        Err(self.conflict_error(store))
    }

    pub fn conflict_error(&self, store: &DeclarationStore) -> SymbolError {
        let class = store
            .get(self.set.class)
            .map_or_else(|| self.set.class.to_string(), |class| class.name.to_string());
        SymbolError::OverrideConflict {
            class,
            conflicts: self
                .conflicts
                .iter()
                .map(|conflict| conflict.report(store))
                .collect(),
        }
    }
}
