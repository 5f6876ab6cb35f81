//! Override synthesis for one class.
//!
//! Inherited members are first matched against the declared members of the
//! same name. Whatever no declared member binds is bucketed by signature
//! shape; a bucket whose members all stand for the same original
//! declaration becomes one fake override, any other bucket is a conflict.

use crate::options::SynthesisOptions;
use crate::set::{
    Conflict, ConflictKind, EffectiveMember, MemberOrigin, OverrideSet, OverrideSynthesis,
};
use crate::signature::{MemberSignature, OverrideCompatibility};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::sync::Arc;
use symres_model::{
    DeclId, DeclKind, DeclOrigin, Declaration, DeclarationStore, FunctionData, Name, PropertyData,
    Substitution, SymbolError, Type, TypeParameter, ValueParameter,
};
use tracing::{debug, trace};

/// The effective members of one direct supertype.
#[derive(Clone, Debug)]
pub struct SupertypeMembers {
    /// The supertype as written in the class header, e.g. `Base<Int>`.
    pub supertype: Type,
    /// The declaration of the supertype's class.
    pub class: DeclId,
    pub members: Vec<DeclId>,
}

/// Where synthesis finds the members a member directly overrides.
///
/// The store only knows the lists recorded on declarations; hosts that keep
/// synthesis results elsewhere (`EffectiveMembers`) answer from those too.
pub trait OverriddenLookup {
    fn overridden(&self, member: DeclId) -> Vec<DeclId>;
}

impl OverriddenLookup for DeclarationStore {
    fn overridden(&self, member: DeclId) -> Vec<DeclId> {
        self.get(member)
            .map(|declaration| declaration.overridden().to_vec())
            .unwrap_or_default()
    }
}

struct Inherited {
    declaration: Arc<Declaration>,
    signature: MemberSignature,
    /// Substitution left the signature unchanged.
    unmodified: bool,
    /// Index of the supertype it came from.
    supertype: usize,
}

pub struct OverrideSynthesizer<'a> {
    store: &'a DeclarationStore,
    options: &'a SynthesisOptions,
    lookup: &'a dyn OverriddenLookup,
}

impl<'a> OverrideSynthesizer<'a> {
    pub fn new(store: &'a DeclarationStore, options: &'a SynthesisOptions) -> Self {
        Self {
            store,
            options,
            lookup: store,
        }
    }

    #[must_use]
    pub fn with_lookup(mut self, lookup: &'a dyn OverriddenLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Computes the effective members of `class` from its `declared` members
    /// and the effective members of each direct supertype, in supertype
    /// declaration order.
    ///
    /// The store is only read: fake overrides get reserved ids but stay
    /// pending in the result until `OverrideSynthesis::register`. Conflicts
    /// are collected, not raised; `OverrideSynthesis::into_result` turns
    /// them into an error.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %class))]
    pub fn synthesize(
        &self,
        class: DeclId,
        declared: &[DeclId],
        supertypes: &[SupertypeMembers],
    ) -> Result<OverrideSynthesis, SymbolError> {
        let mut set = OverrideSet::new(class);
        let mut conflicts = Vec::new();

        let identity = Substitution::new();
        let mut declared_by_name: IndexMap<Name, Vec<(DeclId, MemberSignature)>> = IndexMap::new();
        for &id in declared {
            let declaration = self.store.resolve(id)?;
            set.push(
                declaration.name.clone(),
                EffectiveMember {
                    id,
                    origin: MemberOrigin::Declared,
                },
            );
            if let Some(signature) = MemberSignature::of(&declaration, &identity) {
                declared_by_name
                    .entry(declaration.name.clone())
                    .or_default()
                    .push((id, signature));
            }
        }

        let substitutions: Vec<Substitution> = supertypes
            .iter()
            .map(|supertype| Substitution::for_supertype(supertype.class, &supertype.supertype))
            .collect();
        let inherited = self.collect_inherited(supertypes, &substitutions)?;

        let mut fakes = Vec::new();
        for (name, members) in inherited {
            let declared_here = declared_by_name.get(&name).map_or(&[][..], Vec::as_slice);
            let mut unbound = Vec::new();
            for member in members {
                let mut bound = false;
                for (declared_id, declared_signature) in declared_here {
                    match declared_signature.check_override(
                        &member.signature,
                        self.options.relation.as_ref(),
                        self.store,
                    ) {
                        OverrideCompatibility::Overridable => {
                            set.record_overridden(*declared_id, member.declaration.id);
                            bound = true;
                        }
                        OverrideCompatibility::Conflict(reason) => {
                            debug!(%name, declared = %declared_id, inherited = %member.declaration.id, %reason, "incompatible override");
                            conflicts.push(Conflict {
                                name: name.clone(),
                                first: *declared_id,
                                second: member.declaration.id,
                                kind: ConflictKind::IncompatibleOverride { reason },
                            });
                            bound = true;
                        }
                        OverrideCompatibility::Incompatible => {}
                    }
                }
                if !bound {
                    unbound.push(member);
                }
            }

            for bucket in bucket_by_shape(unbound) {
                let closures: Vec<FxHashSet<DeclId>> = bucket
                    .iter()
                    .map(|member| closure(self.lookup, member.declaration.id))
                    .collect();
                let clusters = clusters(&closures);
                if let [first_cluster, others @ ..] = clusters.as_slice()
                    && !others.is_empty()
                {
                    let first = bucket[first_cluster[0]].declaration.id;
                    for cluster in others {
                        let second = bucket[cluster[0]].declaration.id;
                        debug!(%name, %first, %second, "inherited members clash");
                        conflicts.push(Conflict {
                            name: name.clone(),
                            first,
                            second,
                            kind: ConflictKind::InheritedClash,
                        });
                    }
                    continue;
                }

                let specific = &bucket[most_specific(&bucket, &closures)];
                let origin = if bucket.len() == 1 && specific.unmodified {
                    MemberOrigin::InheritedUnmodified
                } else {
                    MemberOrigin::SynthesizedBridge
                };
                if origin == MemberOrigin::InheritedUnmodified
                    && !self.options.materialize_unmodified
                {
                    set.push(
                        name.clone(),
                        EffectiveMember {
                            id: specific.declaration.id,
                            origin,
                        },
                    );
                    continue;
                }

                let overridden: Vec<DeclId> =
                    bucket.iter().map(|member| member.declaration.id).collect();
                let id = self.store.reserve();
                let Some(fake) = fake_override(
                    id,
                    class,
                    &specific.declaration,
                    &substitutions[specific.supertype],
                    overridden.clone(),
                ) else {
                    continue;
                };
                trace!(%name, fake = %id, ?origin, overridden = overridden.len(), "fake override");
                for overridden in overridden {
                    set.record_overridden(id, overridden);
                }
                set.push(name.clone(), EffectiveMember { id, origin });
                fakes.push(Arc::new(fake));
            }
        }

        debug!(
            members = set.len(),
            fakes = fakes.len(),
            conflicts = conflicts.len(),
            "override synthesis done"
        );
        Ok(OverrideSynthesis::new(set, conflicts, fakes))
    }

    /// Inheritable callable members of every supertype grouped by name,
    /// each declaration once.
    fn collect_inherited(
        &self,
        supertypes: &[SupertypeMembers],
        substitutions: &[Substitution],
    ) -> Result<IndexMap<Name, Vec<Inherited>>, SymbolError> {
        let identity = Substitution::new();
        let mut seen = FxHashSet::default();
        let mut groups: IndexMap<Name, Vec<Inherited>> = IndexMap::new();
        for (index, supertype) in supertypes.iter().enumerate() {
            for &id in &supertype.members {
                if !seen.insert(id) {
                    continue;
                }
                let declaration = self.store.resolve(id)?;
                if !declaration.visibility().is_inheritable() {
                    trace!(member = %id, name = %declaration.name, "not inherited");
                    continue;
                }
                let Some(signature) = MemberSignature::of(&declaration, &substitutions[index])
                else {
                    continue;
                };
                let unmodified =
                    MemberSignature::of(&declaration, &identity).as_ref() == Some(&signature);
                groups
                    .entry(declaration.name.clone())
                    .or_default()
                    .push(Inherited {
                        declaration,
                        signature,
                        unmodified,
                        supertype: index,
                    });
            }
        }
        Ok(groups)
    }
}

/// Runs `OverrideSynthesizer::synthesize` with the store as overridden lookup.
///
/// A conflict-free result has its fake overrides registered; a result with
/// conflicts leaves the store untouched and keeps them pending.
pub fn synthesize(
    store: &DeclarationStore,
    class: DeclId,
    declared: &[DeclId],
    supertypes: &[SupertypeMembers],
    options: &SynthesisOptions,
) -> Result<OverrideSynthesis, SymbolError> {
    let mut synthesis =
        OverrideSynthesizer::new(store, options).synthesize(class, declared, supertypes)?;
    if !synthesis.has_conflicts() {
        synthesis.register(store);
    }
    Ok(synthesis)
}

/// Like `synthesize`, but any conflict fails with `OverrideConflict`.
pub fn synthesize_overrides(
    store: &DeclarationStore,
    class: DeclId,
    declared: &[DeclId],
    supertypes: &[SupertypeMembers],
    options: &SynthesisOptions,
) -> Result<OverrideSet, SymbolError> {
    OverrideSynthesizer::new(store, options)
        .synthesize(class, declared, supertypes)?
        .into_result(store)
}

/// Splits `members` into buckets of equal shape, keeping first-seen order.
fn bucket_by_shape(members: Vec<Inherited>) -> Vec<Vec<Inherited>> {
    let mut buckets: Vec<Vec<Inherited>> = Vec::new();
    for member in members {
        match buckets
            .iter_mut()
            .find(|bucket| bucket[0].signature.same_shape(&member.signature))
        {
            Some(bucket) => bucket.push(member),
            None => buckets.push(vec![member]),
        }
    }
    buckets
}

/// `member` and everything it transitively overrides.
fn closure(lookup: &dyn OverriddenLookup, member: DeclId) -> FxHashSet<DeclId> {
    let mut visited = FxHashSet::default();
    let mut stack = vec![member];
    while let Some(next) = stack.pop() {
        if visited.insert(next) {
            stack.extend(lookup.overridden(next));
        }
    }
    visited
}

/// Groups bucket indices whose override closures meet: two members are
/// related when one overrides the other or both reach a common original.
/// Clusters are ordered by their first member.
fn clusters(closures: &[FxHashSet<DeclId>]) -> Vec<SmallVec<[usize; 2]>> {
    fn root(parent: &mut [usize], mut index: usize) -> usize {
        while parent[index] != index {
            parent[index] = parent[parent[index]];
            index = parent[index];
        }
        index
    }

    let mut parent: Vec<usize> = (0..closures.len()).collect();
    for i in 0..closures.len() {
        for j in (i + 1)..closures.len() {
            if !closures[i].is_disjoint(&closures[j]) {
                let (a, b) = (root(&mut parent, i), root(&mut parent, j));
                if a != b {
                    parent[b.max(a)] = a.min(b);
                }
            }
        }
    }
    let mut clusters: IndexMap<usize, SmallVec<[usize; 2]>> = IndexMap::new();
    for index in 0..closures.len() {
        let root = root(&mut parent, index);
        clusters.entry(root).or_default().push(index);
    }
    clusters.into_values().collect()
}

/// The first member that no other bucket member overrides.
fn most_specific(bucket: &[Inherited], closures: &[FxHashSet<DeclId>]) -> usize {
    (0..bucket.len())
        .find(|&i| {
            let id = bucket[i].declaration.id;
            closures
                .iter()
                .enumerate()
                .all(|(j, closure)| j == i || !closure.contains(&id))
        })
        .unwrap_or(0)
}

/// A copy of `source` owned by `class`, with `substitution` applied and the
/// member's own type parameters re-owned by the copy.
fn fake_override(
    id: DeclId,
    class: DeclId,
    source: &Declaration,
    substitution: &Substitution,
    overridden: Vec<DeclId>,
) -> Option<Declaration> {
    let mut substitution = substitution.clone();
    for parameter in source.type_parameters() {
        substitution.insert(
            source.id,
            parameter.index,
            Type::parameter(id, parameter.index, parameter.name.clone()),
        );
    }
    let substitute = |ty: &Type| ty.substitute(&substitution);
    let type_parameters = |parameters: &[TypeParameter]| -> Vec<TypeParameter> {
        parameters
            .iter()
            .map(|parameter| TypeParameter {
                owner: id,
                upper_bounds: parameter.upper_bounds.iter().map(substitute).collect(),
                ..parameter.clone()
            })
            .collect()
    };

    let kind = match &source.kind {
        DeclKind::Function(function) => DeclKind::Function(FunctionData {
            type_parameters: type_parameters(&function.type_parameters),
            receiver: function.receiver.as_ref().map(substitute),
            value_parameters: function
                .value_parameters
                .iter()
                .map(|parameter| ValueParameter {
                    ty: substitute(&parameter.ty),
                    vararg_element_type: parameter.vararg_element_type.as_ref().map(substitute),
                    ..parameter.clone()
                })
                .collect(),
            return_type: substitute(&function.return_type),
            overridden,
            ..function.clone()
        }),
        DeclKind::Property(property) => DeclKind::Property(PropertyData {
            type_parameters: type_parameters(&property.type_parameters),
            receiver: property.receiver.as_ref().map(substitute),
            ty: substitute(&property.ty),
            overridden,
            ..property.clone()
        }),
        _ => return None,
    };
    Some(
        Declaration::new(id, source.name.clone(), Some(class), kind)
            .with_origin(DeclOrigin::FakeOverride),
    )
}

#[cfg(test)]
#[path = "tests/synthesizer_tests.rs"]
mod tests;
