//! Effective members of classes in a store, resolved recursively through
//! supertypes and cached.

use crate::options::SynthesisOptions;
use crate::set::{OverrideSet, OverrideSynthesis};
use crate::synthesizer::{OverriddenLookup, OverrideSynthesizer, SupertypeMembers};
use crate::synthetic_scope::SyntheticScope;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use symres_common::limits::MAX_OWNERSHIP_DEPTH;
use symres_model::{DeclId, DeclarationStore, SymbolError, Type};
use tracing::trace;

type CacheKey = (DeclId, Vec<Type>);

/// Computes and caches the override synthesis of each class, keyed by the
/// class and its supertype list.
///
/// A supertype whose class is not registered in the store contributes no
/// members. Overridden lists decided by synthesis are remembered so later
/// classes see declared overrides transitively.
///
/// A result is committed when it enters the cache: only then are its fake
/// overrides registered in the store, conflicts or not, so subclasses can
/// resolve every member of the set.
pub struct EffectiveMembers<'a> {
    store: &'a DeclarationStore,
    options: SynthesisOptions,
    cache: DashMap<CacheKey, Arc<OverrideSynthesis>>,
    overridden: DashMap<DeclId, Vec<DeclId>>,
}

impl<'a> EffectiveMembers<'a> {
    pub fn new(store: &'a DeclarationStore, options: SynthesisOptions) -> Self {
        Self {
            store,
            options,
            cache: DashMap::new(),
            overridden: DashMap::new(),
        }
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// The synthesis result of `class`, conflicts included.
    pub fn synthesis(&self, class: DeclId) -> Result<Arc<OverrideSynthesis>, SymbolError> {
        self.resolve(class, &mut Vec::new())
    }

    /// The effective members of `class`; fails with `OverrideConflict` when
    /// synthesis reported conflicts.
    pub fn members(&self, class: DeclId) -> Result<OverrideSet, SymbolError> {
        let synthesis = self.synthesis(class)?;
        if synthesis.has_conflicts() {
            return Err(synthesis.conflict_error(self.store));
        }
        Ok(synthesis.set.clone())
    }

    /// A member scope over the effective members of `class`.
    pub fn scope(&self, class: DeclId) -> Result<SyntheticScope, SymbolError> {
        SyntheticScope::from_override_set(self.store, &self.members(class)?)
    }

    /// Number of cached class results.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn resolve(
        &self,
        class: DeclId,
        visiting: &mut Vec<DeclId>,
    ) -> Result<Arc<OverrideSynthesis>, SymbolError> {
        let declaration = self.store.resolve(class)?;
        let Some(data) = declaration.as_class() else {
            return Err(SymbolError::MalformedChain {
                reason: format!(
                    "effective members requested for {} `{}`",
                    declaration.kind.label(),
                    declaration.name
                ),
            });
        };
        let key = (class, data.supertypes.clone());
        if let Some(hit) = self.cache.get(&key) {
            trace!(class = %class, "effective members cache hit");
            return Ok(Arc::clone(hit.value()));
        }
        if visiting.contains(&class) {
            return Err(SymbolError::MalformedChain {
                reason: format!("cyclic inheritance through `{}`", declaration.name),
            });
        }
        if visiting.len() >= MAX_OWNERSHIP_DEPTH {
            return Err(SymbolError::MalformedChain {
                reason: format!(
                    "supertype hierarchy of `{}` exceeds {MAX_OWNERSHIP_DEPTH} classes",
                    declaration.name
                ),
            });
        }

        visiting.push(class);
        let mut supertypes = Vec::with_capacity(data.supertypes.len());
        for supertype in &data.supertypes {
            let Some(super_class) = supertype
                .class_id()
                .and_then(|class_id| self.store.find_class(class_id))
            else {
                trace!(class = %class, %supertype, "supertype not in store");
                continue;
            };
            let synthesis = self.resolve(super_class, visiting)?;
            supertypes.push(SupertypeMembers {
                supertype: supertype.clone(),
                class: super_class,
                members: synthesis.set.member_ids(),
            });
        }
        visiting.pop();

        let declared = self.store.class_members(class)?;
        let mut synthesis = OverrideSynthesizer::new(self.store, &self.options)
            .with_lookup(self)
            .synthesize(class, &declared, &supertypes)?;

        // Concurrent callers may race on one class; the first result stays
        // and the losers' fakes are dropped unregistered.
        match self.cache.entry(key) {
            Entry::Occupied(entry) => {
                trace!(class = %class, "effective members computed concurrently");
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                synthesis.register(self.store);
                for (member, overridden) in synthesis.set.overridden_lists() {
                    self.overridden.insert(*member, overridden.clone());
                }
                Ok(Arc::clone(entry.insert(Arc::new(synthesis)).value()))
            }
        }
    }
}

impl OverriddenLookup for EffectiveMembers<'_> {
    fn overridden(&self, member: DeclId) -> Vec<DeclId> {
        if let Some(list) = self.overridden.get(&member) {
            return list.clone();
        }
        OverriddenLookup::overridden(self.store, member)
    }
}

#[cfg(test)]
#[path = "tests/effective_tests.rs"]
mod tests;
