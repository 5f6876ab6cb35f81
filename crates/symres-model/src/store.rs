//! Declaration storage.
//!
//! The `DeclarationStore` owns every declaration produced by deserialization
//! or override synthesis. It is keyed by `DeclId` and safe to share between
//! threads; declarations are immutable once inserted.

use crate::decl::{ClassMembers, DeclKind, Declaration};
use crate::error::SymbolError;
use crate::ids::DeclId;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use symres_common::limits::MAX_OWNERSHIP_DEPTH;
use symres_metadata::ClassId;
use tracing::trace;

pub struct DeclarationStore {
    declarations: DashMap<DeclId, Arc<Declaration>>,

    /// Class id -> class declaration, for supertype lookups.
    classes: DashMap<ClassId, DeclId>,

    next_id: AtomicU32,
}

impl Default for DeclarationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationStore {
    pub fn new() -> Self {
        Self {
            declarations: DashMap::new(),
            classes: DashMap::new(),
            next_id: AtomicU32::new(DeclId::FIRST_VALID),
        }
    }

    /// Reserve a fresh `DeclId` for a declaration that is not built yet.
    ///
    /// Materialization reserves the id first because a declaration's own type
    /// parameters refer to it as their owner. A reserved id that is never
    /// inserted simply stays unused.
    pub fn reserve(&self) -> DeclId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        trace!(reserved = %id, "decl id reserved");
        DeclId(id)
    }

    /// Insert a declaration under the id it carries.
    pub fn insert(&self, declaration: Declaration) -> Arc<Declaration> {
        let declaration = Arc::new(declaration);
        self.insert_shared(Arc::clone(&declaration));
        declaration
    }

    /// Insert a declaration that is already shared, e.g. one built by
    /// override synthesis and held by its result until it is committed.
    pub fn insert_shared(&self, declaration: Arc<Declaration>) {
        let id = declaration.id;
        trace!(
            decl = %id,
            kind = declaration.kind.label(),
            name = %declaration.name,
            "declaration inserted"
        );
        if let DeclKind::Class(class) = &declaration.kind {
            self.classes.insert(class.class_id.clone(), id);
        }
        self.declarations.insert(id, declaration);
    }

    /// Reserve an id, build the declaration with it and insert it.
    pub fn register(&self, build: impl FnOnce(DeclId) -> Declaration) -> Arc<Declaration> {
        let id = self.reserve();
        self.insert(build(id))
    }

    pub fn get(&self, id: DeclId) -> Option<Arc<Declaration>> {
        self.declarations.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Like `get`, but a miss is an `UnknownDeclaration` error.
    pub fn resolve(&self, id: DeclId) -> Result<Arc<Declaration>, SymbolError> {
        self.get(id).ok_or(SymbolError::UnknownDeclaration(id))
    }

    pub fn contains(&self, id: DeclId) -> bool {
        self.declarations.contains_key(&id)
    }

    /// The declaration registered for a class id, if any.
    pub fn find_class(&self, class: &ClassId) -> Option<DeclId> {
        self.classes.get(class).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Members of a class declaration, loading lazy members on first use.
    pub fn class_members(&self, class: DeclId) -> Result<Vec<DeclId>, SymbolError> {
        let declaration = self.resolve(class)?;
        let DeclKind::Class(data) = &declaration.kind else {
            return Err(SymbolError::MalformedChain {
                reason: format!(
                    "`{}` is a {}, not a class",
                    declaration.name,
                    declaration.kind.label()
                ),
            });
        };
        match &data.members {
            ClassMembers::Eager(members) => Ok(members.clone()),
            ClassMembers::Lazy(lazy) => lazy.get_or_load(self, class).map(<[DeclId]>::to_vec),
        }
    }

    /// The ownership chain of `id`, from its module down to `id` itself.
    ///
    /// Fails with `MalformedChain` when the chain is cyclic, longer than
    /// `MAX_OWNERSHIP_DEPTH`, or does not end at a module.
    pub fn ownership_chain(&self, id: DeclId) -> Result<Vec<Arc<Declaration>>, SymbolError> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(next) = current {
            if chain.len() >= MAX_OWNERSHIP_DEPTH {
                return Err(SymbolError::MalformedChain {
                    reason: format!(
                        "ownership chain of {id} exceeds {MAX_OWNERSHIP_DEPTH} declarations"
                    ),
                });
            }
            let declaration = self.resolve(next)?;
            if chain
                .iter()
                .any(|seen: &Arc<Declaration>| seen.id == declaration.id)
            {
                return Err(SymbolError::MalformedChain {
                    reason: format!("ownership chain of {id} is cyclic at `{}`", declaration.name),
                });
            }
            current = declaration.containing;
            chain.push(declaration);
        }
        match chain.last() {
            Some(root) if root.is_module() => {}
            Some(root) => {
                return Err(SymbolError::MalformedChain {
                    reason: format!(
                        "ownership chain of {id} ends at {} `{}` instead of a module",
                        root.kind.label(),
                        root.name
                    ),
                });
            }
            None => return Err(SymbolError::UnknownDeclaration(id)),
        }
        chain.reverse();
        Ok(chain)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
