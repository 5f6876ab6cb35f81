//! The context tower.
//!
//! A local declaration is deserialized in the context of its immediate
//! parent, and that context is the result of stacking one layer per
//! enclosing declaration on top of the package fragment's root context.
//! Only classes and package fragments own a type table; every other layer
//! inherits the table of the nearest one that does.

use std::sync::Arc;
use symres_model::{DeclKind, Declaration, ScopeContext, SymbolError};
use tracing::trace;

pub struct ContextTower {
    chain: Vec<Arc<Declaration>>,
    context: ScopeContext,
}

impl ContextTower {
    /// Builds the context for declarations whose immediate parent is the
    /// last element of `chain`.
    ///
    /// `chain` runs from the module down to the parent: a module, a package
    /// fragment, then zero or more declarations each contained in its
    /// predecessor.
    #[tracing::instrument(level = "debug", skip_all, fields(depth = chain.len()))]
    pub fn build(chain: &[Arc<Declaration>]) -> Result<Self, SymbolError> {
        let Some(module) = chain.first() else {
            return Err(malformed("the enclosing chain is empty".to_string()));
        };
        if !module.is_module() {
            return Err(malformed(format!(
                "chain starts at {} `{}` instead of a module",
                module.kind.label(),
                module.name
            )));
        }
        let Some(fragment) = chain.get(1) else {
            return Err(malformed(format!(
                "module `{}` is not followed by a package fragment",
                module.name
            )));
        };
        let DeclKind::PackageFragment(package) = &fragment.kind else {
            return Err(malformed(format!(
                "expected a package fragment after module `{}`, found {} `{}`",
                module.name,
                fragment.kind.label(),
                fragment.name
            )));
        };

        for pair in chain.windows(2) {
            let (outer, inner) = (&pair[0], &pair[1]);
            if inner.containing != Some(outer.id) {
                return Err(malformed(format!(
                    "`{}` is not contained in `{}`",
                    inner.name, outer.name
                )));
            }
        }

        let mut context = ScopeContext::package(
            fragment.id,
            Arc::clone(&package.name_resolver),
            Arc::clone(&package.type_table),
        );
        for declaration in &chain[2..] {
            let type_table = match &declaration.kind {
                DeclKind::Class(class) => Some(Arc::clone(&class.type_table)),
                DeclKind::Function(_)
                | DeclKind::Constructor(_)
                | DeclKind::Property(_)
                | DeclKind::LocalVariable(_)
                | DeclKind::TypeParameterHolder(_) => None,
                DeclKind::Module | DeclKind::PackageFragment(_) => {
                    return Err(malformed(format!(
                        "{} `{}` cannot enclose a local declaration",
                        declaration.kind.label(),
                        declaration.name
                    )));
                }
            };
            trace!(
                decl = %declaration.id,
                name = %declaration.name,
                kind = declaration.kind.label(),
                replaces_type_table = type_table.is_some(),
                "push context layer"
            );
            context = context.child(declaration.id, declaration.type_parameters(), type_table);
        }

        Ok(Self {
            chain: chain.to_vec(),
            context,
        })
    }

    pub fn context(&self) -> &ScopeContext {
        &self.context
    }

    /// The declaration the tower was built for: the immediate parent.
    pub fn parent(&self) -> &Arc<Declaration> {
        // `build` guarantees at least a module and a fragment.
        &self.chain[self.chain.len() - 1]
    }

    pub fn chain(&self) -> &[Arc<Declaration>] {
        &self.chain
    }

    /// Dotted scope path below the module, e.g. `pkg.A.foo`.
    pub fn path(&self) -> String {
        self.chain[1..]
            .iter()
            .map(|declaration| declaration.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn malformed(reason: String) -> SymbolError {
    SymbolError::MalformedChain { reason }
}

#[cfg(test)]
#[path = "tests/tower_tests.rs"]
mod tests;
