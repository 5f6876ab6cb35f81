//! Scoped builder acquisition.
//!
//! Lowering walks declarations recursively; nodes created while inside a
//! declaration must come from that declaration's builder, and leaving the
//! declaration must bring back the enclosing one even when the walk unwinds.

use crate::error::IrError;
use crate::factory::IrBuilder;
use std::cell::Cell;
use symres_model::DeclId;
use tracing::trace;

#[derive(Debug, Default)]
pub struct DeclarationBuilders {
    current: Cell<Option<IrBuilder>>,
}

impl DeclarationBuilders {
    pub fn new() -> Self {
        Self::default()
    }

    /// The builder of the innermost declaration being lowered.
    pub fn current(&self) -> Option<IrBuilder> {
        self.current.get()
    }

    /// Like `current`, but outside any declaration is an error.
    pub fn builder(&self) -> Result<IrBuilder, IrError> {
        self.current().ok_or(IrError::NoActiveBuilder)
    }

    /// Runs `f` with a fresh builder for `owner` installed as the current
    /// one. The previous builder is restored when `f` returns or unwinds.
    pub fn with_builder<T>(&self, owner: DeclId, f: impl FnOnce(&Self) -> T) -> T {
        let previous = self.current.replace(Some(IrBuilder::new(owner)));
        trace!(owner = %owner, "enter declaration builder");
        let _restore = Restore {
            slot: &self.current,
            previous,
        };
        f(self)
    }
}

struct Restore<'a> {
    slot: &'a Cell<Option<IrBuilder>>,
    previous: Option<IrBuilder>,
}

impl Drop for Restore<'_> {
    fn drop(&mut self) {
        self.slot.set(self.previous);
    }
}

#[cfg(test)]
#[path = "tests/builders_tests.rs"]
mod tests;
