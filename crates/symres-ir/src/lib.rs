//! Synthetic IR for lowering passes.
//!
//! `Node` is a small expression/statement tree carrying a source span and a
//! resolved type. Passes never build nodes by hand: they ask a
//! `NodeFactory` (implemented by `IrBuilder`) positioned at the element
//! being replaced. `DeclarationBuilders` hands out one builder per
//! declaration being lowered and restores the previous one afterwards.

pub mod builders;
pub mod constructor;
pub mod error;
pub mod factory;
pub mod node;

pub use builders::DeclarationBuilders;
pub use constructor::calls_super;
pub use error::IrError;
pub use factory::{IrBuilder, NodeFactory};
pub use node::{AccessorKind, Catch, Constant, Node, NodeKind, PrimitiveOp, TypeOperator, Walk};
