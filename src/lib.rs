//! symres: deserialization of local declarations and synthesis of the
//! effective member set of classes.
//!
//! The workspace is split into crates that build on one another:
//!
//! - [`metadata`]: the serialized symbol-table records and the reader seam
//! - [`model`]: declarations, types, the declaration store and errors
//! - [`deserializer`]: rebuilding scope contexts and materializing records
//! - [`overrides`]: override synthesis and cached effective members
//! - [`ir`]: IR nodes, declaration-scoped builders and constructor analysis
//!
//! This crate re-exports them under one roof.

// Diagnostics, spans and limits shared by every crate
pub use symres_common as common;
pub use symres_common::diagnostics::Diagnostic;

pub use symres_metadata as metadata;
pub use symres_metadata::{MemorySymbolTable, RecordRef, SymbolTableReader};

pub use symres_model as model;
pub use symres_model::{DeclId, DeclKind, Declaration, DeclarationStore, SymbolError, Type};

pub use symres_deserializer as deserializer;
pub use symres_deserializer::{
    LocalDeclarationDeserializer, find_member_path, load_all, resolve_local,
};

pub use symres_overrides as overrides;
pub use symres_overrides::{EffectiveMembers, SynthesisOptions, synthesize_overrides};

pub use symres_ir as ir;
pub use symres_ir::{DeclarationBuilders, IrBuilder, NodeFactory, calls_super};
