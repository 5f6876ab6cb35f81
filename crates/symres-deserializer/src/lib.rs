//! Deserialization of declarations that have no top-level symbol-table entry.
//!
//! Local classes, functions, constructors and properties are stored as
//! standalone records. Their type and name references only make sense in the
//! scope they were declared in, so resolving one means first rebuilding that
//! scope:
//!
//! 1. `ContextTower::build` walks the enclosing chain (module, package
//!    fragment, then every enclosing declaration) into a `ScopeContext`.
//! 2. `MemberMaterializer` turns one record into a `Declaration` in that
//!    context.
//!
//! `LocalDeclarationDeserializer` ties both together; `resolve_local` is the
//! one-call entry point. The `package` module loads the module, package
//! fragment and top-level class declarations the chains start from.

pub mod local;
pub mod materializer;
pub mod members;
pub mod package;
pub mod tower;
pub mod type_deserializer;

pub use local::{LocalDeclarationDeserializer, resolve_local};
pub use materializer::MemberMaterializer;
pub use members::load_class_members;
pub use package::{
    LoadedFragment, LoadedModule, find_member_path, load_all, load_module, load_package_fragment,
    load_top_level_classes,
};
pub use tower::ContextTower;
pub use type_deserializer::TypeDeserializer;
