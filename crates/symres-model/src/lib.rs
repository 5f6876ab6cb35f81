//! Declaration model shared by the deserializer and the override synthesizer.
//!
//! - `Declaration` / `DeclKind`: a closed sum over every declaration kind
//! - `DeclarationStore`: concurrent identity-keyed storage (`DeclId`)
//! - `Type`: resolved types with type-parameter substitution
//! - `ScopeContext`: the immutable context a declaration is deserialized in
//! - `MemberScope`: the query contract every member scope implements
//! - `SymbolError`: the resolution error taxonomy

pub mod builtins;
pub mod context;
pub mod decl;
pub mod error;
pub mod ids;
pub mod render;
pub mod scope;
pub mod store;
pub mod types;

pub use context::{ScopeContext, TypeParameterScope};
pub use decl::{
    Accessor, Annotation, ClassData, ClassMembers, ConstructorData, DeclKind, DeclOrigin,
    Declaration, FunctionData, LazyMembers, LocalVariableData, MemberLoader, PackageFragmentData,
    PropertyData, TypeParameter, TypeParameterHolderData, ValueParameter,
};
pub use error::{ConflictReport, SymbolError, SymbolResult};
pub use ids::DeclId;
pub use render::render_declaration;
pub use scope::{DeclKindFilter, MemberScope};
pub use store::DeclarationStore;
pub use types::{Substitution, Type, TypeArgument, TypeConstructor, TypeParameterRef};

// Record-level vocabulary shared with the metadata layer.
pub use symres_metadata::{ClassId, ClassKind, Modality, Name, Variance, Visibility};
