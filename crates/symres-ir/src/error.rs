use symres_model::{Name, SymbolError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("property `{property}` has no {accessor}")]
    MissingAccessor {
        property: Name,
        accessor: &'static str,
    },

    #[error("expected {expected}, found {found} `{name}`")]
    UnexpectedDeclaration {
        name: Name,
        expected: &'static str,
        found: &'static str,
    },

    #[error("constructor of `{class}` has no delegating constructor call")]
    NoDelegatingCall { class: String },

    #[error("constructor of `{class}` has more than one delegating constructor call")]
    MultipleDelegatingCalls { class: String },

    #[error(
        "constructor of `{class}` delegates to `{target}`; expected `{class}` or its superclass `{superclass}`"
    )]
    UnrelatedDelegatingCall {
        class: String,
        target: String,
        superclass: String,
    },

    #[error("no declaration builder is active")]
    NoActiveBuilder,

    #[error(transparent)]
    Symbol(#[from] SymbolError),
}
