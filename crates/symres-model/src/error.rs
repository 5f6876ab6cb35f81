//! Resolution errors.

use crate::ids::DeclId;
use symres_common::diagnostics::{Diagnostic, diagnostic_codes};
use symres_metadata::{MetadataError, Name};
use thiserror::Error;

pub type SymbolResult<T> = Result<T, SymbolError>;

/// One override conflict, rendered for reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictReport {
    pub first: DeclId,
    pub second: DeclId,
    /// Human-readable signatures of `first` and `second`.
    pub first_signature: String,
    pub second_signature: String,
    /// True when `first` is a declared member clashing with an inherited one,
    /// false when both come from supertypes.
    pub declared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("malformed enclosing chain: {reason}")]
    MalformedChain { reason: String },

    #[error("unresolved type reference #{index} in `{symbol}` ({scope})")]
    UnresolvedTypeReference {
        index: u32,
        symbol: String,
        scope: String,
    },

    #[error("unresolved name reference #{index} in `{symbol}` ({scope})")]
    UnresolvedNameReference {
        index: u32,
        symbol: String,
        scope: String,
    },

    #[error("{count} classifiers named `{name}` are visible")]
    AmbiguousLookup { name: Name, count: usize },

    #[error("class `{class}` has {} unresolved override conflict(s)", conflicts.len())]
    OverrideConflict {
        class: String,
        conflicts: Vec<ConflictReport>,
    },

    #[error("corrupt symbol table: {0}")]
    CorruptTable(MetadataError),

    #[error("declaration {0} is not registered")]
    UnknownDeclaration(DeclId),
}

impl SymbolError {
    /// Fills in the symbol name and scope path of an unresolved reference
    /// that does not carry them yet. Other errors are returned unchanged.
    #[must_use]
    pub fn at(self, at_symbol: &str, at_scope: &str) -> Self {
        match self {
            Self::UnresolvedTypeReference {
                index,
                symbol,
                scope,
            } => Self::UnresolvedTypeReference {
                index,
                symbol: if symbol.is_empty() { at_symbol.to_owned() } else { symbol },
                scope: if scope.is_empty() { at_scope.to_owned() } else { scope },
            },
            Self::UnresolvedNameReference {
                index,
                symbol,
                scope,
            } => Self::UnresolvedNameReference {
                index,
                symbol: if symbol.is_empty() { at_symbol.to_owned() } else { symbol },
                scope: if scope.is_empty() { at_scope.to_owned() } else { scope },
            },
            other => other,
        }
    }

    pub const fn code(&self) -> u32 {
        match self {
            Self::MalformedChain { .. } => diagnostic_codes::MALFORMED_CHAIN,
            Self::UnresolvedTypeReference { .. } => diagnostic_codes::UNRESOLVED_TYPE_REFERENCE,
            Self::UnresolvedNameReference { .. } => diagnostic_codes::UNRESOLVED_NAME_REFERENCE,
            Self::AmbiguousLookup { .. } => diagnostic_codes::AMBIGUOUS_LOOKUP,
            Self::OverrideConflict { .. } => diagnostic_codes::OVERRIDE_CONFLICT,
            Self::CorruptTable(_) => diagnostic_codes::CORRUPT_TABLE,
            Self::UnknownDeclaration(_) => diagnostic_codes::UNKNOWN_DECLARATION,
        }
    }

    /// Converts the error into diagnostics attributed to `file`.
    ///
    /// An override conflict yields one diagnostic per conflicting pair.
    pub fn to_diagnostics(&self, file: &str) -> Vec<Diagnostic> {
        match self {
            Self::MalformedChain { reason } => {
                vec![Diagnostic::from_code(file, self.code(), &[reason])]
            }
            Self::UnresolvedTypeReference {
                index,
                symbol,
                scope,
            }
            | Self::UnresolvedNameReference {
                index,
                symbol,
                scope,
            } => {
                let index = index.to_string();
                vec![Diagnostic::from_code(file, self.code(), &[&index, symbol, scope])]
            }
            Self::AmbiguousLookup { name, .. } => {
                vec![Diagnostic::from_code(file, self.code(), &[name])]
            }
            Self::OverrideConflict { class, conflicts } => conflicts
                .iter()
                .map(|conflict| {
                    if conflict.declared {
                        Diagnostic::from_code(
                            file,
                            diagnostic_codes::INCOMPATIBLE_OVERRIDE,
                            &[&conflict.first_signature, class, &conflict.second_signature],
                        )
                    } else {
                        Diagnostic::from_code(
                            file,
                            diagnostic_codes::OVERRIDE_CONFLICT,
                            &[class, &conflict.first_signature, &conflict.second_signature],
                        )
                    }
                })
                .collect(),
            Self::CorruptTable(error) => {
                let detail = error.to_string();
                vec![Diagnostic::from_code(file, self.code(), &[&detail])]
            }
            Self::UnknownDeclaration(id) => {
                let id = id.0.to_string();
                vec![Diagnostic::from_code(file, self.code(), &[&id])]
            }
        }
    }
}

impl From<MetadataError> for SymbolError {
    fn from(error: MetadataError) -> Self {
        match error {
            MetadataError::MissingString(index) | MetadataError::MissingQualifiedName(index) => {
                Self::UnresolvedNameReference {
                    index,
                    symbol: String::new(),
                    scope: String::new(),
                }
            }
            MetadataError::MissingType(index) => Self::UnresolvedTypeReference {
                index,
                symbol: String::new(),
                scope: String::new(),
            },
            other => Self::CorruptTable(other),
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
