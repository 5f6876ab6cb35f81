//! Reader-level failures.

use crate::names::Name;
use thiserror::Error;

/// A failure while reading or decoding symbol-table data.
///
/// Lookup misses (`MissingString`, `MissingQualifiedName`, `MissingType`)
/// are reported separately from structural corruption so callers can tell
/// an unresolved reference from a broken table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("string #{0} is not in the string table")]
    MissingString(u32),
    #[error("qualified name #{0} is not in the qualified-name table")]
    MissingQualifiedName(u32),
    #[error("type #{0} is not in the active type table")]
    MissingType(u32),
    #[error("qualified name #{0} does not name a class")]
    NotAClassName(u32),
    #[error("package fragment `{0}` is not part of this symbol table")]
    UnknownFragment(Name),
    #[error("record #{index} does not exist in package fragment `{fragment}`")]
    UnknownRecord { fragment: Name, index: u32 },
    #[error("class #{index} does not exist in package fragment `{fragment}`")]
    UnknownClass { fragment: Name, index: u32 },
    #[error("{table} table is corrupt: {detail}")]
    Corrupt { table: &'static str, detail: String },
    #[error("cannot decode symbol table dump: {0}")]
    Decode(String),
}

impl MetadataError {
    pub fn corrupt(table: &'static str, detail: impl Into<String>) -> Self {
        Self::Corrupt {
            table,
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
