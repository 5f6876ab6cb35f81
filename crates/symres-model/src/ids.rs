//! Declaration identities.

use std::fmt;

/// Stable identity of a declaration inside one `DeclarationStore`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

impl DeclId {
    /// Sentinel value for invalid `DeclId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DeclId`.
    pub const FIRST_VALID: u32 = 1;

    /// Check if this `DeclId` is valid.
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
