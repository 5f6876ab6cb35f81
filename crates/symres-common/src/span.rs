//! Source spans for synthesized nodes.
//!
//! Nodes built while lowering carry a `(start, end)` offset pair taken from
//! the element they replace. Deserialized declarations have no source, so
//! most spans in this workspace are `Span::UNDEFINED`.

use serde::Serialize;

/// A half-open byte range `[start, end)` in a source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Offset used when a node has no source position.
    pub const UNDEFINED_OFFSET: u32 = u32::MAX;

    /// Span of a node with no source position.
    pub const UNDEFINED: Self = Self {
        start: Self::UNDEFINED_OFFSET,
        end: Self::UNDEFINED_OFFSET,
    };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn is_undefined(self) -> bool {
        self.start == Self::UNDEFINED_OFFSET
    }

    /// Length of the span, zero for undefined spans.
    #[inline]
    pub const fn len(self) -> u32 {
        if self.is_undefined() {
            0
        } else {
            self.end.saturating_sub(self.start)
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::UNDEFINED
    }
}
