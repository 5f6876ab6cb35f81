//! Centralized limits and thresholds for symbol resolution.
//!
//! Symbol tables are read from disk and may be corrupt. Every walk over a
//! structure that is only acyclic by convention (ownership chains,
//! qualified-name parents, type-table references) is bounded by one of the
//! constants below, and exceeding the bound is reported as corrupt input
//! rather than overflowing the stack.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum number of ancestors walked when computing an ownership chain.
///
/// Real chains are a handful of levels deep (module, package, a few nested
/// classes and functions). A longer chain means the `containing` links form
/// a cycle.
pub const MAX_OWNERSHIP_DEPTH: usize = 256;

/// Maximum nesting depth when deserializing a single type.
///
/// Type-table entries reference other entries by index; a self-referencing
/// entry would otherwise recurse forever.
pub const MAX_TYPE_DEPTH: u32 = 128;

/// Maximum number of parent links followed when resolving a qualified name.
pub const MAX_QUALIFIED_NAME_DEPTH: usize = 256;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Expected number of members in a single name group.
///
/// Used to size inline buffers; groups larger than this spill to the heap.
pub const INLINE_GROUP_CAPACITY: usize = 4;
