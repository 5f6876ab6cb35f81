//! Common types and utilities for the symres workspace.
//!
//! This crate provides foundational types used across all symres crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Source spans (`Span`) for synthesized IR nodes
//! - Resolution limits and thresholds

// Diagnostic types and message lookup
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;
