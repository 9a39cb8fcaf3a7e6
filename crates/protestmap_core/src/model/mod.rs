//! Domain model for protest map data.
//!
//! # Responsibility
//! - Define the untyped row shape received from the upstream sheet.
//! - Define the canonical, validated point record shared by every view.
//!
//! # Invariants
//! - A `Point` always carries a non-empty `id` and finite coordinates.
//! - Points are immutable once produced by the normalizer.

pub mod point;
pub mod raw_row;
