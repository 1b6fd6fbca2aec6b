//! Core types for the trellis layout engine.
//!
//! This crate provides the vocabulary shared by every container in
//! `trellis-layout`:
//! - Geometry value types (sizes, rectangles, margins, alignment)
//! - Per-box [`Constraint`]s
//! - The [`LayoutBox`] contract boxes implement
//! - The injected pixel-density [`Scale`]
//! - Error types

pub mod constraint;
pub mod errors;
pub mod layout_box;
pub mod scale;
pub mod types;

pub use constraint::*;
pub use errors::*;
pub use layout_box::*;
pub use scale::*;
pub use types::*;
