//! Error types for the trellis engine.
//!
//! None of these abort a layout pass. Containers collect them into a
//! report, skip or clamp whatever caused them, and keep going.

use thiserror::Error;

use crate::types::Axis;

/// Configuration problems found while laying out a container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("item {item} claims row {row}, column {column} already occupied by item {occupant}")]
    CellOccupied {
        item: usize,
        occupant: usize,
        row: usize,
        column: usize,
    },

    #[error("item {item} placed at negative row {row}, column {column}; using zero")]
    NegativeIndex { item: usize, row: i32, column: i32 },

    #[error("negative column count {columns}; treating as zero")]
    NegativeColumns { columns: i32 },

    #[error("column count {columns} exceeds the limit of {limit}")]
    TooManyColumns { columns: i32, limit: usize },

    #[error("item {item} reaches past track {limit}; clamping its placement")]
    TrackLimit { item: usize, limit: usize },

    #[error("margins of item {item} exceed its {axis} space by {deficit}px")]
    NegativeSpace { item: usize, axis: Axis, deficit: i32 },
}
