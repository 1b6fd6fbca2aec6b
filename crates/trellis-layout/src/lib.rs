//! Containers for the trellis layout engine.
//!
//! This crate sizes and positions boxes implementing
//! [`LayoutBox`](trellis_core::LayoutBox) according to their
//! [`Constraint`](trellis_core::Constraint)s.
//!
//! # Architecture
//!
//! 1. **Distribution**: [`distribute`] hands extra (or missing) space out over
//!    a set of sizes, smallest first, without crossing any ceiling or floor
//! 2. **Linear**: rows and columns built on distribution along one axis
//! 3. **Columns**: a fixed number of columns filled row by row, with a
//!    choice of what happens to spare height
//! 4. **Grid**: explicit cell placement with spans, grow flags and fill
//! 5. **Flow grid**: automatic placement into a fixed number of columns,
//!    with re-measurement of content that wraps
//!
//! Problems found during a pass never abort it. They are collected in the
//! returned [`LayoutReport`] and logged through `tracing`.
//!
//! # Example
//!
//! ```ignore
//! use trellis_core::{Constraint, Rect};
//! use trellis_layout::FlowGrid;
//!
//! let mut grid = FlowGrid::with_columns(2);
//! grid.push(Box::new(label), Constraint::new().fill());
//! grid.push(Box::new(field), Constraint::new().with_grow(true, false));
//!
//! let report = grid.layout(Rect::new(0, 0, 400, 300));
//! assert!(report.is_clean());
//! ```

mod columns;
mod distribute;
mod flow;
mod grid;
mod item;
mod linear;
mod report;
mod track;

#[cfg(test)]
mod testing;

pub use columns::{ColumnLayout, ColumnOptions, RowDistribution};
pub use distribute::{distribute, force_grow, spread};
pub use flow::{auto_place, AutoPlacement, FlowGrid, FlowOptions, Placement};
pub use grid::{Grid, GridOptions, GridPlacement};
pub use linear::{Linear, LinearOptions};
pub use report::LayoutReport;
pub use track::{Track, TrackSizes, Tracks, MAX_TRACKS};
