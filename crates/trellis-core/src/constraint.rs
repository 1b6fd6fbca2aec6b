//! Per-box layout constraints.

use crate::types::{Alignment, Axis, Margins};

/// Layout constraints for a single box.
///
/// A `Constraint` is deliberately neither `Clone` nor `Copy`: containers take
/// it by value together with the box it describes, so one constraint can
/// never end up steering two boxes.
///
/// All pixel values are unscaled; containers apply their
/// [`Scale`](crate::Scale) before use.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Constraint {
    /// Placement within the cell, horizontally
    pub horizontal_alignment: Alignment,
    /// Placement within the cell, vertically
    pub vertical_alignment: Alignment,
    /// Space kept clear around the box
    pub margins: Margins,
    /// Width to use instead of the box's natural width
    pub width_hint: Option<i32>,
    /// Height to use instead of the box's natural height
    pub height_hint: Option<i32>,
    /// Minimum width, honored only when growing horizontally
    pub min_width: Option<i32>,
    /// Minimum height, honored only when growing vertically
    pub min_height: Option<i32>,
    /// Number of columns covered
    pub horizontal_span: usize,
    /// Number of rows covered
    pub vertical_span: usize,
    /// Take part in distributing extra horizontal space
    pub grow_horizontal: bool,
    /// Take part in distributing extra vertical space
    pub grow_vertical: bool,
    /// Leave the box out of layout entirely
    pub exclude: bool,
}

impl Default for Constraint {
    fn default() -> Self {
        Self {
            horizontal_alignment: Alignment::Begin,
            vertical_alignment: Alignment::Middle,
            margins: Margins::ZERO,
            width_hint: None,
            height_hint: None,
            min_width: None,
            min_height: None,
            horizontal_span: 1,
            vertical_span: 1,
            grow_horizontal: false,
            grow_vertical: false,
            exclude: false,
        }
    }
}

impl Constraint {
    /// Default constraints: begin/middle aligned, no margins, 1x1 span.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alignment along `axis`.
    pub fn alignment(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.horizontal_alignment,
            Axis::Vertical => self.vertical_alignment,
        }
    }

    /// Span along `axis`, never less than one.
    pub fn span(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.horizontal_span.max(1),
            Axis::Vertical => self.vertical_span.max(1),
        }
    }

    /// Whether the box takes part in growing along `axis`.
    pub fn grows(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.grow_horizontal,
            Axis::Vertical => self.grow_vertical,
        }
    }

    /// Explicit minimum along `axis`, if one is set *and* the box grows on
    /// that axis.
    pub fn explicit_minimum(&self, axis: Axis) -> Option<i32> {
        if !self.grows(axis) {
            return None;
        }
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    /// Set the horizontal alignment.
    pub fn with_horizontal_alignment(mut self, alignment: Alignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    /// Set the vertical alignment.
    pub fn with_vertical_alignment(mut self, alignment: Alignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Set both alignments.
    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Fill the cell on both axes.
    pub fn fill(self) -> Self {
        self.with_alignment(Alignment::Fill, Alignment::Fill)
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Override the natural width.
    pub fn with_width_hint(mut self, width: i32) -> Self {
        self.width_hint = Some(width);
        self
    }

    /// Override the natural height.
    pub fn with_height_hint(mut self, height: i32) -> Self {
        self.height_hint = Some(height);
        self
    }

    /// Set the minimum width used while growing horizontally.
    pub fn with_min_width(mut self, width: i32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Set the minimum height used while growing vertically.
    pub fn with_min_height(mut self, height: i32) -> Self {
        self.min_height = Some(height);
        self
    }

    /// Set the column and row spans.
    pub fn with_span(mut self, columns: usize, rows: usize) -> Self {
        self.horizontal_span = columns;
        self.vertical_span = rows;
        self
    }

    /// Set the grow flags.
    pub fn with_grow(mut self, horizontal: bool, vertical: bool) -> Self {
        self.grow_horizontal = horizontal;
        self.grow_vertical = vertical;
        self
    }

    /// Exclude the box from layout.
    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }
}
