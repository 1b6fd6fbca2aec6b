//! Fixed-column container.
//!
//! Children fill a fixed number of columns row by row. Each column is as
//! wide as its widest child and shares spare width out up to the children's
//! maxima. Each row is as tall as its tallest child; when the container is
//! too short, rows lower toward their largest child minimum, and spare
//! height is handed out according to a [`RowDistribution`].

use tracing::{debug, trace};
use trellis_core::{
    clamp_dimension, Axis, Constraint, LayoutBox, Margins, Rect, Scale, Size, SizeHint, SizeKind,
};

use crate::distribute::{distribute, spread};
use crate::item::{fit_into_cell, Item, Measure};
use crate::report::LayoutReport;
use crate::track::MAX_TRACKS;

/// What happens to height the rows do not need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowDistribution {
    /// Rows keep their natural height
    #[default]
    Natural,
    /// Split evenly, remainder on the first rows
    Even,
    /// All of it goes to the last row
    Last,
}

/// Column container configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnOptions {
    /// Number of columns; zero is read as one
    pub columns: usize,
    /// Gap between columns, unscaled
    pub horizontal_gap: i32,
    /// Gap between rows, unscaled
    pub vertical_gap: i32,
    /// Padding inside the container, unscaled
    pub padding: Margins,
    pub distribution: RowDistribution,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            columns: 1,
            horizontal_gap: 5,
            vertical_gap: 2,
            padding: Margins::ZERO,
            distribution: RowDistribution::Natural,
        }
    }
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_gaps(mut self, horizontal: i32, vertical: i32) -> Self {
        self.horizontal_gap = horizontal;
        self.vertical_gap = vertical;
        self
    }

    pub fn with_padding(mut self, padding: Margins) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_distribution(mut self, distribution: RowDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Column count actually used.
    pub fn column_count(&self) -> usize {
        self.columns.clamp(1, MAX_TRACKS)
    }
}

/// Boxes in a fixed number of columns.
#[derive(Debug)]
pub struct ColumnLayout<B = Box<dyn LayoutBox>> {
    options: ColumnOptions,
    scale: Scale,
    children: Vec<Item<B>>,
}

impl<B: LayoutBox> ColumnLayout<B> {
    pub fn new(options: ColumnOptions) -> Self {
        Self {
            options,
            scale: Scale::identity(),
            children: Vec::new(),
        }
    }

    /// An empty container with `columns` columns and default gaps.
    pub fn with_columns(columns: usize) -> Self {
        Self::new(ColumnOptions::new().with_columns(columns))
    }

    /// Use `scale` for every configured pixel value.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn options(&self) -> &ColumnOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ColumnOptions {
        &mut self.options
    }

    /// Append a child. Returns its index.
    pub fn push(&mut self, node: B, constraint: Constraint) -> usize {
        self.children.push(Item::new(node, constraint));
        self.children.len() - 1
    }

    /// Append a child, builder style.
    pub fn with_child(mut self, node: B, constraint: Constraint) -> Self {
        self.push(node, constraint);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&B> {
        self.children.get(index).map(|item| &item.node)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut B> {
        self.children.get_mut(index).map(|item| &mut item.node)
    }

    /// Widest child per column and tallest per row, plus gaps and padding.
    pub fn measure(&self, kind: SizeKind, _hint: SizeHint) -> LayoutReport {
        let columns = self.options.column_count();
        let padding = self.options.padding.scaled(&self.scale);
        let (horizontal_gap, vertical_gap) = self.gaps();

        let entries = self.measure_children(kind);
        let widths = per_column(&entries, columns, |m| m.outer(Axis::Horizontal));
        let heights = per_row(&entries, columns, |m| m.outer(Axis::Vertical));

        LayoutReport {
            size: Size::new(
                clamp_dimension(total(&widths, horizontal_gap).saturating_add(padding.total(Axis::Horizontal))),
                clamp_dimension(total(&heights, vertical_gap).saturating_add(padding.total(Axis::Vertical))),
            ),
            errors: Vec::new(),
        }
    }

    /// Size and position every child inside `bounds`.
    pub fn layout(&mut self, bounds: Rect) -> LayoutReport {
        let columns = self.options.column_count();
        let padding = self.options.padding.scaled(&self.scale);
        let (horizontal_gap, vertical_gap) = self.gaps();
        let inner = bounds.inset(&padding);

        let entries = self.measure_children(SizeKind::Natural);
        debug!(
            children = entries.len(),
            columns,
            width = bounds.width,
            height = bounds.height,
            "column layout"
        );

        let mut widths = per_column(&entries, columns, |m| m.outer(Axis::Horizontal));
        let extra = inner.width - total(&widths, horizontal_gap);
        if extra != 0 {
            let limits = if extra > 0 {
                per_column(&entries, columns, |m| m.outer_max(Axis::Horizontal))
            } else {
                per_column(&entries, columns, |m| m.outer_min(Axis::Horizontal))
            };
            let leftover = distribute(extra, &mut widths, &limits);
            if leftover != 0 {
                trace!(leftover, "column width left unplaced");
            }
        }

        let mut heights = per_row(&entries, columns, |m| m.outer(Axis::Vertical));
        let slack = inner.height - total(&heights, vertical_gap);
        if slack < 0 {
            // A row never drops below the largest minimum among its children.
            let floors: Vec<i32> = per_row(&entries, columns, |m| m.outer_min(Axis::Vertical))
                .into_iter()
                .zip(&heights)
                .map(|(floor, &height)| floor.min(height))
                .collect();
            let leftover = distribute(slack, &mut heights, &floors);
            if leftover != 0 {
                trace!(leftover, "rows overflow at their minimum");
            }
        } else if slack > 0 {
            match self.options.distribution {
                RowDistribution::Natural => {}
                RowDistribution::Even => spread(slack, &mut heights),
                RowDistribution::Last => {
                    if let Some(last) = heights.last_mut() {
                        *last = last.saturating_add(slack);
                    }
                }
            }
        }

        let column_starts = starts(&widths, inner.x, horizontal_gap);
        let row_starts = starts(&heights, inner.y, vertical_gap);

        let mut report = LayoutReport::new();
        for (slot, (index, measure)) in entries.iter().enumerate() {
            let (row, column) = (slot / columns, slot % columns);
            let cell = Rect::new(column_starts[column], row_starts[row], widths[column], heights[row]);
            let natural = Size::new(
                cell.width - measure.margins.total(Axis::Horizontal),
                (cell.height - measure.margins.total(Axis::Vertical)).min(measure.bounds.max.height),
            );
            let item = &mut self.children[*index];
            let rect = fit_into_cell(
                *index,
                &item.constraint,
                &measure.margins,
                natural,
                measure.bounds.max,
                cell,
                &mut report,
            );
            item.node.assign(rect);
        }

        report.size = Size::new(
            clamp_dimension(total(&widths, horizontal_gap).saturating_add(padding.total(Axis::Horizontal))),
            clamp_dimension(total(&heights, vertical_gap).saturating_add(padding.total(Axis::Vertical))),
        );
        report
    }

    fn gaps(&self) -> (i32, i32) {
        (
            self.scale.scale(self.options.horizontal_gap),
            self.scale.scale(self.options.vertical_gap),
        )
    }

    fn measure_children(&self, kind: SizeKind) -> Vec<(usize, Measure)> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_excluded())
            .map(|(index, item)| (index, item.measure(kind, &self.scale, SizeHint::NONE)))
            .collect()
    }
}

/// Largest `pick` per column. Every column is present, even an empty one.
fn per_column(entries: &[(usize, Measure)], columns: usize, pick: impl Fn(&Measure) -> i32) -> Vec<i32> {
    let mut sizes = vec![0; columns];
    for (slot, (_, measure)) in entries.iter().enumerate() {
        let size = &mut sizes[slot % columns];
        *size = (*size).max(pick(measure));
    }
    sizes
}

/// Largest `pick` per row.
fn per_row(entries: &[(usize, Measure)], columns: usize, pick: impl Fn(&Measure) -> i32) -> Vec<i32> {
    let mut sizes = vec![0; entries.len().div_ceil(columns)];
    for (slot, (_, measure)) in entries.iter().enumerate() {
        let size = &mut sizes[slot / columns];
        *size = (*size).max(pick(measure));
    }
    sizes
}

fn total(sizes: &[i32], gap: i32) -> i32 {
    let sum = sizes.iter().map(|&s| i64::from(s)).sum::<i64>()
        + i64::from(gap) * sizes.len().saturating_sub(1) as i64;
    sum.clamp(0, i64::from(trellis_core::MAX_SIZE)) as i32
}

fn starts(sizes: &[i32], origin: i32, gap: i32) -> Vec<i32> {
    let mut cursor = origin;
    sizes
        .iter()
        .map(|&size| {
            let start = cursor;
            cursor = cursor.saturating_add(size).saturating_add(gap);
            start
        })
        .collect()
}

impl<B: LayoutBox> LayoutBox for ColumnLayout<B> {
    fn natural_size(&self, hint: SizeHint) -> Size {
        self.measure(SizeKind::Natural, hint).size
    }

    fn minimum_size(&self) -> Size {
        self.measure(SizeKind::Minimum, SizeHint::NONE).size
    }

    fn maximum_size(&self) -> Size {
        self.measure(SizeKind::Maximum, SizeHint::NONE).size
    }

    fn assign(&mut self, rect: Rect) {
        let report = self.layout(rect);
        debug!(errors = report.errors.len(), "nested column layout assigned");
    }
}
