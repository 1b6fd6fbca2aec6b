//! Grid layout with automatic placement.
//!
//! Children are poured into a fixed number of columns, left to right and top
//! to bottom, skipping cells already covered by an earlier span. Column
//! widths are settled first; boxes whose width changed are then measured
//! again at their new width so rows can grow for wrapped content.

use std::ops::Range;

use tracing::{debug, trace};
use trellis_core::{
    clamp_dimension, Alignment, Axis, Constraint, LayoutBox, LayoutError, Margins, Rect, Scale,
    Size, SizeBounds, SizeHint, SizeKind, MAX_SIZE,
};

use crate::item::{fit_into_cell, outer, Cell, Item};
use crate::report::LayoutReport;
use crate::track::{Occupant, TrackSizes, Tracks, MAX_TRACKS};

/// Flow-grid configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowOptions {
    /// Number of columns; negative counts are reported and read as zero
    pub columns: i32,
    /// Give every column the same width
    pub equal_columns: bool,
    /// Padding around the grid, unscaled
    pub padding: Margins,
    /// Gap between columns, unscaled
    pub horizontal_spacing: i32,
    /// Gap between rows, unscaled
    pub vertical_spacing: i32,
    /// Placement of the whole grid when narrower than the space given
    pub horizontal_alignment: Alignment,
    /// Placement of the whole grid when shorter than the space given
    pub vertical_alignment: Alignment,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            columns: 1,
            equal_columns: false,
            padding: Margins::uniform(4),
            horizontal_spacing: 4,
            vertical_spacing: 2,
            horizontal_alignment: Alignment::Begin,
            vertical_alignment: Alignment::Begin,
        }
    }
}

impl FlowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column count.
    pub fn with_columns(mut self, columns: i32) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_equal_columns(mut self, equal: bool) -> Self {
        self.equal_columns = equal;
        self
    }

    pub fn with_padding(mut self, padding: Margins) -> Self {
        self.padding = padding;
        self
    }

    /// Set the gaps between columns and rows.
    pub fn with_spacing(mut self, horizontal: i32, vertical: i32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    /// Set the placement of the whole grid.
    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    fn spacing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.horizontal_spacing,
            Axis::Vertical => self.vertical_spacing,
        }
    }

    fn alignment(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.horizontal_alignment,
            Axis::Vertical => self.vertical_alignment,
        }
    }
}

/// Top-left cell of an auto-placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
}

/// Outcome of [`auto_place`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoPlacement {
    /// One placement per span, in order
    pub cells: Vec<Placement>,
    /// Rows needed to hold every item
    pub rows: usize,
}

/// Place items with the given `(columns, rows)` spans into a grid
/// `columns` wide.
///
/// A cursor moves left to right and top to bottom. Cells covered by an
/// earlier item are skipped, and an item that does not fit in what is left
/// of the current row wraps to the next one. Column spans wider than the
/// grid are narrowed to fit, row spans and the column count are held to
/// [`MAX_TRACKS`]. With zero columns nothing is placed.
pub fn auto_place(spans: &[(usize, usize)], columns: usize) -> AutoPlacement {
    let mut placement = AutoPlacement::default();
    let columns = columns.min(MAX_TRACKS);
    if columns == 0 {
        return placement;
    }

    let mut occupied: Vec<Vec<bool>> = Vec::new();
    let mut row: usize = 0;
    let mut column = 0;
    for &(column_span, row_span) in spans {
        let width = column_span.clamp(1, columns);
        let height = row_span.clamp(1, MAX_TRACKS);
        loop {
            let end = row.saturating_add(height);
            if occupied.len() < end {
                occupied.resize_with(end, || vec![false; columns]);
            }
            let rows = row..end;
            while column < columns && blocked(&occupied, rows.clone(), column) {
                column += 1;
            }
            if column + width <= columns {
                match (column..column + width).find(|&c| blocked(&occupied, rows.clone(), c)) {
                    None => break,
                    Some(taken) => {
                        column = taken + 1;
                        continue;
                    }
                }
            }
            column = 0;
            row += 1;
        }

        let end = row.saturating_add(height);
        for cells in &mut occupied[row..end] {
            for cell in &mut cells[column..column + width] {
                *cell = true;
            }
        }
        placement.cells.push(Placement { row, column });
        placement.rows = placement.rows.max(end);
        column += width;
    }
    placement
}

fn blocked(occupied: &[Vec<bool>], rows: Range<usize>, column: usize) -> bool {
    occupied[rows].iter().any(|cells| cells[column])
}

/// An item's cached measurements for one pass. Sizes exclude margins.
#[derive(Debug, Clone, Copy)]
struct Cached {
    cell: Cell,
    size: Size,
    min_width: i32,
    margins: Margins,
}

struct Solved {
    cells: Vec<Cached>,
    columns: Tracks,
    rows: Tracks,
}

/// A grid that places its children automatically.
///
/// Unlike [`Grid`](crate::Grid), a child can never collide with another:
/// it is simply moved on to the next open cell.
#[derive(Debug)]
pub struct FlowGrid<B = Box<dyn LayoutBox>> {
    options: FlowOptions,
    scale: Scale,
    children: Vec<Item<B>>,
}

impl<B: LayoutBox> FlowGrid<B> {
    pub fn new(options: FlowOptions) -> Self {
        Self {
            options,
            scale: Scale::identity(),
            children: Vec::new(),
        }
    }

    /// A flow grid with `columns` columns and default spacing.
    pub fn with_columns(columns: i32) -> Self {
        Self::new(FlowOptions::new().with_columns(columns))
    }

    /// Use `scale` for every configured pixel value.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn options(&self) -> &FlowOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut FlowOptions {
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

    /// Where each child that is not excluded ends up, in insertion order.
    pub fn placement(&self) -> AutoPlacement {
        let mut report = LayoutReport::new();
        let columns = self.column_count(&mut report);
        let spans: Vec<(usize, usize)> = self.participants().map(|(_, item)| spans_of(item)).collect();
        auto_place(&spans, columns)
    }

    /// Column widths and row heights for a grid of `available` outer size.
    pub fn tracks(&self, available: SizeHint) -> TrackSizes {
        let mut report = LayoutReport::new();
        let solved = self.solve(SizeKind::Natural, self.inner_hint(available), &mut report);
        TrackSizes {
            columns: solved.columns.sizes(),
            rows: solved.rows.sizes(),
        }
    }

    /// Size of the grid without positioning anything. At a width hint the
    /// height accounts for content that wraps at that width.
    pub fn measure(&self, kind: SizeKind, hint: SizeHint) -> LayoutReport {
        let mut report = LayoutReport::new();
        if kind == SizeKind::Maximum {
            report.size = Size::MAX;
            return report;
        }
        let solved = self.solve(kind, self.inner_hint(hint), &mut report);
        report.size = self.outer_size(&solved);
        report
    }

    /// Size and position every child inside `bounds`.
    pub fn layout(&mut self, bounds: Rect) -> LayoutReport {
        let padding = self.options.padding.scaled(&self.scale);
        let inner = bounds.inset(&padding);
        let mut report = LayoutReport::new();
        let solved = self.solve(
            SizeKind::Natural,
            SizeHint::new(Some(inner.width), Some(inner.height)),
            &mut report,
        );
        let size = self.outer_size(&solved);
        debug!(
            items = solved.cells.len(),
            columns = solved.columns.len(),
            rows = solved.rows.len(),
            width = bounds.width,
            height = bounds.height,
            "flow grid layout"
        );

        // A grid smaller than its bounds is shifted by the grid alignment.
        let mut origin = [0; 2];
        for (slot, axis) in Axis::BOTH.into_iter().enumerate() {
            let used = size.get(axis);
            let (offset, _) = self.options.alignment(axis).place(bounds.length(axis), used, used);
            let (begin, _) = padding.along(axis);
            origin[slot] = bounds.start(axis) + offset + begin;
        }

        let column_starts = solved.columns.starts(origin[0]);
        let row_starts = solved.rows.starts(origin[1]);
        for cached in &solved.cells {
            let area = cached
                .cell
                .rect(&solved.columns, &column_starts, &solved.rows, &row_starts);
            let item = &mut self.children[cached.cell.index];
            let rect = fit_into_cell(
                cached.cell.index,
                &item.constraint,
                &cached.margins,
                cached.size,
                Size::MAX,
                area,
                &mut report,
            );
            item.node.assign(rect);
        }

        report.size = size;
        report
    }

    fn participants(&self) -> impl Iterator<Item = (usize, &Item<B>)> {
        self.children.iter().enumerate().filter(|(_, item)| !item.is_excluded())
    }

    fn column_count(&self, report: &mut LayoutReport) -> usize {
        let columns = self.options.columns;
        if columns < 0 {
            report.push(LayoutError::NegativeColumns { columns });
            return 0;
        }
        if columns as usize > MAX_TRACKS {
            report.push(LayoutError::TooManyColumns { columns, limit: MAX_TRACKS });
            return MAX_TRACKS;
        }
        columns as usize
    }

    fn inner_hint(&self, hint: SizeHint) -> SizeHint {
        let padding = self.options.padding.scaled(&self.scale);
        SizeHint::new(
            hint.width.map(|w| w - padding.horizontal()),
            hint.height.map(|h| h - padding.vertical()),
        )
    }

    fn outer_size(&self, solved: &Solved) -> Size {
        let padding = self.options.padding.scaled(&self.scale);
        Size::new(solved.columns.total(), solved.rows.total())
            .expand(&padding)
            .clamped()
    }

    fn solve(&self, kind: SizeKind, available: SizeHint, report: &mut LayoutReport) -> Solved {
        let column_count = self.column_count(report);
        let participants: Vec<(usize, &Item<B>)> = self.participants().collect();
        let spans: Vec<(usize, usize)> = participants.iter().map(|(_, item)| spans_of(item)).collect();
        for &(index, item) in &participants {
            if item.constraint.span(Axis::Vertical) > MAX_TRACKS {
                report.push(LayoutError::TrackLimit { item: index, limit: MAX_TRACKS });
            }
        }
        let placement = auto_place(&spans, column_count);

        let mut cells: Vec<Cached> = participants
            .iter()
            .zip(&placement.cells)
            .map(|(&(index, item), place)| {
                let (columns, rows) = spans_of(item);
                let (size, min_width) = self.measure_item(item, kind, None);
                Cached {
                    cell: Cell {
                        index,
                        row: place.row,
                        column: place.column,
                        rows,
                        columns: columns.clamp(1, column_count.max(1)),
                    },
                    size,
                    min_width,
                    margins: item.margins(&self.scale),
                }
            })
            .collect();

        let columns = self.size_tracks(Axis::Horizontal, column_count, &cells, available.width);
        if available.width.is_some() {
            self.rewrap(kind, &columns, &mut cells);
        }
        let rows = self.size_tracks(Axis::Vertical, placement.rows, &cells, available.height);
        Solved { cells, columns, rows }
    }

    /// Measure one item, optionally at a forced width. Returns the size and
    /// the smallest width it may be given.
    fn measure_item(&self, item: &Item<B>, kind: SizeKind, width: Option<i32>) -> (Size, i32) {
        let bounds = SizeBounds::of(&item.node);
        let own = item.hint(&self.scale);
        let min_width = self.scale.scale_opt(item.constraint.min_width).map(clamp_dimension);
        let min_height = self.scale.scale_opt(item.constraint.min_height).map(clamp_dimension);
        let smallest_width = min_width.unwrap_or(bounds.min.width);

        let width = width.map(|w| w.max(smallest_width).min(bounds.max.width));
        let mut size = kind.measure(&item.node, SizeHint::new(width.or(own.width), own.height));
        if let Some(hint) = own.width {
            size.width = hint;
        }
        if let Some(min) = min_width {
            size.width = size.width.max(min);
        }
        if let Some(hint) = own.height {
            size.height = hint;
        }
        if let Some(min) = min_height {
            size.height = size.height.max(min);
        }
        if let Some(width) = width {
            size.width = width;
        }
        (size.clamped(), smallest_width)
    }

    /// Measure again every item whose column width no longer matches the
    /// width it was measured at, so its height can follow.
    fn rewrap(&self, kind: SizeKind, columns: &Tracks, cells: &mut [Cached]) {
        for cached in cells.iter_mut() {
            let item = &self.children[cached.cell.index];
            if item.constraint.height_hint.is_some() {
                continue;
            }
            let current =
                columns.span_size(cached.cell.range(Axis::Horizontal)) - cached.margins.horizontal();
            let fill = item.constraint.horizontal_alignment.is_fill();
            if (fill && current != cached.size.width) || cached.size.width > current {
                let (mut size, _) = self.measure_item(item, kind, Some(cached.min_width.max(current)));
                if let Some(min) = item.explicit_minimum(Axis::Vertical, &self.scale) {
                    size.height = size.height.max(min);
                }
                trace!(
                    item = cached.cell.index,
                    from = cached.size.width,
                    to = size.width,
                    height = size.height,
                    "rewrapped"
                );
                cached.size = size;
            }
        }
    }

    fn size_tracks(
        &self,
        axis: Axis,
        count: usize,
        cells: &[Cached],
        available: Option<i32>,
    ) -> Tracks {
        let occupants: Vec<Occupant> = cells
            .iter()
            .map(|cached| {
                let item = &self.children[cached.cell.index];
                let size = outer(cached.size.get(axis), &cached.margins, axis);
                // Only a growing item with an explicit minimum may be
                // squeezed below its preferred size.
                let min = item
                    .explicit_minimum(axis, &self.scale)
                    .map_or(size, |m| outer(m, &cached.margins, axis));
                Occupant {
                    start: cached.cell.start(axis),
                    span: cached.cell.span(axis),
                    size,
                    min,
                    max: MAX_SIZE,
                    grows: item.constraint.grows(axis),
                }
            })
            .collect();

        let gap = self.scale.scale(self.options.spacing(axis));
        let mut tracks = Tracks::seed(count, gap, &occupants);
        if axis == Axis::Horizontal && self.options.equal_columns {
            tracks.unify(available);
        } else if let Some(available) = available {
            relax(&mut tracks, &occupants, available, axis);
        }
        tracks
    }
}

/// Fit the tracks to `available`, then restore any span that fitting
/// squeezed below its minimum, until nothing moves.
///
/// Returns the pass on which the tracks settled, or `None` when the
/// iteration guard ran out first.
fn relax(tracks: &mut Tracks, occupants: &[Occupant], available: i32, axis: Axis) -> Option<usize> {
    let spanning: Vec<&Occupant> = occupants.iter().filter(|o| o.span > 1).collect();
    let guard = tracks.len() + spanning.len() + 2;
    for pass in 0..guard {
        let before = tracks.sizes();
        let leftover = tracks.fit(available, false);
        for occupant in &spanning {
            tracks.reconcile(occupant.range(), occupant.min);
            tracks.reconcile_min(occupant.range(), occupant.min);
        }
        if tracks.sizes() == before {
            trace!(%axis, pass, leftover, "tracks settled");
            return Some(pass);
        }
    }
    debug!(%axis, guard, "track relaxation stopped at its iteration guard");
    None
}

/// Column and row spans, rows held to [`MAX_TRACKS`]. Columns are narrowed
/// to the column count during placement.
fn spans_of<B: LayoutBox>(item: &Item<B>) -> (usize, usize) {
    (
        item.constraint.span(Axis::Horizontal),
        item.constraint.span(Axis::Vertical).min(MAX_TRACKS),
    )
}

impl<B: LayoutBox> LayoutBox for FlowGrid<B> {
    fn natural_size(&self, hint: SizeHint) -> Size {
        self.measure(SizeKind::Natural, hint).size
    }

    fn minimum_size(&self) -> Size {
        self.measure(SizeKind::Minimum, SizeHint::NONE).size
    }

    fn maximum_size(&self) -> Size {
        Size::MAX
    }

    fn assign(&mut self, rect: Rect) {
        let report = self.layout(rect);
        debug!(errors = report.errors.len(), "nested flow grid assigned");
    }
}
