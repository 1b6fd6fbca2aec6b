//! Grid layout with explicit placement.
//!
//! Every child names its top-left cell; spans come from its constraint.
//! Column widths and row heights are built from the children, spans are
//! reconciled, and the result is fitted to the available space.

use tracing::{debug, trace};
use trellis_core::{
    Axis, Constraint, LayoutBox, LayoutError, Margins, Rect, Scale, Size, SizeHint, SizeKind,
    MAX_SIZE,
};

use crate::item::{fit_into_cell, outer, Cell, Item, Measure};
use crate::report::LayoutReport;
use crate::track::{Occupant, TrackSizes, Tracks, MAX_TRACKS};

/// Grid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// Gap between columns, unscaled
    pub column_gap: i32,
    /// Gap between rows, unscaled
    pub row_gap: i32,
    /// Padding inside the grid, unscaled
    pub padding: Margins,
    /// Force leftover horizontal space into the columns
    pub fill_horizontal: bool,
    /// Force leftover vertical space into the rows
    pub fill_vertical: bool,
    /// Give every column the same width
    pub equal_columns: bool,
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap between items.
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.column_gap = gap;
        self.row_gap = gap;
        self
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding: Margins) -> Self {
        self.padding = padding;
        self
    }

    /// Set the fill flags.
    pub fn with_fill(mut self, horizontal: bool, vertical: bool) -> Self {
        self.fill_horizontal = horizontal;
        self.fill_vertical = vertical;
        self
    }

    /// Give every column the same width.
    pub fn with_equal_columns(mut self, equal: bool) -> Self {
        self.equal_columns = equal;
        self
    }

    pub fn fills(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.fill_horizontal,
            Axis::Vertical => self.fill_vertical,
        }
    }

    fn gap(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.column_gap,
            Axis::Vertical => self.row_gap,
        }
    }
}

/// Grid item placement: the top-left cell, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPlacement {
    pub column: i32,
    pub row: i32,
}

impl GridPlacement {
    /// Create a placement for a specific cell.
    pub fn cell(column: i32, row: i32) -> Self {
        Self { column, row }
    }
}

#[derive(Debug)]
struct Placed<B> {
    item: Item<B>,
    placement: GridPlacement,
}

struct Solved {
    cells: Vec<(Cell, Measure)>,
    columns: Tracks,
    rows: Tracks,
}

/// A grid of explicitly placed boxes.
///
/// Two children claiming the same cell is reported as
/// [`LayoutError::CellOccupied`]; the later child is left out of the pass.
#[derive(Debug)]
pub struct Grid<B = Box<dyn LayoutBox>> {
    options: GridOptions,
    scale: Scale,
    children: Vec<Placed<B>>,
}

impl<B: LayoutBox> Grid<B> {
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            scale: Scale::identity(),
            children: Vec::new(),
        }
    }

    /// Use `scale` for every configured pixel value.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut GridOptions {
        &mut self.options
    }

    /// Add a child at `placement`. Returns its index.
    pub fn push(&mut self, node: B, constraint: Constraint, placement: GridPlacement) -> usize {
        self.children.push(Placed {
            item: Item::new(node, constraint),
            placement,
        });
        self.children.len() - 1
    }

    /// Add a child, builder style.
    pub fn with_child(mut self, node: B, constraint: Constraint, placement: GridPlacement) -> Self {
        self.push(node, constraint, placement);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&B> {
        self.children.get(index).map(|placed| &placed.item.node)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut B> {
        self.children.get_mut(index).map(|placed| &mut placed.item.node)
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

    /// Size of the grid without positioning anything.
    pub fn measure(&self, kind: SizeKind, hint: SizeHint) -> LayoutReport {
        let mut report = LayoutReport::new();
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
        debug!(
            items = solved.cells.len(),
            columns = solved.columns.len(),
            rows = solved.rows.len(),
            width = bounds.width,
            height = bounds.height,
            "grid layout"
        );

        let column_starts = solved.columns.starts(inner.x);
        let row_starts = solved.rows.starts(inner.y);
        for (cell, measure) in &solved.cells {
            let area = cell.rect(&solved.columns, &column_starts, &solved.rows, &row_starts);
            let placed = &mut self.children[cell.index];
            let rect = fit_into_cell(
                cell.index,
                &placed.item.constraint,
                &measure.margins,
                measure.size,
                Size::MAX,
                area,
                &mut report,
            );
            placed.item.node.assign(rect);
        }

        report.size = self.outer_size(&solved);
        report
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
        let (cells, column_count, row_count) = self.occupy(report);
        let cells: Vec<(Cell, Measure)> = cells
            .into_iter()
            .map(|cell| {
                let item = &self.children[cell.index].item;
                (cell, item.measure(kind, &self.scale, SizeHint::NONE))
            })
            .collect();

        let columns = self.size_tracks(Axis::Horizontal, column_count, &cells, available.width);
        let rows = self.size_tracks(Axis::Vertical, row_count, &cells, available.height);
        Solved { cells, columns, rows }
    }

    /// Resolve placements into cells. Negative indices are clamped to zero
    /// and anything reaching past [`MAX_TRACKS`] is pulled back inside it;
    /// a child whose area overlaps an earlier child is dropped.
    fn occupy(&self, report: &mut LayoutReport) -> (Vec<Cell>, usize, usize) {
        let mut cells: Vec<Cell> = Vec::new();

        for (index, placed) in self.children.iter().enumerate() {
            if placed.item.is_excluded() {
                continue;
            }
            let GridPlacement { column, row } = placed.placement;
            if row < 0 || column < 0 {
                report.push(LayoutError::NegativeIndex { item: index, row, column });
            }
            let constraint = &placed.item.constraint;
            let spans = (constraint.span(Axis::Vertical), constraint.span(Axis::Horizontal));
            let (row_start, rows) = bounded(row, spans.0);
            let (column_start, columns) = bounded(column, spans.1);
            if (row_start, column_start) != (row.max(0) as usize, column.max(0) as usize)
                || (rows, columns) != spans
            {
                report.push(LayoutError::TrackLimit { item: index, limit: MAX_TRACKS });
            }
            let cell = Cell {
                index,
                row: row_start,
                column: column_start,
                rows,
                columns,
            };

            let conflict = cells
                .iter()
                .filter_map(|earlier| earlier.overlap(&cell).map(|position| (position, earlier.index)))
                .min();
            if let Some(((row, column), occupant)) = conflict {
                report.push(LayoutError::CellOccupied { item: index, occupant, row, column });
                continue;
            }
            cells.push(cell);
        }

        let columns = cells.iter().map(|c| c.range(Axis::Horizontal).end).max().unwrap_or(0);
        let rows = cells.iter().map(|c| c.range(Axis::Vertical).end).max().unwrap_or(0);
        (cells, columns, rows)
    }

    fn size_tracks(
        &self,
        axis: Axis,
        count: usize,
        cells: &[(Cell, Measure)],
        available: Option<i32>,
    ) -> Tracks {
        let occupants: Vec<Occupant> = cells
            .iter()
            .map(|(cell, measure)| {
                let item = &self.children[cell.index].item;
                let grows = item.constraint.grows(axis);
                let size = measure.outer(axis);
                // Non-growing items hold their size but never cap the track.
                let (min, max) = if grows {
                    let min = item
                        .explicit_minimum(axis, &self.scale)
                        .map_or(measure.outer_min(axis), |m| outer(m, &measure.margins, axis));
                    (min, measure.outer_max(axis))
                } else {
                    (size, MAX_SIZE)
                };
                Occupant {
                    start: cell.start(axis),
                    span: cell.span(axis),
                    size,
                    min,
                    max,
                    grows,
                }
            })
            .collect();

        let gap = self.scale.scale(self.options.gap(axis));
        let mut tracks = Tracks::seed(count, gap, &occupants);

        let equal = axis == Axis::Horizontal && self.options.equal_columns;
        if equal {
            tracks.unify(available);
        } else if let Some(available) = available {
            let leftover = tracks.fit(available, self.options.fills(axis));
            if leftover != 0 {
                trace!(%axis, leftover, "grid slack left unplaced");
            }
        }
        tracks
    }
}

/// Clamp a start index and span so the covered tracks stay below
/// [`MAX_TRACKS`].
fn bounded(start: i32, span: usize) -> (usize, usize) {
    let start = (start.max(0) as usize).min(MAX_TRACKS - 1);
    (start, span.min(MAX_TRACKS - start))
}

impl<B: LayoutBox> LayoutBox for Grid<B> {
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
        debug!(errors = report.errors.len(), "nested grid assigned");
    }
}
