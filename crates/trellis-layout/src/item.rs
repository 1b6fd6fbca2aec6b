//! A box together with the constraint that steers it.

use std::ops::Range;

use trellis_core::{
    clamp_dimension, Axis, Constraint, LayoutBox, LayoutError, Margins, Rect, Scale, Size,
    SizeBounds, SizeHint, SizeKind,
};

use crate::report::LayoutReport;
use crate::track::Tracks;

/// One child of a container. Owning the constraint here is what keeps it
/// from steering a second box.
#[derive(Debug)]
pub(crate) struct Item<B> {
    pub node: B,
    pub constraint: Constraint,
}

/// What a container learns about an item before sizing tracks.
///
/// All sizes exclude margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Measure {
    pub size: Size,
    pub bounds: SizeBounds,
    pub margins: Margins,
}

impl Measure {
    /// Measured size along `axis` plus margins.
    pub fn outer(&self, axis: Axis) -> i32 {
        outer(self.size.get(axis), &self.margins, axis)
    }

    pub fn outer_min(&self, axis: Axis) -> i32 {
        outer(self.bounds.min.get(axis), &self.margins, axis)
    }

    pub fn outer_max(&self, axis: Axis) -> i32 {
        outer(self.bounds.max.get(axis), &self.margins, axis)
    }
}

pub(crate) fn outer(size: i32, margins: &Margins, axis: Axis) -> i32 {
    clamp_dimension(size.saturating_add(margins.total(axis)))
}

impl<B: LayoutBox> Item<B> {
    pub fn new(node: B, constraint: Constraint) -> Self {
        Self { node, constraint }
    }

    pub fn is_excluded(&self) -> bool {
        self.constraint.exclude
    }

    pub fn margins(&self, scale: &Scale) -> Margins {
        self.constraint.margins.scaled(scale)
    }

    /// Explicit size hints from the constraint, scaled.
    pub fn hint(&self, scale: &Scale) -> SizeHint {
        SizeHint::new(
            scale.scale_opt(self.constraint.width_hint),
            scale.scale_opt(self.constraint.height_hint),
        )
    }

    /// Query the box. Constraint hints win over `outer_hint` and override
    /// the reported size.
    pub fn measure(&self, kind: SizeKind, scale: &Scale, outer_hint: SizeHint) -> Measure {
        let own = self.hint(scale);
        let hint = SizeHint::new(own.width.or(outer_hint.width), own.height.or(outer_hint.height));
        let mut size = kind.measure(&self.node, hint);
        for axis in Axis::BOTH {
            if let Some(value) = own.get(axis) {
                size.set(axis, clamp_dimension(value));
            }
        }
        Measure {
            size,
            bounds: SizeBounds::of(&self.node),
            margins: self.margins(scale),
        }
    }

    /// Explicit minimum along `axis`, scaled, if the item grows on it.
    pub fn explicit_minimum(&self, axis: Axis, scale: &Scale) -> Option<i32> {
        self.constraint
            .explicit_minimum(axis)
            .map(|value| clamp_dimension(scale.scale(value)))
    }
}

/// Where an item sits in a grid: top-left cell and spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cell {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub rows: usize,
    pub columns: usize,
}

impl Cell {
    pub fn start(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.column,
            Axis::Vertical => self.row,
        }
    }

    pub fn span(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.columns,
            Axis::Vertical => self.rows,
        }
    }

    /// Tracks covered along `axis`.
    pub fn range(&self, axis: Axis) -> Range<usize> {
        let start = self.start(axis);
        start..start.saturating_add(self.span(axis))
    }

    /// First (row, column) covered by both cells, if they overlap.
    pub fn overlap(&self, other: &Cell) -> Option<(usize, usize)> {
        let [columns, rows] = Axis::BOTH.map(|axis| {
            let (a, b) = (self.range(axis), other.range(axis));
            a.start.max(b.start)..a.end.min(b.end)
        });
        (!rows.is_empty() && !columns.is_empty()).then_some((rows.start, columns.start))
    }

    /// Union of the covered tracks, given each track's leading edge.
    pub fn rect(&self, columns: &Tracks, column_starts: &[i32], rows: &Tracks, row_starts: &[i32]) -> Rect {
        let x = column_starts.get(self.column).copied().unwrap_or(0);
        let y = row_starts.get(self.row).copied().unwrap_or(0);
        Rect::new(
            x,
            y,
            columns.span_size(self.range(Axis::Horizontal)),
            rows.span_size(self.range(Axis::Vertical)),
        )
    }
}

/// Place an item of `natural` size inside `cell`: margins first, then the
/// constraint's alignment on each axis. Margins that do not fit are
/// reported and the item collapses to zero on that axis.
pub(crate) fn fit_into_cell(
    index: usize,
    constraint: &Constraint,
    margins: &Margins,
    natural: Size,
    maximum: Size,
    cell: Rect,
    report: &mut LayoutReport,
) -> Rect {
    let mut rect = cell;
    for axis in Axis::BOTH {
        let (begin, end) = margins.along(axis);
        let mut available = cell.length(axis) - begin - end;
        if available < 0 {
            report.push(LayoutError::NegativeSpace {
                item: index,
                axis,
                deficit: -available,
            });
            available = 0;
        }
        let (offset, length) =
            constraint
                .alignment(axis)
                .place(available, natural.get(axis), maximum.get(axis));
        rect.set_span(axis, cell.start(axis) + begin + offset, length);
    }
    rect
}
