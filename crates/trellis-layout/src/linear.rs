//! Row and column containers.
//!
//! Children are laid out one after another along the main axis and aligned
//! individually on the cross axis. Slack on the main axis goes through
//! [`distribute`]; what the children cannot take is spread into the gaps
//! when the container fills that axis.

use tracing::{debug, trace};
use trellis_core::{
    clamp_dimension, Axis, Constraint, LayoutBox, Margins, Rect, Scale, Size, SizeHint, SizeKind,
};

use crate::distribute::{distribute, spread};
use crate::item::{fit_into_cell, Item, Measure};
use crate::report::LayoutReport;

/// Row/column configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinearOptions {
    /// Main axis
    pub axis: Axis,
    /// Gap between children, unscaled
    pub gap: i32,
    /// Padding inside the container, unscaled
    pub padding: Margins,
    /// Spread leftover horizontal space into the gaps
    pub fill_horizontal: bool,
    /// Spread leftover vertical space into the gaps
    pub fill_vertical: bool,
}

impl LinearOptions {
    /// Left to right.
    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            ..Default::default()
        }
    }

    /// Top to bottom.
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            ..Default::default()
        }
    }

    /// Set the gap between children.
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap;
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

    /// Whether the container fills along `axis`.
    pub fn fills(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.fill_horizontal,
            Axis::Vertical => self.fill_vertical,
        }
    }
}

/// A row or column of boxes.
#[derive(Debug)]
pub struct Linear<B = Box<dyn LayoutBox>> {
    options: LinearOptions,
    scale: Scale,
    children: Vec<Item<B>>,
}

impl<B: LayoutBox> Linear<B> {
    pub fn new(options: LinearOptions) -> Self {
        Self {
            options,
            scale: Scale::identity(),
            children: Vec::new(),
        }
    }

    /// An empty row.
    pub fn row() -> Self {
        Self::new(LinearOptions::horizontal())
    }

    /// An empty column.
    pub fn column() -> Self {
        Self::new(LinearOptions::vertical())
    }

    /// Use `scale` for every configured pixel value.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn options(&self) -> &LinearOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut LinearOptions {
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

    pub fn constraint(&self, index: usize) -> Option<&Constraint> {
        self.children.get(index).map(|item| &item.constraint)
    }

    /// Aggregate size of the children: summed along the main axis, the
    /// largest on the cross axis, plus gaps and padding.
    pub fn measure(&self, kind: SizeKind, hint: SizeHint) -> LayoutReport {
        let axis = self.options.axis;
        let cross = axis.cross();
        let padding = self.options.padding.scaled(&self.scale);
        let gap = self.scale.scale(self.options.gap);

        let cross_available = hint.get(cross).map(|v| v - padding.total(cross));
        let entries = self.measure_children(kind, cross_available);

        let main: i64 = entries.iter().map(|(_, m)| i64::from(m.outer(axis))).sum::<i64>()
            + i64::from(gap) * entries.len().saturating_sub(1) as i64;
        let cross_size = entries.iter().map(|(_, m)| m.outer(cross)).max().unwrap_or(0);

        LayoutReport {
            size: Size::oriented(
                axis,
                clamp_wide(main + i64::from(padding.total(axis))),
                clamp_dimension(cross_size.saturating_add(padding.total(cross))),
            ),
            errors: Vec::new(),
        }
    }

    /// Size and position every child inside `bounds`.
    pub fn layout(&mut self, bounds: Rect) -> LayoutReport {
        let axis = self.options.axis;
        let cross = axis.cross();
        let padding = self.options.padding.scaled(&self.scale);
        let gap = self.scale.scale(self.options.gap);
        let inner = bounds.inset(&padding);

        let entries = self.measure_children(SizeKind::Natural, Some(inner.length(cross)));
        debug!(
            children = entries.len(),
            %axis,
            width = bounds.width,
            height = bounds.height,
            "linear layout"
        );

        let mut report = LayoutReport::new();
        let mut sizes: Vec<i32> = entries.iter().map(|(_, m)| m.outer(axis)).collect();
        let mut gaps = vec![gap; entries.len().saturating_sub(1)];

        let natural_total = clamp_wide(
            sizes.iter().map(|&s| i64::from(s)).sum::<i64>()
                + gaps.iter().map(|&g| i64::from(g)).sum::<i64>(),
        );
        let extra = inner.length(axis) - natural_total;
        if extra != 0 && !sizes.is_empty() {
            let limits: Vec<i32> = entries
                .iter()
                .map(|(_, m)| if extra > 0 { m.outer_max(axis) } else { m.outer_min(axis) })
                .collect();
            let leftover = distribute(extra, &mut sizes, &limits);
            if leftover > 0 && self.options.fills(axis) {
                spread(leftover, &mut gaps);
            } else if leftover != 0 {
                trace!(leftover, "linear slack left unplaced");
            }
        }

        let mut cursor = inner.start(axis);
        for (slot, (index, measure)) in entries.iter().enumerate() {
            let length = sizes[slot];
            let cell = Rect::oriented(axis, cursor, inner.start(cross), length, inner.length(cross));
            let natural = Size::oriented(
                axis,
                length - measure.margins.total(axis),
                measure.size.get(cross),
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
            cursor = cursor
                .saturating_add(length)
                .saturating_add(gaps.get(slot).copied().unwrap_or(0));
        }

        let used = cursor - inner.start(axis) + padding.total(axis);
        report.size = Size::oriented(axis, used.max(padding.total(axis)), bounds.length(cross));
        report
    }

    fn measure_children(&self, kind: SizeKind, cross_available: Option<i32>) -> Vec<(usize, Measure)> {
        let cross = self.options.axis.cross();
        self.children
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_excluded())
            .map(|(index, item)| {
                let mut hint = SizeHint::NONE;
                if let Some(available) = cross_available {
                    let margins = item.margins(&self.scale);
                    hint.set(cross, Some((available - margins.total(cross)).max(0)));
                }
                (index, item.measure(kind, &self.scale, hint))
            })
            .collect()
    }
}

fn clamp_wide(value: i64) -> i32 {
    value.clamp(0, i64::from(trellis_core::MAX_SIZE)) as i32
}

impl<B: LayoutBox> LayoutBox for Linear<B> {
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
        debug!(errors = report.errors.len(), "nested linear assigned");
    }
}
