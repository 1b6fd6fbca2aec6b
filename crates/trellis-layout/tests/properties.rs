//! Properties that must hold for any input.

mod common;

use common::Block;
use proptest::prelude::*;
use trellis_core::{Constraint, Rect, SizeHint};
use trellis_layout::{distribute, FlowGrid, FlowOptions, Grid, GridOptions, GridPlacement, Linear};

/// Values paired with ceilings at or above them.
fn arb_growable() -> impl Strategy<Value = (Vec<i32>, Vec<i32>)> {
    prop::collection::vec((0i32..500, 0i32..500), 1..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(value, headroom)| (value, value + headroom))
            .unzip()
    })
}

/// Values paired with floors at or below them.
fn arb_shrinkable() -> impl Strategy<Value = (Vec<i32>, Vec<i32>)> {
    prop::collection::vec((0i32..500, 0i32..500), 1..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(value, room)| (value, value - room.min(value)))
            .unzip()
    })
}

fn arb_block() -> impl Strategy<Value = (i32, i32)> {
    (0i32..120, 0i32..60)
}

fn sum(values: &[i32]) -> i64 {
    values.iter().map(|&v| i64::from(v)).sum()
}

proptest! {
    /// Growth places exactly `amount` between the values and the leftover,
    /// and never crosses a ceiling.
    #[test]
    fn prop_grow_conserves((before, ceilings) in arb_growable(), amount in 0i32..2000) {
        let mut after = before.clone();
        let leftover = distribute(amount, &mut after, &ceilings);

        prop_assert_eq!(sum(&after) - sum(&before) + i64::from(leftover), i64::from(amount));
        prop_assert!(leftover >= 0);
        for i in 0..after.len() {
            prop_assert!(after[i] <= ceilings[i], "value {} = {} above {}", i, after[i], ceilings[i]);
            prop_assert!(after[i] >= before[i]);
        }
    }

    /// Shrinking never goes below a floor and still accounts for every pixel.
    #[test]
    fn prop_shrink_respects_floors((before, floors) in arb_shrinkable(), amount in 0i32..2000) {
        let mut after = before.clone();
        let leftover = distribute(-amount, &mut after, &floors);

        prop_assert_eq!(sum(&after) - sum(&before) + i64::from(leftover), -i64::from(amount));
        prop_assert!(leftover <= 0);
        for i in 0..after.len() {
            prop_assert!(after[i] >= floors[i], "value {} = {} below {}", i, after[i], floors[i]);
            prop_assert!(after[i] <= before[i]);
        }
    }

    /// Every column of an equal-columns flow grid has the same width.
    #[test]
    fn prop_equal_columns(
        blocks in prop::collection::vec(arb_block(), 1..12),
        columns in 1i32..5,
        grow in proptest::bool::ANY,
        width in prop::option::of(0i32..800),
    ) {
        let options = FlowOptions::new().with_columns(columns).with_equal_columns(true);
        let mut grid = FlowGrid::new(options);
        for (w, h) in blocks {
            grid.push(Block::new(w, h), Constraint::new().with_grow(grow, false));
        }

        let sizes = grid.tracks(SizeHint::new(width, None)).columns;

        prop_assert_eq!(sizes.len(), columns as usize);
        prop_assert!(sizes.windows(2).all(|pair| pair[0] == pair[1]), "{:?}", sizes);
    }

    /// Explicit grids honor the same rule.
    #[test]
    fn prop_grid_equal_columns(blocks in prop::collection::vec(arb_block(), 1..9)) {
        let mut grid = Grid::new(GridOptions::new().with_gap(3).with_equal_columns(true));
        for (index, (w, h)) in blocks.into_iter().enumerate() {
            let placement = GridPlacement::cell((index % 3) as i32, (index / 3) as i32);
            grid.push(Block::new(w, h), Constraint::new(), placement);
        }

        let sizes = grid.tracks(SizeHint::NONE).columns;
        prop_assert!(sizes.windows(2).all(|pair| pair[0] == pair[1]), "{:?}", sizes);
    }

    /// A spanning box gets at least its natural width and stays inside the
    /// tracks it covers.
    #[test]
    fn prop_span_containment(
        blocks in prop::collection::vec(arb_block(), 0..8),
        wide in arb_block(),
        span in 2usize..4,
        columns in 2i32..5,
        bounds in (0i32..600, 0i32..600),
    ) {
        let mut grid = FlowGrid::new(FlowOptions::new().with_columns(columns));
        for (w, h) in blocks {
            grid.push(Block::new(w, h), Constraint::new());
        }
        let index = grid.push(Block::new(wide.0, wide.1), Constraint::new().with_span(span, 1));

        let sizes = grid.tracks(SizeHint::new(Some(bounds.0), Some(bounds.1)));
        let placement = grid.placement();
        let cell = placement.cells[index];
        let covered = span.min(columns as usize);
        let gap = grid.options().horizontal_spacing;
        let available: i32 = sizes.columns[cell.column..cell.column + covered].iter().sum::<i32>()
            + gap * (covered as i32 - 1);

        grid.layout(Rect::new(0, 0, bounds.0, bounds.1));
        let rect = grid.child(index).and_then(|p| p.assigned).unwrap_or_default();

        prop_assert!(rect.width >= wide.0, "width {} below natural {}", rect.width, wide.0);
        prop_assert!(rect.width <= available, "width {} above covered {}", rect.width, available);
    }

    /// Laying out the same row twice assigns the same rectangles.
    #[test]
    fn prop_linear_idempotent(
        blocks in prop::collection::vec((arb_block(), 0i32..40), 1..8),
        bounds in (0i32..600, 0i32..200),
        fill in proptest::bool::ANY,
    ) {
        let mut row = Linear::row();
        for ((w, h), min) in blocks {
            let constraint = if fill { Constraint::new().fill() } else { Constraint::new() };
            row.push(Block::new(w, h).with_min(min.min(w), 0), constraint);
        }

        let area = Rect::new(5, 5, bounds.0, bounds.1);
        let first = row.layout(area);
        let rects: Vec<_> = (0..row.len()).map(|i| row.child(i).and_then(|p| p.assigned)).collect();
        let second = row.layout(area);
        let again: Vec<_> = (0..row.len()).map(|i| row.child(i).and_then(|p| p.assigned)).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(rects, again);
    }

    /// Flow grids, re-wrapping included, are just as stable.
    #[test]
    fn prop_flow_idempotent(
        blocks in prop::collection::vec((arb_block(), 1i32..3000), 1..10),
        columns in 1i32..4,
        width in 20i32..500,
    ) {
        let mut grid = FlowGrid::new(FlowOptions::new().with_columns(columns));
        for ((w, h), area) in blocks {
            grid.push(
                Block::new(w, h).wrapping(area),
                Constraint::new().fill().with_grow(true, false).with_min_width(10),
            );
        }

        let area = Rect::new(0, 0, width, 400);
        let first = grid.layout(area);
        let rects: Vec<_> = (0..grid.len()).map(|i| grid.child(i).and_then(|p| p.assigned)).collect();
        let second = grid.layout(area);
        let again: Vec<_> = (0..grid.len()).map(|i| grid.child(i).and_then(|p| p.assigned)).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(rects, again);
    }
}
