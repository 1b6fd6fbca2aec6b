//! End-to-end layouts with known answers.

mod common;

use common::{widths, Block};
use trellis_core::{Alignment, Constraint, LayoutBox, LayoutError, Margins, Rect, Size, SizeHint};
use trellis_layout::{
    auto_place, ColumnLayout, ColumnOptions, FlowGrid, FlowOptions, Grid, GridOptions,
    GridPlacement, Linear, LinearOptions, Placement, RowDistribution,
};

#[test]
fn test_row_grows_evenly() {
    let mut row = Linear::row();
    for _ in 0..3 {
        row.push(Block::new(50, 20), Constraint::new());
    }

    let report = row.layout(Rect::new(0, 0, 180, 20));

    assert!(report.is_clean());
    assert_eq!(widths(3, |i| row.child(i).and_then(|p| p.assigned)), vec![60, 60, 60]);
    assert_eq!(report.size.width, 180);
}

#[test]
fn test_row_shrinks_against_floors() {
    let mut row = Linear::row()
        .with_child(Block::new(40, 20).with_min(10, 0), Constraint::new())
        .with_child(Block::new(200, 20).with_min(10, 0), Constraint::new());

    row.layout(Rect::new(0, 0, 100, 20));

    let assigned = widths(2, |i| row.child(i).and_then(|p| p.assigned));
    assert_eq!(assigned, vec![10, 90]);
    assert!(assigned.iter().all(|&w| w >= 10));
}

/// Floors stop the shrink at 10 + 10; the row uses 20 of the 5 offered.
#[test]
fn test_row_floors_stop_at_total_twenty() {
    let mut row = Linear::row()
        .with_child(Block::new(40, 20).with_min(10, 0), Constraint::new())
        .with_child(Block::new(200, 20).with_min(10, 0), Constraint::new());

    let report = row.layout(Rect::new(0, 0, 5, 20));

    assert_eq!(widths(2, |i| row.child(i).and_then(|p| p.assigned)), vec![10, 10]);
    assert_eq!(report.size.width, 20);
}

#[test]
fn test_grid_span_reconciled() {
    let grid = Grid::new(GridOptions::new())
        .with_child(Block::new(30, 10), Constraint::new(), GridPlacement::cell(0, 0))
        .with_child(Block::new(30, 10), Constraint::new(), GridPlacement::cell(1, 0))
        .with_child(
            Block::new(120, 10),
            Constraint::new().with_span(2, 1),
            GridPlacement::cell(0, 1),
        );

    assert_eq!(grid.tracks(SizeHint::NONE).columns, vec![60, 60]);
}

#[test]
fn test_flow_places_five_into_three_columns() {
    let placement = auto_place(&[(1, 1); 5], 3);
    let rows: Vec<usize> = placement.cells.iter().map(|p| p.row).collect();
    assert_eq!(rows, vec![0, 0, 0, 1, 1]);
    assert_eq!(placement.rows, 2);

    let mut grid = FlowGrid::with_columns(3);
    for _ in 0..5 {
        grid.push(Block::new(10, 10), Constraint::new());
    }
    assert_eq!(grid.placement(), placement);
    assert_eq!(placement.cells[3], Placement { row: 1, column: 0 });
}

#[test]
fn test_form_layout() {
    // Labels on the left, growing fields on the right, a wrapped note below.
    let options = FlowOptions::new()
        .with_columns(2)
        .with_padding(Margins::uniform(8))
        .with_spacing(6, 4);
    let mut form: FlowGrid<Block> = FlowGrid::new(options);
    let field = || {
        Constraint::new()
            .with_alignment(Alignment::Fill, Alignment::Middle)
            .with_grow(true, false)
            .with_min_width(40)
    };
    form.push(Block::new(60, 12), Constraint::new());
    form.push(Block::new(120, 20), field());
    form.push(Block::new(60, 12), Constraint::new());
    form.push(Block::new(120, 20), field());
    form.push(
        Block::new(400, 12).wrapping(4800),
        Constraint::new()
            .with_span(2, 1)
            .with_alignment(Alignment::Fill, Alignment::Begin)
            .with_grow(true, false)
            .with_min_width(100),
    );

    let report = form.layout(Rect::new(0, 0, 300, 400));
    assert!(report.is_clean());

    let field_rect = form.child(1).and_then(|p| p.assigned).unwrap_or_default();
    assert_eq!(field_rect.x, 8 + 60 + 6);
    assert_eq!(field_rect.x + field_rect.width, 300 - 8);

    let note = form.child(4).and_then(|p| p.assigned).unwrap_or_default();
    assert_eq!(note.width, 300 - 16);
    assert_eq!(note.height, 4800 / note.width + 1);
    assert!(report.size.height < 400);
}

fn boxed(node: impl LayoutBox + 'static) -> Box<dyn LayoutBox> {
    Box::new(node)
}

#[test]
fn test_nested_containers() {
    let toolbar = Linear::new(LinearOptions::horizontal().with_gap(4))
        .with_child(boxed(Block::new(30, 20)), Constraint::new())
        .with_child(boxed(Block::new(30, 20)), Constraint::new());
    let mut page = Linear::column()
        .with_child(boxed(toolbar), Constraint::new())
        .with_child(boxed(Block::new(100, 200)), Constraint::new().fill());

    assert_eq!(page.natural_size(SizeHint::NONE), Size::new(100, 220));

    let report = page.layout(Rect::new(0, 0, 100, 300));

    assert!(report.is_clean());
    assert_eq!(report.size, Size::new(100, 300));
}

#[test]
fn test_column_form_last_row_takes_excess() {
    let options = ColumnOptions::new()
        .with_columns(2)
        .with_distribution(RowDistribution::Last);
    let mut form = ColumnLayout::new(options)
        .with_child(Block::new(40, 10).with_max(40, 10), Constraint::new())
        .with_child(Block::new(100, 20), Constraint::new())
        .with_child(Block::new(40, 10).with_max(40, 10), Constraint::new())
        .with_child(Block::new(100, 50), Constraint::new());

    let report = form.layout(Rect::new(0, 0, 200, 120));

    assert!(report.is_clean());
    assert_eq!(report.size, Size::new(200, 120));
    let notes = form.child(3).and_then(|p| p.assigned);
    assert_eq!(notes, Some(Rect::new(45, 22, 155, 98)));
    let label = form.child(2).and_then(|p| p.assigned);
    assert_eq!(label, Some(Rect::new(0, 66, 40, 10)));
}

#[test]
fn test_errors_do_not_abort_pass() {
    let mut grid = Grid::new(GridOptions::new())
        .with_child(Block::new(10, 10), Constraint::new(), GridPlacement::cell(0, 0))
        .with_child(Block::new(10, 10), Constraint::new(), GridPlacement::cell(0, 0))
        .with_child(Block::new(10, 10), Constraint::new(), GridPlacement::cell(1, 0));

    let report = grid.layout(Rect::new(0, 0, 100, 100));

    assert!(matches!(
        report.errors.as_slice(),
        [LayoutError::CellOccupied { item: 1, occupant: 0, .. }]
    ));
    assert!(grid.child(0).and_then(|p| p.assigned).is_some());
    assert!(grid.child(1).and_then(|p| p.assigned).is_none());
    assert!(grid.child(2).and_then(|p| p.assigned).is_some());
}
