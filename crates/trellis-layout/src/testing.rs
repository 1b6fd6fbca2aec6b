//! Boxes for unit tests.

use trellis_core::{LayoutBox, Rect, Size, SizeHint};

/// A box with fixed sizes that remembers where it was put.
///
/// With a wrap area set, its natural height at a width hint is
/// `area / width` rounded up, like a paragraph of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBox {
    pub natural: Size,
    pub min: Size,
    pub max: Size,
    pub wrap_area: Option<i32>,
    pub assigned: Option<Rect>,
}

impl TestBox {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            natural: Size::new(width, height),
            min: Size::ZERO,
            max: Size::MAX,
            wrap_area: None,
            assigned: None,
        }
    }

    pub fn with_min(mut self, width: i32, height: i32) -> Self {
        self.min = Size::new(width, height);
        self
    }

    pub fn with_max(mut self, width: i32, height: i32) -> Self {
        self.max = Size::new(width, height);
        self
    }

    pub fn wrapping(mut self, area: i32) -> Self {
        self.wrap_area = Some(area);
        self
    }

    pub fn rect(&self) -> Rect {
        self.assigned.unwrap_or_default()
    }
}

impl LayoutBox for TestBox {
    fn natural_size(&self, hint: SizeHint) -> Size {
        match (self.wrap_area, hint.width) {
            (Some(area), Some(width)) if width > 0 => Size::new(width, (area + width - 1) / width),
            _ => self.natural,
        }
    }

    fn minimum_size(&self) -> Size {
        self.min
    }

    fn maximum_size(&self) -> Size {
        self.max
    }

    fn assign(&mut self, rect: Rect) {
        self.assigned = Some(rect);
    }
}
