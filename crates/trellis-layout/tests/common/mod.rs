//! Shared helpers for integration tests.

#![allow(dead_code)]

use trellis_core::{LayoutBox, Rect, Size, SizeHint};

/// A box with fixed sizes that records its assigned rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub natural: Size,
    pub min: Size,
    pub max: Size,
    /// Content area for height-for-width measurement
    pub area: Option<i32>,
    pub assigned: Option<Rect>,
}

impl Block {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            natural: Size::new(width, height),
            min: Size::ZERO,
            max: Size::MAX,
            area: None,
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

    /// Wrap like text covering `area` square pixels.
    pub fn wrapping(mut self, area: i32) -> Self {
        self.area = Some(area);
        self
    }
}

impl LayoutBox for Block {
    fn natural_size(&self, hint: SizeHint) -> Size {
        match (self.area, hint.width) {
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

/// Widths assigned to the first `count` children.
pub fn widths(count: usize, child: impl Fn(usize) -> Option<Rect>) -> Vec<i32> {
    (0..count).filter_map(|i| child(i)).map(|r| r.width).collect()
}
