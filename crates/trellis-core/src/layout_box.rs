//! The contract between the engine and the boxes it arranges.

use crate::types::{Rect, Size, SizeHint};

/// Anything that can be measured and then given a rectangle.
///
/// Containers implement this too, so layouts nest by plain recursion.
pub trait LayoutBox {
    /// Preferred size, optionally reflowed for the given width/height.
    fn natural_size(&self, hint: SizeHint) -> Size;

    /// Smallest acceptable size.
    fn minimum_size(&self) -> Size;

    /// Largest useful size.
    fn maximum_size(&self) -> Size;

    /// Receive the final rectangle. Must be idempotent.
    fn assign(&mut self, rect: Rect);
}

impl<B: LayoutBox + ?Sized> LayoutBox for Box<B> {
    fn natural_size(&self, hint: SizeHint) -> Size {
        (**self).natural_size(hint)
    }

    fn minimum_size(&self) -> Size {
        (**self).minimum_size()
    }

    fn maximum_size(&self) -> Size {
        (**self).maximum_size()
    }

    fn assign(&mut self, rect: Rect) {
        (**self).assign(rect)
    }
}

/// Which of a box's sizes a measuring pass asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeKind {
    /// `minimum_size`
    Minimum,
    /// `natural_size` at the given hint
    #[default]
    Natural,
    /// `maximum_size`
    Maximum,
}

impl SizeKind {
    /// Query `node` for the size this kind selects. The result is clamped
    /// into `0..=MAX_SIZE`.
    pub fn measure<B: LayoutBox + ?Sized>(self, node: &B, hint: SizeHint) -> Size {
        let size = match self {
            SizeKind::Minimum => node.minimum_size(),
            SizeKind::Natural => node.natural_size(hint),
            SizeKind::Maximum => node.maximum_size(),
        };
        size.clamped()
    }
}

/// A box's minimum and maximum, made consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min: Size,
    pub max: Size,
}

impl SizeBounds {
    /// Read the bounds of `node`. A minimum above the maximum is clamped down
    /// to the maximum without complaint.
    pub fn of<B: LayoutBox + ?Sized>(node: &B) -> Self {
        let max = node.maximum_size().clamped();
        let min = node.minimum_size().clamped().min(max);
        Self { min, max }
    }
}
