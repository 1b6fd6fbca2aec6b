//! Core value types: sizes, rectangles, margins and alignment.
//!
//! All values are post-scale integer pixels. Positions may be negative,
//! sizes handed to boxes never are.

use std::fmt;

use glam::IVec2;

use crate::scale::Scale;

/// Largest size the engine hands out or accepts from a box.
///
/// Kept well below `i32::MAX` so a handful of sentinels can be summed
/// without overflowing.
pub const MAX_SIZE: i32 = i32::MAX / 8;

/// Clamp a single dimension into `0..=MAX_SIZE`.
pub fn clamp_dimension(value: i32) -> i32 {
    value.clamp(0, MAX_SIZE)
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The other axis.
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// A width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size::new(0, 0);
    /// The maximum-size sentinel on both axes.
    pub const MAX: Size = Size::new(MAX_SIZE, MAX_SIZE);

    /// Create a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Create a size from a vector (x = width, y = height).
    pub fn from_vec(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Get the size as a vector.
    pub fn to_vec(self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// The extent along `axis`.
    pub fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Replace the extent along `axis`.
    pub fn set(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    /// Build a size from main/cross extents relative to `axis`.
    pub fn oriented(axis: Axis, main: i32, cross: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Size) -> Size {
        Self::from_vec(self.to_vec().min(other.to_vec()))
    }

    /// Clamp both dimensions into `0..=MAX_SIZE`.
    pub fn clamped(self) -> Size {
        Self::new(clamp_dimension(self.width), clamp_dimension(self.height))
    }

    /// Grow by the given margins, saturating at [`MAX_SIZE`].
    pub fn expand(self, margins: &Margins) -> Size {
        Self::new(
            self.width.saturating_add(margins.horizontal()).min(MAX_SIZE),
            self.height.saturating_add(margins.vertical()).min(MAX_SIZE),
        )
    }
}

/// Width/height hints passed to a box when asking for its natural size.
///
/// `None` means "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeHint {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl SizeHint {
    /// No hint on either axis.
    pub const NONE: SizeHint = SizeHint { width: None, height: None };

    /// Hint both axes.
    pub fn new(width: Option<i32>, height: Option<i32>) -> Self {
        Self { width, height }
    }

    /// Hint only the width.
    pub fn width(width: i32) -> Self {
        Self { width: Some(width), height: None }
    }

    /// Hint only the height.
    pub fn height(height: i32) -> Self {
        Self { width: None, height: Some(height) }
    }

    /// The hint along `axis`.
    pub fn get(self, axis: Axis) -> Option<i32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Replace the hint along `axis`.
    pub fn set(&mut self, axis: Axis, value: Option<i32>) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a rectangle with position and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from main/cross coordinates relative to `axis`.
    pub fn oriented(axis: Axis, main_start: i32, cross_start: i32, main: i32, cross: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main_start, cross_start, main, cross),
            Axis::Vertical => Self::new(cross_start, main_start, cross, main),
        }
    }

    /// Get the size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The leading edge along `axis`.
    pub fn start(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// The extent along `axis`.
    pub fn length(&self, axis: Axis) -> i32 {
        self.size().get(axis)
    }

    /// Set the leading edge and extent along `axis`.
    pub fn set_span(&mut self, axis: Axis, start: i32, length: i32) {
        match axis {
            Axis::Horizontal => {
                self.x = start;
                self.width = length;
            }
            Axis::Vertical => {
                self.y = start;
                self.height = length;
            }
        }
    }

    /// Shrink by the given margins. The size never goes below zero.
    pub fn inset(&self, margins: &Margins) -> Rect {
        Rect::new(
            self.x + margins.left,
            self.y + margins.top,
            (self.width - margins.horizontal()).max(0),
            (self.height - margins.vertical()).max(0),
        )
    }
}

/// Space around a box (or inside a container) on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Margins {
    /// No margins.
    pub const ZERO: Margins = Margins::new(0, 0, 0, 0);

    /// Create margins in top, left, bottom, right order.
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Same margin on every side.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Horizontal margins on the left and right, vertical on top and bottom.
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal margin.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical margin.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Leading and trailing margin along `axis`.
    pub fn along(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }

    /// Total margin along `axis`.
    pub fn total(&self, axis: Axis) -> i32 {
        let (begin, end) = self.along(axis);
        begin + end
    }

    /// Apply a pixel-density transform to every side.
    pub fn scaled(&self, scale: &Scale) -> Margins {
        Margins::new(
            scale.scale(self.top),
            scale.scale(self.left),
            scale.scale(self.bottom),
            scale.scale(self.right),
        )
    }
}

/// Placement of a box within the space allotted to it on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Leading edge (left or top)
    #[default]
    Begin,
    /// Centered
    Middle,
    /// Trailing edge (right or bottom)
    End,
    /// Stretch over the available space
    Fill,
}

impl Alignment {
    /// Resolve an offset and extent for a box of `natural` size inside
    /// `available` space. `Fill` stretches but stops at `maximum`.
    ///
    /// The returned extent never exceeds `available` and is never negative.
    pub fn place(self, available: i32, natural: i32, maximum: i32) -> (i32, i32) {
        let available = available.max(0);
        let size = natural.clamp(0, available);
        match self {
            Alignment::Begin => (0, size),
            Alignment::Middle => ((available - size) / 2, size),
            Alignment::End => (available - size, size),
            Alignment::Fill => (0, available.min(maximum.max(0))),
        }
    }

    /// Whether this alignment stretches the box.
    pub fn is_fill(self) -> bool {
        matches!(self, Alignment::Fill)
    }
}
