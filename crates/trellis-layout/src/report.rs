//! Outcome of a layout or measuring pass.

use trellis_core::{LayoutError, Size};

/// The size a pass used, plus every configuration problem it worked around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub size: Size,
    pub errors: Vec<LayoutError>,
}

impl LayoutReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pass ran without reporting anything.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error and log it.
    pub(crate) fn push(&mut self, error: LayoutError) {
        tracing::warn!(%error, "layout configuration error");
        self.errors.push(error);
    }
}
