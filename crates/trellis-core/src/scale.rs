//! Pixel-density transform applied to configured values.
//!
//! Margins, gaps, hints and explicit minimums are written in unscaled
//! pixels. Containers run each of them through their [`Scale`] before doing
//! any arithmetic with the sizes boxes report.

use std::fmt;
use std::sync::Arc;

/// A pure `i32 -> i32` pixel transform supplied by the caller.
#[derive(Clone)]
pub struct Scale {
    transform: Arc<dyn Fn(i32) -> i32 + Send + Sync>,
    label: &'static str,
}

impl Scale {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            transform: Arc::new(|value| value),
            label: "identity",
        }
    }

    /// Scale by a percentage, rounding half away from zero.
    pub fn percent(percent: u32) -> Self {
        let factor = i64::from(percent);
        Self {
            transform: Arc::new(move |value| {
                let scaled = i64::from(value) * factor;
                let rounded = if scaled >= 0 { (scaled + 50) / 100 } else { (scaled - 50) / 100 };
                rounded.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }),
            label: "percent",
        }
    }

    /// Wrap an arbitrary caller-supplied transform.
    pub fn from_fn<F>(transform: F) -> Self
    where
        F: Fn(i32) -> i32 + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
            label: "custom",
        }
    }

    /// Apply the transform.
    pub fn scale(&self, value: i32) -> i32 {
        (self.transform)(value)
    }

    /// Apply the transform to an optional value.
    pub fn scale_opt(&self, value: Option<i32>) -> Option<i32> {
        value.map(|v| self.scale(v))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scale").field(&self.label).finish()
    }
}
