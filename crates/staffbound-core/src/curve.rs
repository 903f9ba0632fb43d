//! BoundaryCurve - separating polyline between staves
//!
//! A boundary curve is an ordered list of integer `(x, y)` page
//! coordinates whose x values never decrease. A complete page boundary
//! starts at `x = 0` and ends at `x = page_width`.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors, so callers that only
//! need one axis (for example row lookups during masking) can borrow it
//! directly.

use crate::error::{Error, Result};

/// Monotone-in-x polyline in page coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryCurve {
    x: Vec<u32>,
    y: Vec<u32>,
}

impl BoundaryCurve {
    /// Create a new empty curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a curve with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Two-point horizontal line from `x = 0` to `x = width` at row `y`.
    pub fn straight(width: u32, y: u32) -> Self {
        Self {
            x: vec![0, width],
            y: vec![y, y],
        }
    }

    /// Build a curve from points, checking that x never decreases.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonMonotoneCurve`] at the first decreasing x.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut curve = Self::new();
        for (x, y) in points {
            curve.push(x, y)?;
        }
        Ok(curve)
    }

    /// Append a point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonMonotoneCurve`] if `x` is left of the last point.
    pub fn push(&mut self, x: u32, y: u32) -> Result<()> {
        if let Some(&prev) = self.x.last()
            && x < prev
        {
            return Err(Error::NonMonotoneCurve {
                index: self.x.len(),
                prev,
                x,
            });
        }
        self.x.push(x);
        self.y.push(y);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Get a point by index.
    pub fn get(&self, index: usize) -> Option<(u32, u32)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    pub fn first(&self) -> Option<(u32, u32)> {
        self.get(0)
    }

    pub fn last(&self) -> Option<(u32, u32)> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn xs(&self) -> &[u32] {
        &self.x
    }

    pub fn ys(&self) -> &[u32] {
        &self.y
    }

    /// Iterate over `(x, y)` points in order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Whether the curve runs from `x = 0` to `x = width`.
    pub fn spans(&self, width: u32) -> bool {
        matches!((self.first(), self.last()), (Some((0, _)), Some((xe, _))) if xe == width)
    }

    /// Whether every point lies on one row.
    pub fn is_straight(&self) -> bool {
        self.y.windows(2).all(|w| w[0] == w[1])
    }

    pub fn min_y(&self) -> Option<u32> {
        self.y.iter().copied().min()
    }

    pub fn max_y(&self) -> Option<u32> {
        self.y.iter().copied().max()
    }

    /// Row of the curve at column `x`, linearly interpolated between
    /// neighboring points and clamped to the end points outside the curve.
    ///
    /// Returns `None` for an empty curve.
    pub fn y_at(&self, x: f32) -> Option<f32> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        if x <= self.x[0] as f32 {
            return Some(self.y[0] as f32);
        }
        if x >= self.x[n - 1] as f32 {
            return Some(self.y[n - 1] as f32);
        }
        // First point strictly right of x; exists because x < last x.
        let i = self.x.partition_point(|&px| px as f32 <= x);
        let (x0, y0) = (self.x[i - 1] as f32, self.y[i - 1] as f32);
        let (x1, y1) = (self.x[i] as f32, self.y[i] as f32);
        if x1 == x0 {
            return Some(y1);
        }
        Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }
}
