//! Search-window selection
//!
//! The boundary for gap `i` lies between staff `i - 1` (above) and staff
//! `i` (below), keeping `clearance * staff_dist` rows away from both. The
//! primary window uses the outermost rows of the neighboring staves; when
//! that leaves no room (tightly packed or skewed staves) the sides that
//! have a neighbor are recomputed from the staff medians instead, which
//! gives up part of the clearance.

use crate::error::{BoundaryError, BoundaryResult};
use crate::geometry::{Staff, StaffGeometry};

/// Which rule produced a search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Staff extrema with full clearance
    Primary,
    /// Staff medians
    Fallback,
}

/// Vertical band `[y0, y1)` of page rows a boundary is searched in.
///
/// Always non-empty and inside the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub gap: usize,
    pub y0: u32,
    pub y1: u32,
    pub kind: WindowKind,
}

impl SearchWindow {
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Outcome of the two-stage window policy, in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBounds {
    Primary { y0: i64, y1: i64 },
    Fallback { y0: i64, y1: i64 },
    /// Both stages produced `y0 >= y1`; holds the fallback bounds
    Unrepresentable { y0: i64, y1: i64 },
}

impl WindowBounds {
    /// Convert to a window, failing loudly on an unrepresentable one.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::DegenerateWindow`] for
    /// [`WindowBounds::Unrepresentable`].
    pub fn into_window(self, gap: usize) -> BoundaryResult<SearchWindow> {
        let (y0, y1, kind) = match self {
            WindowBounds::Primary { y0, y1 } => (y0, y1, WindowKind::Primary),
            WindowBounds::Fallback { y0, y1 } => (y0, y1, WindowKind::Fallback),
            WindowBounds::Unrepresentable { y0, y1 } => {
                return Err(BoundaryError::DegenerateWindow { gap, y0, y1 });
            }
        };
        Ok(SearchWindow {
            gap,
            y0: y0 as u32,
            y1: y1 as u32,
            kind,
        })
    }
}

/// Apply the window policy to gap `gap` of a page `page_height` rows tall.
///
/// # Errors
///
/// Returns [`BoundaryError::GapOutOfRange`] if `gap > num_staves`.
pub fn select_window(
    geometry: &StaffGeometry,
    gap: usize,
    page_height: u32,
    clearance: u32,
) -> BoundaryResult<WindowBounds> {
    let staves = geometry.staves();
    if gap > staves.len() {
        return Err(BoundaryError::GapOutOfRange {
            gap,
            gaps: geometry.num_gaps(),
        });
    }
    let above = gap.checked_sub(1).map(|i| &staves[i]);
    let below = staves.get(gap);
    let margin = clearance as i64 * geometry.staff_dist as i64;
    let height = page_height as i64;

    let bounds = |top: fn(&Staff) -> u32, bottom: fn(&Staff) -> u32| {
        let y0 = above.map_or(0, |s| (top(s) as i64 + margin).max(0));
        let y1 = below.map_or(height, |s| (bottom(s) as i64 - margin).min(height));
        (y0, y1)
    };

    let (y0, y1) = bounds(Staff::max_row, Staff::min_row);
    if y0 < y1 {
        return Ok(WindowBounds::Primary { y0, y1 });
    }
    let (y0, y1) = bounds(Staff::median_row, Staff::median_row);
    if y0 < y1 {
        Ok(WindowBounds::Fallback { y0, y1 })
    } else {
        Ok(WindowBounds::Unrepresentable { y0, y1 })
    }
}

/// Candidate row the path is anchored at: the bottom row above the first
/// staff, the top row below the last staff, the middle row elsewhere.
pub fn anchor_row(gap: usize, num_staves: usize, numy: usize) -> usize {
    if gap == 0 {
        numy.saturating_sub(1)
    } else if gap == num_staves {
        0
    } else {
        numy / 2
    }
}
