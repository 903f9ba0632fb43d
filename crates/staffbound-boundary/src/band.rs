//! Empty-band detection
//!
//! Most gaps between staves contain at least one page row with no ink at
//! all. Such a row is a perfect boundary, and finding it only needs row
//! ink counts, so it is tried before any distance-field work.

use staffbound_core::{Bitmap, BoundaryCurve};

/// Maximal run of ink-free rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyBand {
    /// First row of the run (page coordinates)
    pub start: u32,
    /// Number of rows in the run
    pub len: u32,
}

impl EmptyBand {
    /// Middle row; the upper one for an even-length run.
    pub fn mid_row(&self) -> u32 {
        self.start + (self.len - 1) / 2
    }

    /// Two-point boundary across the page at the middle row.
    pub fn to_curve(&self, page_width: u32) -> BoundaryCurve {
        BoundaryCurve::straight(page_width, self.mid_row())
    }
}

/// Longest run of ink-free rows in `[y0, y1)`; ties go to the topmost run.
///
/// Returns `None` when every row of the window holds ink or the window is
/// empty.
pub fn find_empty_band(bitmap: &Bitmap, y0: u32, y1: u32) -> Option<EmptyBand> {
    let counts = bitmap.row_ink_counts(y0..y1);
    let mut best: Option<EmptyBand> = None;
    let mut run_start: Option<usize> = None;

    // A trailing sentinel closes a run that reaches the window end.
    for (i, &count) in counts.iter().chain(std::iter::once(&1)).enumerate() {
        match (count == 0, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                let band = EmptyBand {
                    start: y0 + start as u32,
                    len: (i - start) as u32,
                };
                if best.is_none_or(|b| band.len > b.len) {
                    best = Some(band);
                }
                run_start = None;
            }
            _ => {}
        }
    }
    best
}

/// Straight boundary through the widest empty band of `[y0, y1)`, if any.
pub fn trivial_boundary(bitmap: &Bitmap, y0: u32, y1: u32) -> Option<BoundaryCurve> {
    find_empty_band(bitmap, y0, y1).map(|band| band.to_curve(bitmap.width()))
}
