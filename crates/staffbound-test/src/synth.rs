//! Synthetic score pages
//!
//! Draws full-width staves and rectangular marks onto a blank
//! [`Bitmap`], recording the row of every staff line so tests can build
//! staff geometry without a staff detector.

use crate::error::{TestError, TestResult};
use staffbound_core::Bitmap;

/// A drawn page plus the geometry used to draw it.
#[derive(Debug, Clone)]
pub struct SyntheticScore {
    pub bitmap: Bitmap,
    /// Row of every line, one `Vec` per staff, top to bottom
    pub staff_rows: Vec<Vec<u32>>,
    pub staff_dist: u32,
    pub staff_thick: u32,
}

/// Builder for [`SyntheticScore`].
///
/// # Examples
///
/// ```
/// use staffbound_test::ScorePageBuilder;
///
/// let score = ScorePageBuilder::new(256, 128)
///     .staff_dist(5)
///     .staff_at(20)
///     .build()
///     .unwrap();
/// assert_eq!(score.staff_rows, vec![vec![20, 25, 30, 35, 40]]);
/// assert_eq!(score.bitmap.row_ink_count(25), 256);
/// ```
#[derive(Debug, Clone)]
pub struct ScorePageBuilder {
    width: u32,
    height: u32,
    staff_dist: u32,
    staff_thick: u32,
    lines_per_staff: u32,
    staff_tops: Vec<u32>,
    marks: Vec<(u32, u32, u32, u32)>,
}

impl ScorePageBuilder {
    /// Blank page; five-line staves, spacing 10, thickness 1 by default.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            staff_dist: 10,
            staff_thick: 1,
            lines_per_staff: 5,
            staff_tops: Vec::new(),
            marks: Vec::new(),
        }
    }

    pub fn staff_dist(mut self, dist: u32) -> Self {
        self.staff_dist = dist;
        self
    }

    pub fn staff_thick(mut self, thick: u32) -> Self {
        self.staff_thick = thick;
        self
    }

    pub fn lines_per_staff(mut self, lines: u32) -> Self {
        self.lines_per_staff = lines;
        self
    }

    /// Add a staff whose top line starts at row `top`.
    pub fn staff_at(mut self, top: u32) -> Self {
        self.staff_tops.push(top);
        self
    }

    /// Add a filled ink rectangle.
    pub fn mark(mut self, x: u32, y: u32, w: u32, h: u32) -> Self {
        self.marks.push((x, y, w, h));
        self
    }

    /// Add a single ink pixel.
    pub fn speck(self, x: u32, y: u32) -> Self {
        self.mark(x, y, 1, 1)
    }

    /// Draw the page.
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Synthetic`] if a staff does not fit on the page.
    pub fn build(self) -> TestResult<SyntheticScore> {
        let mut bitmap = Bitmap::new(self.width, self.height)?;
        let mut staff_tops = self.staff_tops.clone();
        staff_tops.sort_unstable();

        let mut staff_rows = Vec::with_capacity(staff_tops.len());
        for top in staff_tops {
            let rows: Vec<u32> = (0..self.lines_per_staff)
                .map(|i| top + i * self.staff_dist)
                .collect();
            if let Some(&last) = rows.last()
                && last + self.staff_thick > self.height
            {
                return Err(TestError::Synthetic(format!(
                    "staff at row {top} runs past page height {}",
                    self.height
                )));
            }
            for &row in &rows {
                bitmap.fill_rect(0, row, self.width, self.staff_thick, 1);
            }
            staff_rows.push(rows);
        }
        for &(x, y, w, h) in &self.marks {
            bitmap.fill_rect(x, y, w, h, 1);
        }

        Ok(SyntheticScore {
            bitmap,
            staff_rows,
            staff_dist: self.staff_dist,
            staff_thick: self.staff_thick,
        })
    }
}
