//! Staff geometry consumed from staff detection

use crate::error::{BoundaryError, BoundaryResult};

/// Row positions sampled along one staff.
///
/// Staff detection reports each staff as a set of rows (one per line, or
/// one per line and horizontal sample on skewed pages). Only their
/// extremes and median matter here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    rows: Vec<u32>,
}

impl Staff {
    /// # Errors
    ///
    /// Returns [`BoundaryError::InvalidGeometry`] if `rows` is empty.
    pub fn new(mut rows: Vec<u32>) -> BoundaryResult<Self> {
        if rows.is_empty() {
            return Err(BoundaryError::InvalidGeometry(
                "staff has no rows".to_string(),
            ));
        }
        rows.sort_unstable();
        Ok(Self { rows })
    }

    /// Sorted row positions.
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn min_row(&self) -> u32 {
        self.rows[0]
    }

    pub fn max_row(&self) -> u32 {
        self.rows[self.rows.len() - 1]
    }

    /// Median row; for an even count, the floor of the mean of the two
    /// middle rows.
    pub fn median_row(&self) -> u32 {
        let n = self.rows.len();
        if n % 2 == 1 {
            self.rows[n / 2]
        } else {
            let (a, b) = (self.rows[n / 2 - 1] as u64, self.rows[n / 2] as u64);
            ((a + b) / 2) as u32
        }
    }
}

/// Staves of one page with the page-level staff metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffGeometry {
    staves: Vec<Staff>,
    /// Vertical distance between adjacent staff lines
    pub staff_dist: u32,
    /// Stroke width of a staff line
    pub staff_thick: u32,
}

impl StaffGeometry {
    /// # Errors
    ///
    /// Returns [`BoundaryError::InvalidGeometry`] if the staves are not
    /// ordered top to bottom.
    pub fn new(staves: Vec<Staff>, staff_dist: u32, staff_thick: u32) -> BoundaryResult<Self> {
        if let Some(i) = staves
            .windows(2)
            .position(|w| w[1].median_row() < w[0].median_row())
        {
            return Err(BoundaryError::InvalidGeometry(format!(
                "staff {} lies above staff {}",
                i + 1,
                i
            )));
        }
        Ok(Self {
            staves,
            staff_dist,
            staff_thick,
        })
    }

    /// Build from one row list per staff.
    pub fn from_rows(
        rows: Vec<Vec<u32>>,
        staff_dist: u32,
        staff_thick: u32,
    ) -> BoundaryResult<Self> {
        let staves = rows
            .into_iter()
            .map(Staff::new)
            .collect::<BoundaryResult<Vec<_>>>()?;
        Self::new(staves, staff_dist, staff_thick)
    }

    pub fn staves(&self) -> &[Staff] {
        &self.staves
    }

    pub fn num_staves(&self) -> usize {
        self.staves.len()
    }

    /// One gap above every staff plus one below the last.
    pub fn num_gaps(&self) -> usize {
        self.staves.len() + 1
    }
}
