//! IntGrid - dense integer grid
//!
//! `IntGrid` is a 2D array of `i32` values used for the downsampled
//! distance field. Unlike [`Bitmap`](crate::Bitmap), which packs pixels
//! into words, `IntGrid` stores one value per cell so kernels can read and
//! write it as a flat slice.
//!
//! # Examples
//!
//! ```
//! use staffbound_core::IntGrid;
//!
//! let mut grid = IntGrid::new_with_value(16, 8, 64).unwrap();
//! grid.set(3, 2, 0).unwrap();
//! assert_eq!(grid.get(3, 2), Some(0));
//! assert_eq!(grid.min(), 0);
//! assert_eq!(grid.max(), 64);
//! ```

use crate::error::{Error, Result};

/// Integer grid
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The cell at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntGrid {
    width: u32,
    height: u32,
    data: Vec<i32>,
}

impl IntGrid {
    /// Create a new grid with all cells set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0)
    }

    /// Create a new grid with all cells set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: i32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a grid from row-major data
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferLength` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<i32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get a cell value, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + x as usize])
    }

    /// Set a cell value.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the coordinate is outside the grid.
    pub fn set(&mut self, x: u32, y: u32, value: i32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[(y as usize) * (self.width as usize) + x as usize] = value;
        Ok(())
    }

    /// One row of the grid.
    pub fn row(&self, y: u32) -> &[i32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    #[inline]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<i32> {
        self.data
    }

    /// Smallest cell value.
    pub fn min(&self) -> i32 {
        self.data.iter().copied().min().unwrap_or(0)
    }

    /// Largest cell value.
    pub fn max(&self) -> i32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}
