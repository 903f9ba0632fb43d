//! Bitmap - binarized page image
//!
//! A `Bitmap` is the 1-bpp page handed over by staff detection. Ink
//! (foreground) pixels have value 1, paper (background) pixels value 0.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//!
//! Row ink counts are computed a word at a time with `count_ones`, which
//! is what makes the empty-band scan cheap enough to run before any
//! distance-field work.

use crate::error::{Error, Result};
use std::ops::Range;

/// Binarized page image, 1 bit per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    /// 32-bit words per line
    wpl: u32,
    data: Vec<u32>,
}

impl Bitmap {
    /// Create a blank (all paper) bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = width.div_ceil(32);
        let data = vec![0u32; wpl as usize * height as usize];
        Ok(Self {
            width,
            height,
            wpl,
            data,
        })
    }

    /// Build a bitmap from one byte per pixel, row-major; any non-zero byte
    /// is ink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `bytes.len() != width * height`.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut bitmap = Self::new(width, height)?;
        let expected = width as usize * height as usize;
        if bytes.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        for (y, row) in bytes.chunks_exact(width as usize).enumerate() {
            for (x, &b) in row.iter().enumerate() {
                if b != 0 {
                    bitmap.set_pixel_unchecked(x as u32, y as u32, 1);
                }
            }
        }
        Ok(bitmap)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.wpl
    }

    /// Raw packed words of one row.
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.wpl) as usize;
        &self.data[start..start + self.wpl as usize]
    }

    /// Get a pixel value, or `None` outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking the coordinate against
    /// the image width.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let word = self.data[(y * self.wpl + (x >> 5)) as usize];
        (word >> (31 - (x & 31))) & 1
    }

    /// Whether the pixel at `(x, y)` is ink. Coordinates outside the image
    /// are paper.
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y) == Some(1)
    }

    /// Set a pixel; any non-zero `val` is stored as ink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let idx = (y * self.wpl + (x >> 5)) as usize;
        let mask = 1u32 << (31 - (x & 31));
        if val != 0 {
            self.data[idx] |= mask;
        } else {
            self.data[idx] &= !mask;
        }
    }

    /// Set every pixel of a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, val: u32) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for yy in y..y_end {
            for xx in x..x_end {
                self.set_pixel_unchecked(xx, yy, val);
            }
        }
    }

    /// Number of ink pixels in row `y`.
    ///
    /// Padding bits past the image width are never set, so whole words can
    /// be counted.
    pub fn row_ink_count(&self, y: u32) -> u32 {
        self.row_data(y).iter().map(|w| w.count_ones()).sum()
    }

    /// Ink counts for each row of `rows`, clipped to the image height.
    pub fn row_ink_counts(&self, rows: Range<u32>) -> Vec<u32> {
        let end = rows.end.min(self.height);
        (rows.start.min(end)..end)
            .map(|y| self.row_ink_count(y))
            .collect()
    }

    /// Total number of ink pixels.
    pub fn count_ink(&self) -> u64 {
        self.data.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Whether any pixel of the rectangle is ink (clipped to the image).
    pub fn any_ink_in_rect(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        (y..y_end).any(|yy| (x..x_end).any(|xx| self.get_pixel_unchecked(xx, yy) != 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(Bitmap::new(0, 10).is_err());
        assert!(Bitmap::new(10, 0).is_err());
    }

    #[test]
    fn test_set_get_pixel_across_word_boundary() {
        let mut bm = Bitmap::new(70, 3).unwrap();
        assert_eq!(bm.wpl(), 3);
        bm.set_pixel(31, 1, 1).unwrap();
        bm.set_pixel(32, 1, 1).unwrap();
        bm.set_pixel(69, 2, 1).unwrap();
        assert_eq!(bm.get_pixel(31, 1), Some(1));
        assert_eq!(bm.get_pixel(32, 1), Some(1));
        assert_eq!(bm.get_pixel(30, 1), Some(0));
        assert_eq!(bm.get_pixel(69, 2), Some(1));
        assert_eq!(bm.get_pixel(70, 2), None);
        bm.set_pixel(31, 1, 0).unwrap();
        assert_eq!(bm.get_pixel(31, 1), Some(0));
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut bm = Bitmap::new(8, 8).unwrap();
        assert!(bm.set_pixel(8, 0, 1).is_err());
    }

    #[test]
    fn test_row_ink_counts() {
        let mut bm = Bitmap::new(100, 5).unwrap();
        bm.fill_rect(0, 1, 100, 1, 1);
        bm.fill_rect(40, 3, 10, 2, 1);
        assert_eq!(bm.row_ink_counts(0..5), vec![0, 100, 0, 10, 10]);
        assert_eq!(bm.row_ink_counts(3..9), vec![10, 10]);
        assert_eq!(bm.count_ink(), 120);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut bm = Bitmap::new(10, 10).unwrap();
        bm.fill_rect(8, 8, 5, 5, 1);
        assert_eq!(bm.count_ink(), 4);
        assert!(bm.any_ink_in_rect(9, 9, 3, 3));
        assert!(!bm.any_ink_in_rect(0, 0, 8, 8));
    }

    #[test]
    fn test_from_bytes() {
        let bytes = [0u8, 1, 0, 0, 0, 255];
        let bm = Bitmap::from_bytes(3, 2, &bytes).unwrap();
        assert!(bm.is_ink(1, 0));
        assert!(bm.is_ink(2, 1));
        assert!(!bm.is_ink(0, 0));
        assert!(Bitmap::from_bytes(3, 3, &bytes).is_err());
    }
}
