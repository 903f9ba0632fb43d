//! Distance field
//!
//! Approximates, on a downscaled grid, the taxicab distance from every cell
//! to the nearest ink cell.
//!
//! # Algorithm Overview
//!
//! 1. **Rasterize**: each field cell covers a `scale x scale` block of page
//!    pixels. A cell with any ink in its block starts at 0, every other
//!    cell at the saturation value. Page content past the field is dropped.
//!
//! 2. **Relax**: a fixed number of passes, each replacing every cell by the
//!    minimum of itself and its four neighbors plus one. Passes read the
//!    previous buffer and write a new one, so a pass is one backend
//!    dispatch.
//!
//! After `n` passes a cell holds `min(L1 distance, n, saturation)`. The
//! field only steers the path search, so distances beyond the pass count
//! are left saturated.

use crate::error::BoundaryResult;
use crate::options::BoundaryOptions;
use log::{debug, warn};
use staffbound_compute::{GridBackend, GridShape};
use staffbound_core::{Bitmap, IntGrid};
use std::time::Instant;

/// Downscaled distance-to-ink grid of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    grid: IntGrid,
    scale: f32,
    saturation: i32,
}

impl DistanceField {
    /// Rasterize `bitmap` and relax it into a distance field.
    pub fn build(
        bitmap: &Bitmap,
        options: &BoundaryOptions,
        backend: &dyn GridBackend,
    ) -> BoundaryResult<Self> {
        let started = Instant::now();
        let mut current = rasterize(bitmap, options, backend)?;
        let mut next = IntGrid::new(current.width(), current.height())?;
        for _ in 0..options.relax_iterations {
            relax_pass(&current, &mut next, backend)?;
            std::mem::swap(&mut current, &mut next);
        }
        debug!(
            "distance field {}x{} ({} passes, {} backend) in {:.1} ms",
            current.width(),
            current.height(),
            options.relax_iterations,
            backend.name(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(Self {
            grid: current,
            scale: options.dt_scale,
            saturation: options.saturation,
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Page pixels per cell.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn saturation(&self) -> i32 {
        self.saturation
    }

    pub fn grid(&self) -> &IntGrid {
        &self.grid
    }

    pub fn into_grid(self) -> IntGrid {
        self.grid
    }

    /// Cell value, or `None` outside the field.
    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        self.grid.get(x, y)
    }

    /// Cell value with cells outside the field reading as saturated.
    #[inline]
    pub fn distance_at(&self, x: i64, y: i64) -> i32 {
        if x < 0 || y < 0 {
            return self.saturation;
        }
        self.grid.get(x as u32, y as u32).unwrap_or(self.saturation)
    }
}

/// Initial field: 0 on cells whose page block holds ink, saturation elsewhere.
pub fn rasterize(
    bitmap: &Bitmap,
    options: &BoundaryOptions,
    backend: &dyn GridBackend,
) -> BoundaryResult<IntGrid> {
    let (fw, fh) = (options.field_width, options.field_height);
    let scale = options.dt_scale;
    let saturation = options.saturation;
    if bitmap.width() as f32 > fw as f32 * scale || bitmap.height() as f32 > fh as f32 * scale {
        warn!(
            "page {}x{} exceeds distance field coverage {}x{} at scale {}; clipping",
            bitmap.width(),
            bitmap.height(),
            fw,
            fh,
            scale
        );
    }

    let mut grid = IntGrid::new(fw, fh)?;
    let (pw, ph) = (bitmap.width(), bitmap.height());
    // Cell c covers page pixels floor(c * scale) .. floor((c + 1) * scale),
    // at least one pixel wide.
    let block = |c: usize| {
        let start = (c as f32 * scale) as u32;
        let end = (((c + 1) as f32 * scale) as u32).max(start + 1);
        (start, end - start)
    };
    backend.map_grid_i32(
        GridShape::new(fw as usize, fh as usize),
        grid.data_mut(),
        &|x, y| {
            let (px, pw_block) = block(x);
            let (py, ph_block) = block(y);
            if px < pw && py < ph && bitmap.any_ink_in_rect(px, py, pw_block, ph_block) {
                0
            } else {
                saturation
            }
        },
    )?;
    Ok(grid)
}

/// One relaxation pass from `src` into `dst`.
pub fn relax_pass(
    src: &IntGrid,
    dst: &mut IntGrid,
    backend: &dyn GridBackend,
) -> BoundaryResult<()> {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let data = src.data();
    backend.map_grid_i32(GridShape::new(w, h), dst.data_mut(), &|x, y| {
        let i = y * w + x;
        let mut d = data[i];
        if x > 0 {
            d = d.min(data[i - 1] + 1);
        }
        if x + 1 < w {
            d = d.min(data[i + 1] + 1);
        }
        if y > 0 {
            d = d.min(data[i - w] + 1);
        }
        if y + 1 < h {
            d = d.min(data[i + w] + 1);
        }
        d
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffbound_compute::SerialBackend;

    fn small_options(w: u32, h: u32) -> BoundaryOptions {
        BoundaryOptions::new()
            .with_dt_scale(1.0)
            .with_field_size(w, h)
            .with_saturation(64)
    }

    #[test]
    fn test_single_ink_pixel_gives_taxicab_distance() {
        let mut bm = Bitmap::new(21, 21).unwrap();
        bm.set_pixel(10, 10, 1).unwrap();
        let backend = SerialBackend::new();
        let field = DistanceField::build(&bm, &small_options(21, 21), &backend).unwrap();
        for y in 0..21u32 {
            for x in 0..21u32 {
                let expected = (x as i32 - 10).abs() + (y as i32 - 10).abs();
                assert_eq!(field.get(x, y), Some(expected), "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_iterations_cap_distance() {
        let mut bm = Bitmap::new(40, 1).unwrap();
        bm.set_pixel(0, 0, 1).unwrap();
        let opts = small_options(40, 1).with_relax_iterations(5);
        let field = DistanceField::build(&bm, &opts, &SerialBackend::new()).unwrap();
        assert_eq!(field.get(3, 0), Some(3));
        assert_eq!(field.get(5, 0), Some(5));
        assert_eq!(field.get(6, 0), Some(64));
    }

    #[test]
    fn test_blank_page_saturates() {
        let bm = Bitmap::new(8, 8).unwrap();
        let backend = SerialBackend::new();
        let field = DistanceField::build(&bm, &small_options(8, 8), &backend).unwrap();
        assert_eq!(field.grid().min(), 64);
        assert_eq!(field.distance_at(-1, 3), 64);
    }

    #[test]
    fn test_area_sampling_keeps_odd_pixels() {
        // An ink pixel at an odd column must survive 2x downscaling.
        let mut bm = Bitmap::new(8, 8).unwrap();
        bm.set_pixel(5, 3, 1).unwrap();
        let opts = BoundaryOptions::new()
            .with_field_size(4, 4)
            .with_relax_iterations(0);
        let grid = rasterize(&bm, &opts, &SerialBackend::new()).unwrap();
        assert_eq!(grid.get(2, 1), Some(0));
        assert_eq!(grid.data().iter().filter(|&&v| v == 0).count(), 1);
    }

    #[test]
    fn test_cells_past_page_are_blank() {
        let mut bm = Bitmap::new(4, 4).unwrap();
        bm.fill_rect(0, 0, 4, 4, 1);
        let opts = BoundaryOptions::new()
            .with_field_size(6, 6)
            .with_relax_iterations(0);
        let grid = rasterize(&bm, &opts, &SerialBackend::new()).unwrap();
        assert_eq!(grid.get(1, 1), Some(0));
        assert_eq!(grid.get(2, 2), Some(64));
    }

    #[test]
    fn test_pass_never_increases() {
        let mut bm = Bitmap::new(16, 16).unwrap();
        bm.fill_rect(3, 7, 5, 2, 1);
        let opts = small_options(16, 16).with_relax_iterations(0);
        let backend = SerialBackend::new();
        let mut current = rasterize(&bm, &opts, &backend).unwrap();
        let mut next = IntGrid::new(16, 16).unwrap();
        for _ in 0..10 {
            relax_pass(&current, &mut next, &backend).unwrap();
            assert!(next.data().iter().zip(current.data()).all(|(n, c)| n <= c));
            std::mem::swap(&mut current, &mut next);
        }
    }
}
