//! Distance field regression test
//!
//! Checks the field against exact taxicab distances, its determinism, and
//! agreement between backends.

use staffbound_boundary::{BoundaryOptions, DistanceField};
use staffbound_compute::SerialBackend;
use staffbound_core::{Bitmap, IntGrid};
use staffbound_test::{RegParams, ScorePageBuilder};

fn score_bitmap() -> Bitmap {
    ScorePageBuilder::new(512, 128)
        .staff_dist(6)
        .staff_at(20)
        .staff_at(80)
        .mark(200, 55, 3, 12)
        .speck(401, 63)
        .build()
        .unwrap()
        .bitmap
}

/// Brute-force clipped taxicab distance to the nearest ink cell.
fn brute_force(bitmap: &Bitmap, opts: &BoundaryOptions) -> IntGrid {
    let cell = opts.dt_scale as u32;
    let (fw, fh) = (opts.field_width, opts.field_height);
    let mut ink = Vec::new();
    for y in 0..fh {
        for x in 0..fw {
            if bitmap.any_ink_in_rect(x * cell, y * cell, cell, cell) {
                ink.push((x as i32, y as i32));
            }
        }
    }
    let cap = opts.saturation.min(opts.relax_iterations as i32);
    let mut grid = IntGrid::new_with_value(fw, fh, opts.saturation).unwrap();
    for y in 0..fh {
        for x in 0..fw {
            let nearest = ink
                .iter()
                .map(|&(ix, iy)| (ix - x as i32).abs() + (iy - y as i32).abs())
                .min();
            if let Some(d) = nearest
                && d <= cap
            {
                grid.set(x, y, d).unwrap();
            }
        }
    }
    grid
}

#[test]
fn distance_reg() {
    let mut rp = RegParams::new("distance");

    let bitmap = score_bitmap();
    let opts = BoundaryOptions::new()
        .with_field_for_page(512, 128)
        .with_relax_iterations(16);
    let backend = SerialBackend::new();

    let field = DistanceField::build(&bitmap, &opts, &backend).unwrap();
    rp.compare_values(256.0, field.width() as f64, 0.0);
    rp.compare_values(64.0, field.height() as f64, 0.0);
    rp.compare_values(0.0, field.grid().min() as f64, 0.0);
    // Farthest cells: the bottom row, 11 cells below the last staff line.
    rp.compare_values(11.0, field.grid().max() as f64, 0.0);

    let expected = brute_force(&bitmap, &opts);
    rp.compare_grids(&expected, field.grid());

    // Same bitmap, same passes: same field.
    let again = DistanceField::build(&bitmap, &opts, &backend).unwrap();
    rp.compare_grids(field.grid(), again.grid());

    rp.write_grid_png(field.grid(), 16).unwrap();

    assert!(rp.cleanup(), "distance regression test failed");
}

#[test]
fn distance_reg_clipped_page() {
    // Field smaller than the page: content past it is dropped.
    let mut bitmap = Bitmap::new(64, 64).unwrap();
    bitmap.set_pixel(60, 60, 1).unwrap();
    let opts = BoundaryOptions::new().with_field_size(16, 16);
    let field = DistanceField::build(&bitmap, &opts, &SerialBackend::new()).unwrap();
    assert_eq!(field.grid().min(), 64);
    assert_eq!(field.distance_at(40, 40), 64);
}

#[cfg(feature = "parallel")]
#[test]
fn distance_reg_backends_agree() {
    use staffbound_compute::RayonBackend;

    let mut rp = RegParams::new("distance_backends");
    let bitmap = score_bitmap();
    let opts = BoundaryOptions::new().with_field_for_page(512, 128);

    let serial = DistanceField::build(&bitmap, &opts, &SerialBackend::new()).unwrap();
    for threads in [1, 3, 8] {
        let rayon = RayonBackend::with_threads(threads).unwrap();
        let parallel = DistanceField::build(&bitmap, &opts, &rayon).unwrap();
        rp.compare_grids(serial.grid(), parallel.grid());
        // One plan for the field shape, reused by every pass.
        rp.compare_values(1.0, rayon.plan_cache().len() as f64, 0.0);
    }

    assert!(rp.cleanup(), "distance_backends regression test failed");
}
