//! End-to-end boundary regression test
//!
//! A 2048x256 page with two five-line staves (rows 50-70 and 150-170,
//! spacing 5). The gap between them is searched in rows 80..140; a brace
//! drawn in the left margin limits the ink-free rows inside that window.

use staffbound_boundary::{
    BoundaryError, BoundaryOptions, BoundarySource, Page, StaffGeometry, find_boundaries,
};
use staffbound_compute::{GridBackend, SerialBackend};
use staffbound_core::BoundaryCurve;
use staffbound_test::{RegParams, ScorePageBuilder, SyntheticScore};

const WIDTH: u32 = 2048;
const HEIGHT: u32 = 256;

fn two_staves() -> ScorePageBuilder {
    ScorePageBuilder::new(WIDTH, HEIGHT)
        .staff_dist(5)
        .staff_thick(1)
        .staff_at(50)
        .staff_at(150)
}

fn geometry(score: &SyntheticScore) -> StaffGeometry {
    let rows = score.staff_rows.clone();
    StaffGeometry::from_rows(rows, score.staff_dist, score.staff_thick).unwrap()
}

fn options() -> BoundaryOptions {
    BoundaryOptions::new().with_field_for_page(WIDTH, HEIGHT)
}

/// Rows 90..=130 blank across the page.
fn blank_band_page() -> SyntheticScore {
    two_staves().mark(0, 80, 4, 10).mark(0, 131, 4, 9).build().unwrap()
}

/// Only rows 110 and 111 are blank, and a speck at column 1024 covers both.
fn speck_page() -> SyntheticScore {
    two_staves()
        .mark(0, 80, 4, 30)
        .mark(0, 112, 4, 28)
        .mark(1024, 110, 1, 2)
        .build()
        .unwrap()
}

fn check_curve(rp: &mut RegParams, curve: &BoundaryCurve) {
    rp.compare_values(1.0, if curve.spans(WIDTH) { 1.0 } else { 0.0 }, 0.0);
    let monotone = curve.xs().windows(2).all(|w| w[0] <= w[1]);
    rp.compare_values(1.0, if monotone { 1.0 } else { 0.0 }, 0.0);
}

#[test]
fn boundary_reg_blank_band() {
    let mut rp = RegParams::new("boundary_blank");

    let score = blank_band_page();
    let geometry = geometry(&score);
    let backend = SerialBackend::new();
    let page = find_boundaries(&score.bitmap, &geometry, &options(), &backend).unwrap();

    rp.compare_values(3.0, page.len() as f64, 0.0);
    for gap in page.gaps() {
        check_curve(&mut rp, &gap.curve);
        rp.compare_values(1.0, if gap.is_trivial() { 1.0 } else { 0.0 }, 0.0);
    }

    // Midpoints: 0..40 -> 19, 90..=130 -> 110, 180..256 -> 217
    let expected = [19, 110, 217];
    for (gap, &row) in page.gaps().iter().zip(&expected) {
        rp.compare_curves(&BoundaryCurve::straight(WIDTH, row), &gap.curve);
    }
    let middle = page.get(1).unwrap();
    assert_eq!(
        middle.source,
        BoundarySource::EmptyBand {
            start: 90,
            len: 41
        }
    );

    // The costed path never ran.
    rp.compare_values(0.0, backend.dispatch_count() as f64, 0.0);
    rp.compare_values(1.0, if page.distance_field().is_none() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "boundary_blank regression test failed");
}

#[test]
fn boundary_reg_speck_forces_costed_path() {
    let mut rp = RegParams::new("boundary_speck");

    let score = speck_page();
    let geometry = geometry(&score);
    let backend = SerialBackend::new();
    let opts = options();
    let page = find_boundaries(&score.bitmap, &geometry, &opts, &backend).unwrap();

    rp.compare_values(1.0, if page.get(0).unwrap().is_trivial() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if page.get(2).unwrap().is_trivial() { 1.0 } else { 0.0 }, 0.0);

    let middle = page.get(1).unwrap();
    assert!(matches!(middle.source, BoundarySource::Costed { .. }));
    let curve = &middle.curve;
    check_curve(&mut rp, curve);
    eprintln!(
        "costed curve: {} points, rows {:?}..{:?}",
        curve.len(),
        curve.min_y(),
        curve.max_y()
    );

    // 1024 sampled columns plus the point at the page edge.
    rp.compare_values(1025.0, curve.len() as f64, 0.0);
    rp.compare_values(110.0, curve.first().unwrap().1 as f64, 0.0);
    rp.compare_values(110.0, curve.last().unwrap().1 as f64, 0.0);

    // Away from the speck the path holds row 110; near it, it detours.
    let far_off_row = curve
        .iter()
        .filter(|&(x, y)| x.abs_diff(1024) > 128 && y != 110)
        .count();
    rp.compare_values(0.0, far_off_row as f64, 0.0);
    let detour = curve
        .iter()
        .any(|(x, y)| x.abs_diff(1024) <= 128 && y != 110);
    rp.compare_values(1.0, if detour { 1.0 } else { 0.0 }, 0.0);

    // One field (rasterize plus every pass) and one tensor.
    let field = page.distance_field().unwrap();
    rp.compare_values(0.0, field.get(512, 55).unwrap() as f64, 0.0);
    rp.compare_values(
        (opts.relax_iterations + 2) as f64,
        backend.dispatch_count() as f64,
        0.0,
    );
    rp.write_grid_png(field.grid(), field.saturation()).unwrap();

    assert!(rp.cleanup(), "boundary_speck regression test failed");
}

#[test]
fn boundary_reg_page_root() {
    let score = speck_page();
    let geometry = geometry(&score);
    let mut page = Page::new(score.bitmap, geometry);
    let backend = SerialBackend::new();

    page.find_boundaries(&options(), &backend).unwrap();
    let dispatches = backend.dispatch_count();
    page.find_boundaries(&options(), &backend).unwrap();
    assert_eq!(backend.dispatch_count(), dispatches);

    // Staff 0 sits between boundaries 0 and 1.
    let region = page.staff_region(0, 0).unwrap();
    assert_eq!((region.top, region.bottom), (19.0, 110.0));
    for row in [50.0, 60.0, 70.0] {
        assert!(region.contains(row));
    }
    let lower = page.staff_region(1, 2047).unwrap();
    assert!(lower.contains(160.0));
    assert!(page.staff_region(2, 0).is_none());
}

#[test]
fn boundary_reg_zero_thickness() {
    let score = speck_page();
    let geometry = StaffGeometry::from_rows(score.staff_rows.clone(), 5, 0).unwrap();
    let result = find_boundaries(&score.bitmap, &geometry, &options(), &SerialBackend::new());
    assert!(matches!(result, Err(BoundaryError::InvalidStep { .. })));
}

#[cfg(feature = "parallel")]
#[test]
fn boundary_reg_backends_agree() {
    use staffbound_compute::RayonBackend;

    let score = speck_page();
    let geometry = geometry(&score);
    let backend = SerialBackend::new();
    let serial = find_boundaries(&score.bitmap, &geometry, &options(), &backend).unwrap();
    let rayon = RayonBackend::with_threads(4).unwrap();
    let parallel = find_boundaries(&score.bitmap, &geometry, &options(), &rayon).unwrap();
    assert_eq!(serial, parallel);
    assert!(rayon.plan_cache().len() >= 2);
}
