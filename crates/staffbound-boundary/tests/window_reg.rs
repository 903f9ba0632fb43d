//! Search window regression test
//!
//! Skewed staves whose extrema overlap must fall back to their medians;
//! staves too close for either rule must fail.

use staffbound_boundary::{
    BoundaryError, BoundaryFinder, BoundaryOptions, StaffGeometry, WindowBounds, WindowKind,
    find_boundaries, select_window,
};
use staffbound_compute::{GridBackend, SerialBackend};
use staffbound_core::Bitmap;
use staffbound_test::RegParams;

/// Two staves drawn as single lines, with geometry sampled on a slant.
fn skewed_page() -> (Bitmap, StaffGeometry) {
    let mut bitmap = Bitmap::new(256, 300).unwrap();
    bitmap.fill_rect(0, 60, 256, 1, 1);
    bitmap.fill_rect(0, 120, 256, 1, 1);
    let geometry =
        StaffGeometry::from_rows(vec![vec![40, 60, 100], vec![80, 120, 140]], 10, 1).unwrap();
    (bitmap, geometry)
}

#[test]
fn window_reg_fallback() {
    let mut rp = RegParams::new("window_fallback");

    let (bitmap, geometry) = skewed_page();
    let bounds = select_window(&geometry, 1, bitmap.height(), 2).unwrap();
    assert_eq!(bounds, WindowBounds::Fallback { y0: 80, y1: 100 });

    let opts = BoundaryOptions::new().with_field_for_page(256, 300);
    let backend = SerialBackend::new();
    let finder = BoundaryFinder::new(&bitmap, &geometry, &opts, &backend).unwrap();
    let windows: Vec<_> = (0..3).map(|gap| finder.window(gap).unwrap()).collect();
    let kind = windows[0].kind;
    rp.compare_values(1.0, if kind == WindowKind::Primary { 1.0 } else { 0.0 }, 0.0);
    let kind = windows[1].kind;
    rp.compare_values(1.0, if kind == WindowKind::Fallback { 1.0 } else { 0.0 }, 0.0);
    let kind = windows[2].kind;
    rp.compare_values(1.0, if kind == WindowKind::Primary { 1.0 } else { 0.0 }, 0.0);
    for window in &windows {
        rp.compare_values(1.0, if window.y0 < window.y1 { 1.0 } else { 0.0 }, 0.0);
    }

    // The fallback window 80..100 is blank: row 89 is its midpoint.
    let page = find_boundaries(&bitmap, &geometry, &opts, &backend).unwrap();
    let rows: Vec<u32> = page.curves().map(|c| c.ys()[0]).collect();
    rp.compare_values(9.0, rows[0] as f64, 0.0);
    rp.compare_values(89.0, rows[1] as f64, 0.0);
    rp.compare_values(229.0, rows[2] as f64, 0.0);
    rp.compare_values(0.0, backend.dispatch_count() as f64, 0.0);

    assert!(rp.cleanup(), "window_fallback regression test failed");
}

#[test]
fn window_reg_degenerate() {
    let bitmap = Bitmap::new(128, 200).unwrap();
    let geometry = StaffGeometry::from_rows(vec![vec![50, 60], vec![70, 80]], 10, 1).unwrap();
    let opts = BoundaryOptions::new().with_field_for_page(128, 200);
    let result = find_boundaries(&bitmap, &geometry, &opts, &SerialBackend::new());
    match result {
        Err(BoundaryError::DegenerateWindow { gap, y0, y1 }) => {
            assert_eq!(gap, 1);
            assert!(y0 >= y1);
        }
        other => panic!("expected a degenerate window, got {other:?}"),
    }
}

#[test]
fn window_reg_gap_range() {
    let (bitmap, geometry) = skewed_page();
    let opts = BoundaryOptions::new().with_field_for_page(256, 300);
    let backend = SerialBackend::new();
    let finder = BoundaryFinder::new(&bitmap, &geometry, &opts, &backend).unwrap();
    assert!(matches!(
        finder.gap_boundary(3),
        Err(BoundaryError::GapOutOfRange { gap: 3, gaps: 3 })
    ));
}
