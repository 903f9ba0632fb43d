//! Multi-page processing
//!
//! Pages share no mutable state (the distance field is page-scoped), so a
//! batch runs them independently, in parallel with the `parallel`
//! feature. Results keep the input order.

use crate::assemble::{PageBoundaries, find_boundaries};
use crate::error::BoundaryResult;
use crate::options::BoundaryOptions;
use crate::page::Page;
use log::debug;
use staffbound_compute::GridBackend;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Find the boundaries of every page; one result per page, in order.
///
/// A failing page does not stop the others.
pub fn find_boundaries_batch(
    pages: &[Page],
    options: &BoundaryOptions,
    backend: &dyn GridBackend,
) -> Vec<BoundaryResult<PageBoundaries>> {
    let started = Instant::now();
    let run = |page: &Page| find_boundaries(page.bitmap(), page.geometry(), options, backend);

    #[cfg(feature = "parallel")]
    let results: Vec<_> = pages.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = pages.iter().map(run).collect();

    debug!(
        "batch of {} pages ({} failed) in {:.1} ms",
        pages.len(),
        results.iter().filter(|r| r.is_err()).count(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StaffGeometry;
    use staffbound_compute::SerialBackend;
    use staffbound_core::Bitmap;

    fn page(staff_row: u32, thick: u32) -> Page {
        let mut bm = Bitmap::new(64, 64).unwrap();
        bm.fill_rect(0, staff_row, 64, 1, 1);
        bm.fill_rect(30, 0, 1, 64, 1);
        let geometry = StaffGeometry::from_rows(vec![vec![staff_row]], 2, thick).unwrap();
        Page::new(bm, geometry)
    }

    #[test]
    fn test_results_in_input_order() {
        let mut pages = vec![page(20, 1), page(40, 0), page(30, 1)];
        let opts = BoundaryOptions::new().with_field_for_page(64, 64);
        let results = find_boundaries_batch(&pages, &opts, &SerialBackend::new());
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());

        let first = results[0].as_ref().unwrap();
        let third = results[2].as_ref().unwrap();
        // Top gap anchors at its bottom candidate row: (20 - 4) / 2 - 1 = 7.
        assert_eq!(first.get(0).unwrap().curve.first(), Some((0, 14)));
        assert_eq!(third.get(0).unwrap().curve.first(), Some((0, 24)));

        pages[0].set_boundaries(first.clone());
        assert!(pages[0].staff_region(0, 0).is_some());
    }

    #[test]
    fn test_matches_single_page() {
        let pages = vec![page(20, 1)];
        let opts = BoundaryOptions::new().with_field_for_page(64, 64);
        let backend = SerialBackend::new();
        let batch = find_boundaries_batch(&pages, &opts, &backend);
        let single =
            find_boundaries(pages[0].bitmap(), pages[0].geometry(), &opts, &backend).unwrap();
        assert_eq!(batch[0].as_ref().unwrap(), &single);
    }
}
