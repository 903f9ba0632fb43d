//! staffbound-test - Regression test framework for staffbound
//!
//! Provides [`RegParams`], a small regression harness that counts and
//! reports comparisons, and [`ScorePageBuilder`] for drawing synthetic
//! score pages (staves, marks, specks) to run the boundary engine on.
//!
//! # Usage
//!
//! ```ignore
//! use staffbound_test::RegParams;
//!
//! let mut rp = RegParams::new("boundary");
//! rp.compare_values(110.0, row as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to also dump grids as PNG files
//!   under `tests/regout`

mod error;
mod params;
mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use synth::{ScorePageBuilder, SyntheticScore};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // staffbound-test is at crates/staffbound-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
