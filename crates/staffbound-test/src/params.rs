//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use png::{BitDepth, ColorType, Encoder};
use staffbound_core::{BoundaryCurve, IntGrid};
use std::fs::{self, File};
use std::io::BufWriter;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare values only (default)
    #[default]
    Compare,
    /// Compare and write debug images to `tests/regout`
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "boundary")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if values match within `delta`, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two boundary curves point by point
    pub fn compare_curves(&mut self, expected: &BoundaryCurve, actual: &BoundaryCurve) -> bool {
        self.index += 1;
        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: curve comparison for index {} - {} points vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            );
            self.fail(msg);
            return false;
        }
        if let Some((i, (e, a))) = expected
            .iter()
            .zip(actual.iter())
            .enumerate()
            .find(|(_, (e, a))| e != a)
        {
            let msg = format!(
                "Failure in {}_reg: curve comparison for index {} - point {} is {:?}, \
                 expected {:?}",
                self.test_name, self.index, i, a, e
            );
            self.fail(msg);
            return false;
        }
        true
    }

    /// Compare two integer grids for exact equality
    pub fn compare_grids(&mut self, grid1: &IntGrid, grid2: &IntGrid) -> bool {
        self.index += 1;
        if grid1.width() != grid2.width() || grid1.height() != grid2.height() {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            self.fail(msg);
            return false;
        }
        let w = grid1.width() as usize;
        if let Some(i) = grid1
            .data()
            .iter()
            .zip(grid2.data())
            .position(|(a, b)| a != b)
        {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - cell mismatch at ({}, {})",
                self.test_name,
                self.index,
                i % w,
                i / w
            );
            self.fail(msg);
            return false;
        }
        true
    }

    /// In display mode, write `grid` as an 8-bit grayscale PNG to
    /// `tests/regout`, mapping `0..=max` to black..white.
    ///
    /// Does nothing in compare mode.
    pub fn write_grid_png(&mut self, grid: &IntGrid, max: i32) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }
        fs::create_dir_all(regout_dir())?;
        let path = format!("{}/{}.{:02}.png", regout_dir(), self.test_name, self.index);
        let scale = 255.0 / max.max(1) as f32;
        let data: Vec<u8> = grid
            .data()
            .iter()
            .map(|&v| (v.clamp(0, max.max(1)) as f32 * scale) as u8)
            .collect();

        let file = File::create(&path)?;
        let mut encoder = Encoder::new(BufWriter::new(file), grid.width(), grid.height());
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: format!("PNG header error: {}", e),
        })?;
        writer
            .write_image_data(&data)
            .map_err(|e| TestError::ImageWrite {
                path: path.clone(),
                message: format!("PNG write error: {}", e),
            })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();
        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
