//! Single-threaded reference backend

use crate::backend::{
    DispatchCounter, GridBackend, GridKernel, GridShape, TensorKernel, TensorShape,
};
use crate::error::ComputeResult;

/// Runs every kernel as plain nested loops on the calling thread.
///
/// This is the reference the parallel backend is checked against.
#[derive(Debug, Default)]
pub struct SerialBackend {
    dispatches: DispatchCounter,
}

impl SerialBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GridBackend for SerialBackend {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn map_grid_i32(
        &self,
        shape: GridShape,
        out: &mut [i32],
        kernel: &GridKernel<'_>,
    ) -> ComputeResult<()> {
        shape.check(out.len())?;
        for (y, row) in out.chunks_exact_mut(shape.width).enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = kernel(x, y);
            }
        }
        self.dispatches.bump();
        Ok(())
    }

    fn map_tensor_f32(
        &self,
        shape: TensorShape,
        out: &mut [f32],
        kernel: &TensorKernel<'_>,
    ) -> ComputeResult<()> {
        shape.check(out.len())?;
        for i in 0..shape.ni {
            for j in 0..shape.nj {
                let base = (i * shape.nj + j) * shape.nk;
                for k in 0..shape.nk {
                    out[base + k] = kernel(i, j, k);
                }
            }
        }
        self.dispatches.bump();
        Ok(())
    }

    fn dispatch_count(&self) -> u64 {
        self.dispatches.get()
    }
}
