//! Rayon backend
//!
//! Splits each dispatch into row chunks of the output buffer and runs them
//! on a rayon pool. Chunks are disjoint `&mut` slices, so no cell is
//! written by two workers, and `for_each` returning is the barrier.

use crate::backend::{
    DispatchCounter, GridBackend, GridKernel, GridShape, TensorKernel, TensorShape,
};
use crate::error::{ComputeError, ComputeResult};
use crate::plan::{KernelKind, LaunchPlan, PlanCache, PlanKey};
use rayon::prelude::*;

/// Data-parallel backend on rayon.
///
/// Uses the global rayon pool unless built with [`RayonBackend::with_threads`].
#[derive(Debug, Default)]
pub struct RayonBackend {
    pool: Option<rayon::ThreadPool>,
    plans: PlanCache,
    dispatches: DispatchCounter,
}

impl RayonBackend {
    /// Backend on the global rayon pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with a dedicated pool of `threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::ThreadPool`] if the pool cannot be built.
    pub fn with_threads(threads: usize) -> ComputeResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("staffbound-{i}"))
            .build()
            .map_err(|e| ComputeError::ThreadPool(e.to_string()))?;
        Ok(Self {
            pool: Some(pool),
            ..Self::default()
        })
    }

    /// Number of worker threads dispatches run on.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Launch plans cached so far.
    pub fn plan_cache(&self) -> &PlanCache {
        &self.plans
    }

    fn plan(
        &self,
        kind: KernelKind,
        dims: [usize; 3],
        rows: usize,
        row_len: usize,
    ) -> ComputeResult<LaunchPlan> {
        let workers = self.num_threads();
        self.plans.get_or_init(PlanKey { kind, dims }, || {
            LaunchPlan::for_rows(rows, row_len, workers)
        })
    }

    fn install<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

impl GridBackend for RayonBackend {
    fn name(&self) -> &'static str {
        "rayon"
    }

    fn map_grid_i32(
        &self,
        shape: GridShape,
        out: &mut [i32],
        kernel: &GridKernel<'_>,
    ) -> ComputeResult<()> {
        shape.check(out.len())?;
        let plan = self.plan(
            KernelKind::Grid2d,
            [shape.width, shape.height, 1],
            shape.height,
            shape.width,
        )?;
        let width = shape.width;
        self.install(|| {
            out.par_chunks_mut(plan.chunk_len())
                .enumerate()
                .for_each(|(task, chunk)| {
                    let first = task * plan.chunk_len();
                    for (offset, v) in chunk.iter_mut().enumerate() {
                        let idx = first + offset;
                        *v = kernel(idx % width, idx / width);
                    }
                });
        });
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
        let plan = self.plan(
            KernelKind::Tensor3d,
            [shape.ni, shape.nj, shape.nk],
            shape.ni * shape.nj,
            shape.nk,
        )?;
        let (nj, nk) = (shape.nj, shape.nk);
        self.install(|| {
            out.par_chunks_mut(plan.chunk_len())
                .enumerate()
                .for_each(|(task, chunk)| {
                    let first = task * plan.chunk_len();
                    for (offset, v) in chunk.iter_mut().enumerate() {
                        let idx = first + offset;
                        let k = idx % nk;
                        let row = idx / nk;
                        *v = kernel(row / nj, row % nj, k);
                    }
                });
        });
        self.dispatches.bump();
        Ok(())
    }

    fn dispatch_count(&self) -> u64 {
        self.dispatches.get()
    }
}
