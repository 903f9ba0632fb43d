//! Launch-plan cache
//!
//! A launch plan fixes how a dispatch shape is cut into tasks. Plans depend
//! only on the kernel kind, the shape and the worker count, so they are
//! computed once per key and shared. The cache belongs to its backend
//! instance; there is no process-wide table.

use crate::error::{ComputeError, ComputeResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Smallest number of cells worth handing to one task.
const MIN_CELLS_PER_TASK: usize = 4096;

/// Tasks per worker, to smooth out uneven kernel cost.
const TASKS_PER_WORKER: usize = 4;

/// Kind of dispatch a plan was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    Grid2d,
    Tensor3d,
}

/// Cache key: kernel kind plus the full dispatch shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanKey {
    pub kind: KernelKind,
    pub dims: [usize; 3],
}

/// How one dispatch is split into tasks.
///
/// The output buffer is viewed as `rows` rows of `row_len` contiguous
/// cells; each task owns `rows_per_task` consecutive rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchPlan {
    pub row_len: usize,
    pub rows: usize,
    pub rows_per_task: usize,
}

impl LaunchPlan {
    pub fn for_rows(rows: usize, row_len: usize, workers: usize) -> Self {
        let target_tasks = workers.max(1) * TASKS_PER_WORKER;
        let by_tasks = rows.div_ceil(target_tasks);
        let by_cells = MIN_CELLS_PER_TASK.div_ceil(row_len.max(1));
        Self {
            row_len,
            rows,
            rows_per_task: by_tasks.max(by_cells).clamp(1, rows.max(1)),
        }
    }

    /// Cells per task chunk.
    pub fn chunk_len(&self) -> usize {
        self.rows_per_task * self.row_len
    }

    pub fn num_tasks(&self) -> usize {
        self.rows.div_ceil(self.rows_per_task)
    }
}

/// Lazily populated plan table with single-initialization per key.
#[derive(Debug, Default)]
pub struct PlanCache {
    plans: Mutex<HashMap<PlanKey, Arc<OnceLock<LaunchPlan>>>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the plan for `key`, computing it with `init` on first use.
    ///
    /// The table lock is only held to find the slot; `init` runs outside
    /// it, and concurrent callers for the same key wait on the slot.
    pub fn get_or_init<F>(&self, key: PlanKey, init: F) -> ComputeResult<LaunchPlan>
    where
        F: FnOnce() -> LaunchPlan,
    {
        let slot = {
            let mut plans = self.plans.lock().map_err(|_| ComputeError::PoisonedCache)?;
            Arc::clone(plans.entry(key).or_default())
        };
        Ok(*slot.get_or_init(|| {
            let plan = init();
            log::debug!(
                "launch plan {:?} {:?}: {} tasks of {} rows",
                key.kind,
                key.dims,
                plan.num_tasks(),
                plan.rows_per_task
            );
            plan
        }))
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.plans.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
