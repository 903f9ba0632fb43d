//! Minimum-cost path through the cost tensor
//!
//! Forward dynamic program over the sampled columns. The path is anchored
//! at the same candidate row at the first and the last column; the cost of
//! arriving at column `i` is read from tensor slice `i`.
//!
//! Columns depend on their predecessor, so they are processed strictly in
//! order. Ties between predecessors go to the lowest row index.

use crate::cost::CostTensor;
use crate::error::{BoundaryError, BoundaryResult};
use log::trace;

/// Backpointers and cumulative costs of the forward pass.
#[derive(Debug, Clone)]
pub struct PathState {
    numx: usize,
    numy: usize,
    start_y: usize,
    pointer: Vec<usize>,
    cumulative_cost: Vec<f64>,
}

impl PathState {
    /// Run the forward pass from `start_y`.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError::EmptyCostTensor`] if the tensor has fewer than
    ///   two columns
    /// - [`BoundaryError::InvalidParameter`] if `start_y` is not a
    ///   candidate row
    pub fn forward(costs: &CostTensor, start_y: usize) -> BoundaryResult<Self> {
        let (numx, numy) = (costs.numx(), costs.numy());
        if numx < 2 {
            return Err(BoundaryError::EmptyCostTensor { numx, numy });
        }
        if start_y >= numy {
            return Err(BoundaryError::InvalidParameter(format!(
                "start row {start_y} outside {numy} candidate rows"
            )));
        }

        let mut pointer = vec![start_y; numx * numy];
        let mut cumulative_cost = vec![f64::INFINITY; numx * numy];
        cumulative_cost[start_y] = 0.0;

        for y in 0..numy {
            cumulative_cost[numy + y] = costs.get(1, start_y, y) as f64;
        }

        for i in 2..numx {
            let (done, rest) = cumulative_cost.split_at_mut(i * numy);
            let prev = &done[(i - 1) * numy..];
            let cur = &mut rest[..numy];
            let ptr = &mut pointer[i * numy..(i + 1) * numy];
            for y in 0..numy {
                let mut best = f64::INFINITY;
                let mut arg = 0;
                for (yp, &acc) in prev.iter().enumerate() {
                    let c = costs.get(i, yp, y) as f64 + acc;
                    if c < best {
                        best = c;
                        arg = yp;
                    }
                }
                cur[y] = best;
                ptr[y] = arg;
            }
            trace!(
                "column {i}: best cumulative {:.4}",
                cur.iter().copied().fold(f64::INFINITY, f64::min)
            );
        }

        Ok(Self {
            numx,
            numy,
            start_y,
            pointer,
            cumulative_cost,
        })
    }

    pub fn numx(&self) -> usize {
        self.numx
    }

    pub fn numy(&self) -> usize {
        self.numy
    }

    /// Best predecessor row of row `y` at column `x`.
    pub fn pointer(&self, x: usize, y: usize) -> usize {
        self.pointer[x * self.numy + y]
    }

    /// Cheapest cost of reaching row `y` at column `x` from the anchor.
    pub fn cumulative_cost(&self, x: usize, y: usize) -> f64 {
        self.cumulative_cost[x * self.numy + y]
    }

    /// Follow the backpointers from the anchor row at the last column.
    pub fn backtrack(&self) -> ShortestPath {
        let last = self.numx - 1;
        let mut points = Vec::with_capacity(self.numx);
        let mut y = self.start_y;
        for i in (1..=last).rev() {
            points.push((i, y));
            y = self.pointer(i, y);
        }
        points.push((0, self.start_y));
        points.reverse();
        ShortestPath {
            points,
            total_cost: self.cumulative_cost(last, self.start_y),
        }
    }
}

/// Row sequence of the cheapest anchored path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// `(x_index, y_index)` for every sampled column, in increasing x
    pub points: Vec<(usize, usize)>,
    /// Sum of the transition costs along the path
    pub total_cost: f64,
}

/// Cheapest path that starts and ends at candidate row `start_y`.
pub fn shortest_path(costs: &CostTensor, start_y: usize) -> BoundaryResult<ShortestPath> {
    Ok(PathState::forward(costs, start_y)?.backtrack())
}
