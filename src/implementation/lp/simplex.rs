// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides an `LpSolver` backed by the `minilp` simplex.
//!
//! `minilp` does not expose the dual values of an optimal basis. Hence, the
//! duals of the covering program are obtained by solving its dual (packing)
//! program explicitly:
//!
//! ```plain
//! max   sum_v pi_v
//! s.t.  sum_{v in column j} pi_v <= cost_j    for every column j
//!       pi_v >= 0
//! ```
//!
//! By strong duality, both programs share the same optimal objective. The
//! primal program is only solved when the column values are requested.

use minilp::{ComparisonOp, OptimizationDirection, Problem, Variable};

use crate::{Error, LpSolution, LpSolver, Result, VertexId};

/// An LP solver relying on the pure rust `minilp` simplex implementation
#[derive(Debug, Clone, Default)]
pub struct MinilpSolver {
    /// The number of rows (vertices) of the covering program
    nb_rows: usize,
    /// The rows covered by each column
    columns: Vec<Vec<VertexId>>,
    /// The objective coefficient of each column
    costs: Vec<f64>,
}

impl MinilpSolver {
    fn convert(err: minilp::Error) -> Error {
        match err {
            minilp::Error::Infeasible => Error::InfeasibleNode,
            // an unbounded dual means the primal is infeasible
            minilp::Error::Unbounded => Error::InfeasibleNode,
        }
    }
    /// Returns the first row which is covered by no column at all (if any)
    fn uncovered_row(&self) -> Option<VertexId> {
        let mut covered = vec![false; self.nb_rows];
        for col in self.columns.iter() {
            for row in col.iter().copied() {
                covered[row] = true;
            }
        }
        covered.iter().position(|c| !c)
    }
}

impl LpSolver for MinilpSolver {
    fn reset(&mut self, nb_rows: usize) {
        self.nb_rows = nb_rows;
        self.columns.clear();
        self.costs.clear();
    }

    fn add_column(&mut self, rows: &[VertexId], cost: f64) {
        self.columns.push(rows.to_vec());
        self.costs.push(cost);
    }

    fn nb_columns(&self) -> usize {
        self.columns.len()
    }

    fn solve(&mut self) -> Result<LpSolution> {
        if self.nb_rows == 0 {
            return Ok(LpSolution { objective: 0.0, duals: vec![] });
        }
        if self.uncovered_row().is_some() {
            return Err(Error::InfeasibleNode);
        }
        let mut problem = Problem::new(OptimizationDirection::Maximize);
        let pi: Vec<Variable> = (0..self.nb_rows)
            .map(|_| problem.add_var(1.0, (0.0, f64::INFINITY)))
            .collect();
        for (col, cost) in self.columns.iter().zip(self.costs.iter()) {
            let expr: Vec<(Variable, f64)> = col.iter().map(|&row| (pi[row], 1.0)).collect();
            problem.add_constraint(expr, ComparisonOp::Le, *cost);
        }
        let solution = problem.solve().map_err(Self::convert)?;
        let duals = pi.iter().map(|&var| solution[var].max(0.0)).collect();
        Ok(LpSolution { objective: solution.objective(), duals })
    }

    fn values(&mut self) -> Result<Vec<f64>> {
        if self.columns.is_empty() {
            return if self.nb_rows == 0 { Ok(vec![]) } else { Err(Error::InfeasibleNode) };
        }
        if self.uncovered_row().is_some() {
            return Err(Error::InfeasibleNode);
        }
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let x: Vec<Variable> = self.costs.iter()
            .map(|&cost| problem.add_var(cost, (0.0, f64::INFINITY)))
            .collect();
        let mut rows: Vec<Vec<(Variable, f64)>> = vec![vec![]; self.nb_rows];
        for (j, col) in self.columns.iter().enumerate() {
            for row in col.iter().copied() {
                rows[row].push((x[j], 1.0));
            }
        }
        for expr in rows {
            problem.add_constraint(expr, ComparisonOp::Ge, 1.0);
        }
        let solution = problem.solve().map_err(Self::convert)?;
        Ok(x.iter().map(|&var| solution[var].max(0.0)).collect())
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
