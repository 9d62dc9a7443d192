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

//! This module defines the `LpSolver` trait: the contract of the external
//! LP solver the master problem delegates to.

use crate::{VertexId, Result};

/// The optimum of a linear relaxation along with the dual value of each row
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// The optimal objective value
    pub objective: f64,
    /// The dual value of each row (one row per vertex of the base graph)
    pub duals: Vec<f64>,
}

/// An LP solver able to optimize the covering program
///
/// ```plain
/// min   sum_j cost_j * x_j
/// s.t.  sum_{j : v in column j} x_j >= 1     for every row v
///       x_j >= 0
/// ```
///
/// # Note
/// Each worker thread owns its LP solver and reuses it from one node to the
/// next. Hence, `reset` must forget everything about the previous node.
pub trait LpSolver {
    /// Forgets all the columns and prepares a program with `nb_rows` rows
    fn reset(&mut self, nb_rows: usize);
    /// Adds a column covering the given rows to the program
    fn add_column(&mut self, rows: &[VertexId], cost: f64);
    /// Returns the number of columns in the program
    fn nb_columns(&self) -> usize;
    /// Solves the program and returns its objective and row duals.
    /// An infeasible program yields `Error::InfeasibleNode`.
    fn solve(&mut self) -> Result<LpSolution>;
    /// Returns the value of each column (in insertion order) at the optimum
    fn values(&mut self) -> Result<Vec<f64>>;
}
