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

//! This module defines the `Solver` trait.

use crate::{Completion, Result, RunReport, Solution};

/// This is the solver abstraction. It is implemented by a structure that
/// implements the branch-and-price algorithm to find a coloring of a graph
/// using as few colors as possible.
pub trait Solver {
    /// This method orders the solver to search for the optimal coloring.
    /// It returns a structure standing for the outcome of the attempted
    /// minimization. Such a `Completion` may either be marked **exact** if
    /// the minimization has been carried out until optimality was proved.
    /// Or it can be inexact, in which case it means that the minimization
    /// process was stopped because of the satisfaction of some cutoff
    /// criterion.
    ///
    /// Along with the `is_exact` flag, the completion provides the optional
    /// `best_value` of the minimization problem. It is only absent when the
    /// search could not even start.
    ///
    /// An error is only returned when a programming contract was violated or
    /// when the LP collaborator failed.
    fn minimize(&mut self) -> Result<Completion>;
    /// This method returns the number of colors of the best solution that has
    /// been found. It returns `None` when no solution is known.
    fn best_value(&self) -> Option<usize>;
    /// This method returns the best coloring that has been found (if any).
    fn best_solution(&self) -> Option<Solution>;
    /// Returns the best lower bound that has been identified so far.
    fn best_lower_bound(&self) -> usize;
    /// Returns the best upper bound that has been identified so far.
    fn best_upper_bound(&self) -> usize;
    /// Returns a summary of the run.
    fn report(&self) -> RunReport;
    /// Computes the optimality gap
    fn gap(&self) -> f32 {
        let ub = self.best_upper_bound();
        let lb = self.best_lower_bound();
        if ub == 0 || lb >= ub {
            0.0
        } else {
            (ub - lb) as f32 / ub as f32
        }
    }
}
