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

//! This module defines the `Pricer` trait: the capability of finding new
//! improving columns given the current duals of the master problem.

use crate::{NodeGraph, VertexId, Result};

/// The outcome of a pricing round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pricing {
    /// The independent sets (expressed with original vertices) whose weight
    /// exceeds the threshold. Hence, their reduced cost is negative.
    pub columns: Vec<Vec<VertexId>>,
    /// For an exact pricer, an upper bound on the weight of any independent
    /// set of the node graph. This is never less than the threshold.
    pub max_weight: Option<f64>,
}

/// A pricer solves the pricing problem of a node: given a weight for each
/// representative vertex of the node graph (the sum of the duals of its
/// members), find independent sets weighing more than `threshold`.
///
/// Exact pricers must return the maximum weight independent set whenever
/// it exceeds the threshold, and nothing otherwise: this is how column
/// generation certifies that the LP optimum is reached. Heuristic pricers
/// may miss improving sets.
pub trait Pricer {
    /// A short name identifying the pricer (it is used as column label)
    fn name(&self) -> &'static str;
    /// Returns true iff an empty result proves no improving column exists
    fn is_exact(&self) -> bool;
    /// Looks for independent sets of `graph` weighing more than `threshold`.
    /// Weights are indexed by vertex id; only representatives are meaningful.
    fn price(&self, graph: &NodeGraph, weights: &[f64], threshold: f64) -> Result<Pricing>;
}
