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

//! This module provides a heuristic pricer. It is meant to be called before
//! the exact pricer: whenever it finds improving columns, the (expensive)
//! exact search is spared for that iteration.

use fxhash::FxHashSet;

use crate::{NodeGraph, Pricer, Pricing, Result};
use super::{by_decreasing_weight, extend_maximal};

/// The label of the columns generated by the greedy pricer
pub const GREEDY_PRICER: &str = "greedyPricer";

/// A greedy pricer. Starting from each of the heaviest vertices in turn, it
/// builds an independent set by adding the heaviest compatible vertex until
/// no vertex can be added. It returns the distinct sets beating the threshold.
#[derive(Debug, Clone, Copy)]
pub struct GreedyPricer {
    /// The maximum number of columns returned by one call
    max_columns: usize,
}
impl GreedyPricer {
    pub fn new(max_columns: usize) -> Self {
        GreedyPricer { max_columns: max_columns.max(1) }
    }
}
impl Default for GreedyPricer {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Pricer for GreedyPricer {
    fn name(&self) -> &'static str {
        GREEDY_PRICER
    }

    fn is_exact(&self) -> bool {
        false
    }

    fn price(&self, graph: &NodeGraph, weights: &[f64], threshold: f64) -> Result<Pricing> {
        let order = by_decreasing_weight(graph, weights);
        let mut seen = FxHashSet::default();
        let mut columns = vec![];

        for start in order.iter().copied() {
            if columns.len() >= self.max_columns {
                break;
            }
            let mut set = vec![start];
            let mut weight = weights[start];
            let mut blocked = graph.neighbors(start).clone();
            blocked.insert(start);
            for v in order.iter().copied() {
                if !blocked.contains(v) {
                    set.push(v);
                    weight += weights[v];
                    blocked.insert(v);
                    blocked.union_with(graph.neighbors(v));
                }
            }
            if weight > threshold {
                extend_maximal(graph, &mut set);
                let column = graph.expand(set);
                if seen.insert(column.clone()) {
                    columns.push(column);
                }
            }
        }
        Ok(Pricing { columns, max_weight: None })
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
