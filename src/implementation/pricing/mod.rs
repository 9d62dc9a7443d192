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

//! This module provides the implementation of the pricers which may be used
//! to generate improving columns.
mod exact;
mod greedy;

pub use exact::*;
pub use greedy::*;

use bit_set::BitSet;

use crate::{NodeGraph, VertexId};

/// The representatives having a positive weight, heaviest first (ties are
/// broken by increasing vertex id so that pricing is deterministic).
pub(crate) fn by_decreasing_weight(graph: &NodeGraph, weights: &[f64]) -> Vec<VertexId> {
    let mut order: Vec<VertexId> = graph.representatives().iter()
        .filter(|&r| weights[r] > 0.0)
        .collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then_with(|| a.cmp(&b)));
    order
}

/// Completes an independent set of representatives with the zero weight
/// representatives that do not conflict with it. This does not change the
/// weight of the set but yields a larger color class.
pub(crate) fn extend_maximal(graph: &NodeGraph, set: &mut Vec<VertexId>) {
    let mut blocked = BitSet::with_capacity(graph.base().nb_vertices());
    for r in set.iter().copied() {
        blocked.insert(r);
        blocked.union_with(graph.neighbors(r));
    }
    for r in graph.representatives().iter() {
        if !blocked.contains(r) {
            set.push(r);
            blocked.insert(r);
            blocked.union_with(graph.neighbors(r));
        }
    }
}
