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

//! This module provides the DSATUR greedy coloring used to compute the
//! initial solution of the search.

use std::cmp::{Ordering, Reverse};

use bit_set::BitSet;
use priority_queue::PriorityQueue;

use crate::{Graph, InitialColoring, VertexId};

#[derive(Debug, PartialEq, Eq)]
struct DSatInfo {
    /// number of distinct colors among the colored neighbors
    dsat: usize,
    degree: usize,
    /// smallest ids first when everything else is equal
    id: Reverse<VertexId>,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The DSATUR greedy coloring heuristic:
///
/// 1. choose an uncolored vertex that sees the most colors (break ties by the
///    largest degree, then by the smallest id)
/// 2. give it the first color that none of its neighbors has
/// 3. mark all its uncolored neighbors as seeing this color
/// 4. repeat until every vertex is colored
#[derive(Debug, Default, Copy, Clone)]
pub struct Dsatur;

impl InitialColoring for Dsatur {
    fn color(&self, graph: &Graph) -> Vec<Vec<VertexId>> {
        let n = graph.nb_vertices();
        let mut remaining: PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
        for v in 0..n {
            remaining.push(v, DSatInfo { dsat: 0, degree: graph.degree(v), id: Reverse(v) });
        }
        // colors[v] -> color assigned to vertex v
        let mut colors: Vec<Option<usize>> = vec![None; n];
        // adj_colors[v] -> colors v sees
        let mut adj_colors: Vec<BitSet> = vec![BitSet::default(); n];
        let mut classes: Vec<Vec<VertexId>> = vec![];

        while let Some((current, _)) = remaining.pop() {
            let mut color = 0;
            while adj_colors[current].contains(color) {
                color += 1;
            }
            colors[current] = Some(color);
            if color == classes.len() {
                classes.push(vec![]);
            }
            classes[color].push(current);

            for neighbor in graph.neighbors(current).iter() {
                if colors[neighbor].is_none() && adj_colors[neighbor].insert(color) {
                    remaining.change_priority_by(&neighbor, |p| p.dsat += 1);
                }
            }
        }
        for class in classes.iter_mut() {
            class.sort_unstable();
        }
        classes
    }
}
