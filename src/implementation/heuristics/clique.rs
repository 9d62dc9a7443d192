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

//! This module provides the maximum clique search used to compute the initial
//! lower bound of the search: a graph comprising a clique of k vertices cannot
//! be colored with less than k colors.

use bit_set::BitSet;

use crate::{Graph, LowerBound, VertexId};

/// Bron-Kerbosch enumeration of the maximal cliques (with pivoting) that only
/// keeps the largest one. Branches that cannot beat the best clique found so
/// far are pruned.
///
/// An optional node limit keeps the search affordable on large graphs. When
/// it is exceeded, the largest clique found so far is returned (which is
/// still a valid lower bound).
#[derive(Debug, Clone, Copy)]
pub struct MaxClique {
    node_limit: Option<usize>,
}
impl MaxClique {
    pub fn new() -> Self {
        MaxClique { node_limit: None }
    }
    pub fn with_node_limit(limit: usize) -> Self {
        MaxClique { node_limit: Some(limit) }
    }
    /// Returns the (sorted) vertices of the largest clique found
    pub fn find(&self, graph: &Graph) -> Vec<VertexId> {
        let n = graph.nb_vertices();
        let mut search = CliqueSearch { graph, best: vec![], explored: 0, node_limit: self.node_limit };
        let candidates = (0..n).collect::<BitSet>();
        let mut current = vec![];
        search.expand(&mut current, candidates, BitSet::with_capacity(n));
        let mut best = search.best;
        best.sort_unstable();
        best
    }
}
impl Default for MaxClique {
    fn default() -> Self {
        Self::with_node_limit(1_000_000)
    }
}
impl LowerBound for MaxClique {
    fn lower_bound(&self, graph: &Graph) -> usize {
        self.find(graph).len()
    }
}

struct CliqueSearch<'a> {
    graph: &'a Graph,
    best: Vec<VertexId>,
    explored: usize,
    node_limit: Option<usize>,
}
impl CliqueSearch<'_> {
    fn exhausted(&self) -> bool {
        self.node_limit.map_or(false, |limit| self.explored >= limit)
    }
    /// Extends the current clique with the candidates (smallest ids first)
    /// and keeps it if it improves on the best clique.
    fn complete_greedily(&mut self, current: &[VertexId], mut candidates: BitSet) {
        let mut clique = current.to_vec();
        loop {
            let next = candidates.iter().next();
            match next {
                Some(v) => {
                    clique.push(v);
                    candidates.intersect_with(self.graph.neighbors(v));
                }
                None => break,
            }
        }
        if clique.len() > self.best.len() {
            self.best = clique;
        }
    }
    /// `candidates` is the set P of vertices that may extend the current
    /// clique, `excluded` the set X of vertices already explored.
    fn expand(&mut self, current: &mut Vec<VertexId>, mut candidates: BitSet, mut excluded: BitSet) {
        self.explored += 1;
        if candidates.is_empty() {
            if excluded.is_empty() && current.len() > self.best.len() {
                self.best.clone_from(current);
            }
            return;
        }
        if current.len() + candidates.len() <= self.best.len() {
            return;
        }
        if self.exhausted() {
            self.complete_greedily(current, candidates);
            return;
        }
        // the pivot is the vertex of P u X with most neighbors in P
        let pivot = candidates.union(&excluded)
            .max_by_key(|&u| self.graph.neighbors(u).intersection(&candidates).count())
            .unwrap_or(0);
        let branching = candidates.difference(self.graph.neighbors(pivot)).collect::<Vec<_>>();
        for v in branching {
            let neighbors = self.graph.neighbors(v);
            let mut next_p = candidates.clone();
            next_p.intersect_with(neighbors);
            let mut next_x = excluded.clone();
            next_x.intersect_with(neighbors);

            current.push(v);
            self.expand(current, next_p, next_x);
            current.pop();

            candidates.remove(v);
            excluded.insert(v);
            if current.len() + candidates.len() <= self.best.len() {
                return;
            }
        }
    }
}
