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

//! This module provides an exact pricer. It solves the maximum weight
//! independent set problem on the node graph with a branch-and-bound whose
//! bound is a greedy clique cover of the candidate vertices.

use bit_set::BitSet;

use crate::{Error, NodeGraph, Pricer, Pricing, Result, VertexId};
use super::{by_decreasing_weight, extend_maximal};

/// The label of the columns generated by the exact pricer
pub const EXACT_PRICER: &str = "exactPricer";

/// An exact maximum weight independent set pricer.
///
/// The search is deterministic: pricing twice with the same weights on the
/// same graph yields the same column. When a node limit is configured and the
/// search explores more nodes than permitted, it gives up and raises
/// `Error::PricingTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactPricer {
    node_limit: Option<usize>,
}
impl ExactPricer {
    pub fn new() -> Self {
        Self::default()
    }
    /// Bounds the number of search nodes a single pricing call may explore
    pub fn with_node_limit(limit: usize) -> Self {
        ExactPricer { node_limit: Some(limit) }
    }
}

impl Pricer for ExactPricer {
    fn name(&self) -> &'static str {
        EXACT_PRICER
    }

    fn is_exact(&self) -> bool {
        true
    }

    fn price(&self, graph: &NodeGraph, weights: &[f64], threshold: f64) -> Result<Pricing> {
        let order = by_decreasing_weight(graph, weights);
        let candidates = order.iter().copied().collect::<BitSet>();
        let mut search = MwisSearch {
            graph,
            weights,
            order,
            best: vec![],
            best_weight: threshold,
            explored: 0,
            node_limit: self.node_limit,
        };
        let mut current = vec![];
        search.explore(&mut current, 0.0, candidates)?;

        let max_weight = Some(search.best_weight);
        if search.best.is_empty() {
            Ok(Pricing { columns: vec![], max_weight })
        } else {
            let mut best = search.best;
            extend_maximal(graph, &mut best);
            Ok(Pricing { columns: vec![graph.expand(best)], max_weight })
        }
    }
}

/// The state of one maximum weight independent set search
struct MwisSearch<'b, 'g> {
    graph: &'b NodeGraph<'g>,
    weights: &'b [f64],
    /// the vertices with a positive weight, heaviest first
    order: Vec<VertexId>,
    best: Vec<VertexId>,
    best_weight: f64,
    explored: usize,
    node_limit: Option<usize>,
}

impl MwisSearch<'_, '_> {
    fn explore(&mut self, current: &mut Vec<VertexId>, weight: f64, mut candidates: BitSet) -> Result<()> {
        self.explored += 1;
        if let Some(limit) = self.node_limit {
            if self.explored > limit {
                return Err(Error::PricingTimeout(limit));
            }
        }
        if weight > self.best_weight {
            self.best_weight = weight;
            self.best.clone_from(current);
        }
        while let Some(v) = self.heaviest(&candidates) {
            if weight + self.clique_cover_bound(&candidates) <= self.best_weight {
                break;
            }
            candidates.remove(v);
            let mut next = candidates.clone();
            next.difference_with(self.graph.neighbors(v));

            current.push(v);
            self.explore(current, weight + self.weights[v], next)?;
            current.pop();
        }
        Ok(())
    }
    fn heaviest(&self, candidates: &BitSet) -> Option<VertexId> {
        self.order.iter().copied().find(|&v| candidates.contains(v))
    }
    /// Partitions the candidates in cliques (heaviest vertices first). Since
    /// an independent set holds at most one vertex per clique, the sum of the
    /// heaviest vertex of each clique bounds the weight of any independent set.
    fn clique_cover_bound(&self, candidates: &BitSet) -> f64 {
        // for each clique: the vertices adjacent to all its members
        let mut commons: Vec<BitSet> = vec![];
        let mut bound = 0.0;
        for v in self.order.iter().copied().filter(|&v| candidates.contains(v)) {
            match commons.iter_mut().find(|c| c.contains(v)) {
                Some(common) => common.intersect_with(self.graph.neighbors(v)),
                None => {
                    bound += self.weights[v];
                    commons.push(self.graph.neighbors(v).clone());
                }
            }
        }
        bound
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
