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

//! This module provides the view of the base graph as it is seen from a node
//! of the search tree. The base graph is never modified: each node replays
//! its branching decisions on top of it.
//!
//! * A `Same(u, v)` decision contracts u and v into one super vertex. The
//!   smallest vertex of a super vertex is its representative, and the
//!   representative inherits the union of the adjacencies of the members.
//! * A `Different(u, v)` decision forbids u and v to share a color. This is
//!   recorded as an extra edge between their representatives.

use bit_set::BitSet;

use crate::{BranchDecision, Direction, Error, Graph, Result, VertexId};

/// The graph of a node: the base graph with merged and forbidden pairs
#[derive(Debug, Clone)]
pub struct NodeGraph<'a> {
    /// The base graph this view is layered upon
    base: &'a Graph,
    /// representative[v] is the representative of the super vertex of v
    representative: Vec<VertexId>,
    /// members[r] is the set of original vertices merged in representative r.
    /// It is empty when r is not a representative.
    members: Vec<BitSet>,
    /// adjacency[r] is the set of representatives adjacent to r
    adjacency: Vec<BitSet>,
    /// The set of all representatives
    active: BitSet,
}

impl<'a> NodeGraph<'a> {
    /// Creates the view of the root node (no decision at all)
    pub fn new(base: &'a Graph) -> Self {
        let n = base.nb_vertices();
        let mut members = Vec::with_capacity(n);
        let mut adjacency = Vec::with_capacity(n);
        let mut active = BitSet::with_capacity(n);
        for v in 0..n {
            let mut m = BitSet::with_capacity(n);
            m.insert(v);
            members.push(m);
            adjacency.push(base.neighbors(v).clone());
            active.insert(v);
        }
        NodeGraph { base, representative: (0..n).collect(), members, adjacency, active }
    }
    /// Creates the view of a node reached through the given decisions
    pub fn with_decisions(base: &'a Graph, decisions: &[BranchDecision]) -> Result<Self> {
        let mut graph = Self::new(base);
        for decision in decisions.iter().copied() {
            graph.apply(decision)?;
        }
        Ok(graph)
    }
    /// Applies one branching decision to this view.
    ///
    /// Contracting two vertices that must be colored differently, or
    /// forbidding two merged vertices to share a color, is a contradiction
    /// which yields `Error::MalformedBranch`. Redundant decisions are no-ops.
    pub fn apply(&mut self, decision: BranchDecision) -> Result<()> {
        let BranchDecision { u, v, direction } = decision;
        let n = self.base.nb_vertices();
        if u >= n || v >= n {
            return Err(Error::ContractViolation(format!("decision on ({u}, {v}) references a vertex beyond {n}")));
        }
        let ru = self.representative[u];
        let rv = self.representative[v];
        match direction {
            Direction::Same => {
                if ru == rv {
                    return Ok(());
                }
                if self.adjacency[ru].contains(rv) {
                    return Err(Error::MalformedBranch(format!("cannot contract {u} and {v}: they must be colored differently")));
                }
                self.merge(ru.min(rv), ru.max(rv));
            }
            Direction::Different => {
                if ru == rv {
                    return Err(Error::MalformedBranch(format!("cannot separate {u} and {v}: they were contracted")));
                }
                self.adjacency[ru].insert(rv);
                self.adjacency[rv].insert(ru);
            }
        }
        Ok(())
    }
    /// Merges the super vertex `other` into `keep`
    fn merge(&mut self, keep: VertexId, other: VertexId) {
        let moved = std::mem::take(&mut self.adjacency[other]);
        for w in moved.iter() {
            self.adjacency[w].remove(other);
            self.adjacency[w].insert(keep);
        }
        self.adjacency[keep].union_with(&moved);

        let moved = std::mem::take(&mut self.members[other]);
        for m in moved.iter() {
            self.representative[m] = keep;
        }
        self.members[keep].union_with(&moved);
        self.active.remove(other);
    }

    /// The base graph this view is layered upon
    pub fn base(&self) -> &'a Graph {
        self.base
    }
    /// The representative of the super vertex containing v
    pub fn representative(&self, v: VertexId) -> VertexId {
        self.representative[v]
    }
    /// The representatives of all super vertices, in increasing order
    pub fn representatives(&self) -> &BitSet {
        &self.active
    }
    pub fn nb_representatives(&self) -> usize {
        self.active.len()
    }
    /// The original vertices merged into representative r
    pub fn members(&self, r: VertexId) -> &BitSet {
        &self.members[r]
    }
    /// The representatives adjacent to representative r
    pub fn neighbors(&self, r: VertexId) -> &BitSet {
        &self.adjacency[r]
    }
    pub fn degree(&self, r: VertexId) -> usize {
        self.adjacency[r].len()
    }
    pub fn are_adjacent(&self, r1: VertexId, r2: VertexId) -> bool {
        self.adjacency[r1].contains(r2)
    }
    /// Returns true iff every pair of super vertices is adjacent. The
    /// chromatic number of such a graph is its number of super vertices.
    pub fn is_complete(&self) -> bool {
        self.first_free_pair().is_none()
    }
    /// The lexicographically smallest pair of non adjacent representatives
    pub fn first_free_pair(&self) -> Option<(VertexId, VertexId)> {
        for r in self.active.iter() {
            let free = self.active.iter()
                .find(|&s| s > r && !self.adjacency[r].contains(s));
            if let Some(s) = free {
                return Some((r, s));
            }
        }
        None
    }
    /// Turns a set of representatives into the sorted set of original
    /// vertices they stand for
    pub fn expand<I: IntoIterator<Item = VertexId>>(&self, representatives: I) -> Vec<VertexId> {
        let mut out = vec![];
        for r in representatives {
            out.extend(self.members[r].iter());
        }
        out.sort_unstable();
        out
    }
    /// Returns true iff the given set of original vertices is a valid column
    /// for this node: it must contain either all or none of the members of
    /// each super vertex, and its super vertices must be pairwise non adjacent.
    pub fn accepts(&self, vertices: &[VertexId]) -> bool {
        let n = self.base.nb_vertices();
        if vertices.iter().any(|&v| v >= n) {
            return false;
        }
        let set = vertices.iter().copied().collect::<BitSet>();
        let reps = vertices.iter().map(|&v| self.representative[v]).collect::<BitSet>();
        reps.iter().all(|r| self.members[r].is_subset(&set) && self.adjacency[r].is_disjoint(&reps))
    }
    /// Computes the weight of each representative: the sum of the duals of
    /// its members. The weight of a non representative vertex is zero.
    pub fn weights(&self, duals: &[f64]) -> Vec<f64> {
        let mut weights = vec![0.0; self.representative.len()];
        for (v, dual) in duals.iter().enumerate().take(weights.len()) {
            weights[self.representative[v]] += *dual;
        }
        weights
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_node_graph {
    use crate::*;

    fn c5() -> Graph {
        Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap()
    }
    fn same(u: usize, v: usize) -> BranchDecision {
        BranchDecision { u, v, direction: Direction::Same }
    }
    fn different(u: usize, v: usize) -> BranchDecision {
        BranchDecision { u, v, direction: Direction::Different }
    }

    #[test]
    fn the_root_view_mirrors_the_base_graph() {
        let base = c5();
        let g = NodeGraph::new(&base);
        assert_eq!(5, g.nb_representatives());
        for v in 0..5 {
            assert_eq!(v, g.representative(v));
            assert_eq!(base.degree(v), g.degree(v));
        }
    }
    #[test]
    fn same_contracts_into_the_smallest_vertex() {
        let base = c5();
        let g = NodeGraph::with_decisions(&base, &[same(2, 0)]).unwrap();
        assert_eq!(4, g.nb_representatives());
        assert_eq!(0, g.representative(2));
        assert_eq!(vec![0, 2], g.members(0).iter().collect::<Vec<_>>());
        // 0 was adjacent to 1, 4 and 2 was adjacent to 1, 3
        assert_eq!(vec![1, 3, 4], g.neighbors(0).iter().collect::<Vec<_>>());
        assert!(g.are_adjacent(3, 0));
        assert!(!g.neighbors(3).contains(2));
        assert!(g.members(2).is_empty());
    }
    #[test]
    fn different_adds_an_edge_between_representatives() {
        let base = c5();
        let g = NodeGraph::with_decisions(&base, &[same(0, 2), different(2, 4)]).unwrap();
        assert!(g.are_adjacent(0, 4));
        assert!(g.are_adjacent(4, 0));
        assert!(!base.are_adjacent(2, 4));
    }
    #[test]
    fn contracting_forbidden_vertices_is_malformed() {
        let base = c5();
        let err = NodeGraph::with_decisions(&base, &[different(0, 2), same(2, 0)]).unwrap_err();
        assert!(matches!(err, Error::MalformedBranch(_)));
        let err = NodeGraph::with_decisions(&base, &[same(0, 1)]).unwrap_err();
        assert!(matches!(err, Error::MalformedBranch(_)));
    }
    #[test]
    fn separating_contracted_vertices_is_malformed() {
        let base = c5();
        let err = NodeGraph::with_decisions(&base, &[same(0, 2), different(0, 2)]).unwrap_err();
        assert!(matches!(err, Error::MalformedBranch(_)));
    }
    #[test]
    fn redundant_decisions_are_noops() {
        let base = c5();
        let g = NodeGraph::with_decisions(&base, &[same(0, 2), same(2, 0), different(0, 1)]).unwrap();
        assert_eq!(4, g.nb_representatives());
    }
    #[test]
    fn decisions_on_unknown_vertices_violate_the_contract() {
        let base = c5();
        let err = NodeGraph::with_decisions(&base, &[same(0, 9)]).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }
    #[test]
    fn accepts_requires_whole_super_vertices() {
        let base = c5();
        let g = NodeGraph::with_decisions(&base, &[same(0, 2)]).unwrap();
        assert!(g.accepts(&[0, 2]));
        assert!(!g.accepts(&[0]));
        assert!(!g.accepts(&[2, 4]));
        assert!(g.accepts(&[1, 4]));
        assert!(!g.accepts(&[0, 2, 3]));
        assert!(!g.accepts(&[11]));
    }
    #[test]
    fn accepts_rejects_forbidden_pairs() {
        let base = c5();
        let g = NodeGraph::with_decisions(&base, &[different(1, 3)]).unwrap();
        assert!(!g.accepts(&[1, 3]));
        assert!(g.accepts(&[1, 4]));
    }
    #[test]
    fn expand_yields_sorted_original_vertices() {
        let base = c5();
        let g = NodeGraph::with_decisions(&base, &[same(3, 1)]).unwrap();
        assert_eq!(vec![1, 3, 4], g.expand(vec![4, 1]));
    }
    #[test]
    fn weights_sum_the_duals_of_the_members() {
        let base = c5();
        let g = NodeGraph::with_decisions(&base, &[same(0, 2)]).unwrap();
        let w = g.weights(&[0.5, 0.25, 0.125, 1.0, 2.0]);
        assert_eq!(vec![0.625, 0.25, 0.0, 1.0, 2.0], w);
    }
    #[test]
    fn complete_views_have_no_free_pair() {
        let base = c5();
        assert_eq!(Some((0, 2)), NodeGraph::new(&base).first_free_pair());
        let g = NodeGraph::with_decisions(&base, &[same(0, 2), different(1, 4), same(1, 3)]).unwrap();
        // super vertices {0,2}, {1,3}, {4}: 0-1 (edge 0-1), 0-4 (edge 0-4), 1-4 (forbidden)
        assert!(g.is_complete());
        assert_eq!(None, g.first_free_pair());
    }
}
