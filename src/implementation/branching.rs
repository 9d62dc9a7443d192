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

//! This module provides the Ryan-Foster branching rule: when the relaxation of
//! a node is fractional, a pair of vertices is selected and the node is split
//! in a child where both vertices share a color and a child where they don't.

use bit_set::BitSet;
use fxhash::FxHashMap;

use crate::{BranchDecision, Column, Direction, Graph, Node, NodeGraph, Result, SINGLETON_COLUMN, Solution, VertexId};

/// The branching rule on vertex pairs.
///
/// # Pair selection
/// Among the pairs of super vertices (u, v) covered together by some column
/// with a positive value, the candidates are those for which some other
/// positive column covers one of them without the other. Both children then
/// cut the current fractional solution. The candidate whose co-occurrence
/// is the most fractional (closest to one half) wins. Ties are broken by the
/// lowest (u, v) pair. When no candidate exists, the first pair of non
/// adjacent super vertices is used instead.
#[derive(Debug, Clone, Copy)]
pub struct BranchOnVertexPair {
    tolerance: f64,
}
impl BranchOnVertexPair {
    pub fn new(tolerance: f64) -> Self {
        BranchOnVertexPair { tolerance }
    }
    /// Returns true iff all values are integral (up to the tolerance)
    pub fn is_integral(&self, values: &[f64]) -> bool {
        values.iter().all(|x| (x - x.round()).abs() <= self.tolerance)
    }
    /// The columns selected by an integral solution
    pub fn integral_solution(&self, columns: &[Column], values: &[f64]) -> Solution {
        columns.iter().zip(values.iter())
            .filter(|(_, x)| **x > 0.5)
            .map(|(c, _)| c.clone())
            .collect()
    }
    /// The coloring of a node whose super vertices are pairwise adjacent: one
    /// color per super vertex.
    pub fn complete_solution(&self, graph: &NodeGraph, origin: usize) -> Solution {
        graph.representatives().iter()
            .map(|r| Column::new(origin, SINGLETON_COLUMN, graph.expand([r])))
            .collect()
    }
    /// Selects the pair of representatives to branch on. It returns None iff
    /// the node graph is complete (there is nothing left to branch on).
    pub fn select(&self, graph: &NodeGraph, columns: &[Column], values: &[f64]) -> Option<(VertexId, VertexId)> {
        if graph.is_complete() {
            return None;
        }
        let mut cover: FxHashMap<VertexId, f64> = FxHashMap::default();
        let mut together: FxHashMap<(VertexId, VertexId), f64> = FxHashMap::default();
        for (column, x) in columns.iter().zip(values.iter().copied()) {
            if x <= self.tolerance {
                continue;
            }
            let reps = column.vertices.iter()
                .map(|&v| graph.representative(v))
                .collect::<BitSet>()
                .iter()
                .collect::<Vec<_>>();
            for (i, r) in reps.iter().copied().enumerate() {
                *cover.entry(r).or_insert(0.0) += x;
                for s in reps.iter().copied().skip(i + 1) {
                    *together.entry((r, s)).or_insert(0.0) += x;
                }
            }
        }

        let mut best: Option<((VertexId, VertexId), f64)> = None;
        for (pair, co) in together.iter() {
            let (r, s) = *pair;
            let most = cover[&r].max(cover[&s]);
            if *co <= self.tolerance || *co >= most - self.tolerance {
                continue;
            }
            let score = (co.fract() - 0.5).abs();
            let better = match best {
                None => true,
                Some((bp, bs)) => score < bs - self.tolerance || (score <= bs + self.tolerance && *pair < bp),
            };
            if better {
                best = Some((*pair, score));
            }
        }
        best.map(|(pair, _)| pair).or_else(|| graph.first_free_pair())
    }
    /// Creates the two children of `parent` when branching on (u, v): the
    /// `Same` child first, then the `Different` one.
    ///
    /// Each child inherits the parent columns that remain valid under its own
    /// decisions, plus one singleton column per super vertex left uncovered.
    /// A child whose decisions contradict each other yields
    /// `Error::MalformedBranch`.
    pub fn branch(&self, base: &Graph, parent: &Node, columns: &[Column], bound: f64, pair: (VertexId, VertexId)) -> [Result<Node>; 2] {
        let (u, v) = pair;
        [Direction::Same, Direction::Different]
            .map(|direction| self.child(base, parent, columns, bound, BranchDecision { u, v, direction }))
    }

    fn child(&self, base: &Graph, parent: &Node, columns: &[Column], bound: f64, decision: BranchDecision) -> Result<Node> {
        let mut node = parent.child(decision, bound, vec![]);
        let graph = NodeGraph::with_decisions(base, &node.path)?;

        let mut covered = BitSet::with_capacity(base.nb_vertices());
        let mut inherited = vec![];
        for column in columns.iter() {
            if graph.accepts(&column.vertices) {
                covered.extend(column.vertices.iter().copied());
                inherited.push(column.clone());
            }
        }
        for r in graph.representatives().iter() {
            if !covered.contains(r) {
                inherited.push(Column::new(parent.id, SINGLETON_COLUMN, graph.expand([r])));
            }
        }
        node.columns = inherited;
        Ok(node)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_branching {
    use crate::*;

    const EPS: f64 = 1e-6;

    fn c5() -> Graph {
        Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap()
    }
    /// The fractional optimum of C5: each maximal independent pair at 1/2
    fn c5_pairs() -> (Vec<Column>, Vec<f64>) {
        let cols = vec![
            Column::new(0, "test", vec![0, 2]),
            Column::new(0, "test", vec![1, 3]),
            Column::new(0, "test", vec![2, 4]),
            Column::new(0, "test", vec![0, 3]),
            Column::new(0, "test", vec![1, 4]),
        ];
        (cols, vec![0.5; 5])
    }

    #[test]
    fn integrality_is_checked_up_to_the_tolerance() {
        let rule = BranchOnVertexPair::new(EPS);
        assert!(rule.is_integral(&[0.0, 1.0, 1.0 - 1e-9, 2.0]));
        assert!(!rule.is_integral(&[0.0, 0.5, 1.0]));
        assert!(rule.is_integral(&[]));
    }
    #[test]
    fn the_integral_solution_keeps_selected_columns_only() {
        let rule = BranchOnVertexPair::new(EPS);
        let (cols, _) = c5_pairs();
        let sol = rule.integral_solution(&cols, &[1.0, 0.0, 1.0 - 1e-9, 0.0, 1.0]);
        assert_eq!(3, sol.len());
        assert_eq!(vec![0, 2], sol[0].vertices);
        assert_eq!(vec![2, 4], sol[1].vertices);
        assert_eq!(vec![1, 4], sol[2].vertices);
    }
    #[test]
    fn the_lowest_most_fractional_pair_is_selected() {
        let base = c5();
        let graph = NodeGraph::new(&base);
        let rule = BranchOnVertexPair::new(EPS);
        let (cols, vals) = c5_pairs();
        // every pair occurs with 1/2 while each vertex is covered once
        assert_eq!(Some((0, 2)), rule.select(&graph, &cols, &vals));
    }
    #[test]
    fn pairs_always_covered_together_are_not_candidates() {
        let base = Graph::from_edges(4, &[(0, 1)]).unwrap();
        let graph = NodeGraph::new(&base);
        let rule = BranchOnVertexPair::new(EPS);
        let cols = vec![
            Column::new(0, "test", vec![0, 2, 3]),
            Column::new(0, "test", vec![1, 2, 3]),
        ];
        // 2 and 3 always go together, (0, 2) co-occurs 0.5 out of 1
        assert_eq!(Some((0, 2)), rule.select(&graph, &cols, &[0.5, 0.5]));
    }
    #[test]
    fn without_candidates_the_first_free_pair_is_used() {
        let base = Graph::from_edges(3, &[(0, 1)]).unwrap();
        let graph = NodeGraph::new(&base);
        let rule = BranchOnVertexPair::new(EPS);
        let cols = vec![Column::new(0, "test", vec![0, 2]), Column::new(0, "test", vec![1])];
        assert_eq!(Some((0, 2)), rule.select(&graph, &cols, &[1.0, 1.0]));
    }
    #[test]
    fn a_complete_node_graph_has_nothing_to_branch_on() {
        let base = Graph::from_edges(3, &[(0, 1)]).unwrap();
        let graph = NodeGraph::with_decisions(&base, &[
            BranchDecision { u: 0, v: 2, direction: Direction::Different },
            BranchDecision { u: 1, v: 2, direction: Direction::Different },
        ]).unwrap();
        let rule = BranchOnVertexPair::new(EPS);
        assert!(graph.is_complete());
        let cols = vec![Column::new(0, "test", vec![0]), Column::new(0, "test", vec![1]), Column::new(0, "test", vec![2])];
        assert_eq!(None, rule.select(&graph, &cols, &[1.0, 1.0, 1.0]));
        assert_eq!(None, rule.select(&graph, &cols, &[0.5, 0.5, 0.5]));
        let sol = rule.complete_solution(&graph, 7);
        assert_eq!(3, sol.len());
        assert!(base.is_valid_coloring(&sol));
    }
    #[test]
    fn the_complete_solution_colors_merged_vertices_together() {
        let base = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let graph = NodeGraph::with_decisions(&base, &[
            BranchDecision { u: 0, v: 2, direction: Direction::Same },
        ]).unwrap();
        let sol = BranchOnVertexPair::new(EPS).complete_solution(&graph, 1);
        assert_eq!(vec![vec![0, 2], vec![1]], sol.iter().map(|c| c.vertices.clone()).collect::<Vec<_>>());
    }
    #[test]
    fn children_filter_the_parent_columns() {
        let base = c5();
        let rule = BranchOnVertexPair::new(EPS);
        let (cols, _) = c5_pairs();
        let mut root = Node::root(2.5, cols.clone());
        root.id = 3;
        let [same, diff] = rule.branch(&base, &root, &cols, 2.5, (0, 2));
        let same = same.unwrap();
        let diff = diff.unwrap();

        assert_eq!(Some(3), same.parent);
        assert_eq!(1, same.depth);
        assert_eq!(2.5, same.bound);
        assert_eq!(&[BranchDecision { u: 0, v: 2, direction: Direction::Same }], same.path.as_slice());
        // SAME keeps the columns holding both or neither of 0 and 2
        let kept = same.columns.iter().map(|c| c.vertices.clone()).collect::<Vec<_>>();
        assert_eq!(vec![vec![0, 2], vec![1, 3], vec![1, 4]], kept);

        // DIFFERENT drops {0, 2} only
        let kept = diff.columns.iter().map(|c| c.vertices.clone()).collect::<Vec<_>>();
        assert_eq!(vec![vec![1, 3], vec![2, 4], vec![0, 3], vec![1, 4]], kept);
    }
    #[test]
    fn uncovered_super_vertices_receive_a_singleton_column() {
        let base = c5();
        let rule = BranchOnVertexPair::new(EPS);
        let cols = vec![Column::new(0, "test", vec![0, 2]), Column::new(0, "test", vec![1, 3])];
        let root = Node::root(0.0, cols.clone());
        let [same, diff] = rule.branch(&base, &root, &cols, 0.0, (0, 3));
        // in SAME(0, 3) neither column survives: {0,3} merged, then 1, 2, 4
        let same = same.unwrap();
        let kept = same.columns.iter().map(|c| c.vertices.clone()).collect::<Vec<_>>();
        assert_eq!(vec![vec![0, 3], vec![1], vec![2], vec![4]], kept);
        assert!(same.columns.iter().all(|c| c.label == SINGLETON_COLUMN));
        // in DIFFERENT(0, 3) both survive: only 4 is uncovered
        let diff = diff.unwrap();
        let kept = diff.columns.iter().map(|c| c.vertices.clone()).collect::<Vec<_>>();
        assert_eq!(vec![vec![0, 2], vec![1, 3], vec![4]], kept);
    }
    /// Every partition of the vertices 0..n into non empty classes
    fn partitions(n: usize) -> Vec<Vec<Vec<VertexId>>> {
        fn extend(v: usize, n: usize, classes: &mut Vec<Vec<VertexId>>, out: &mut Vec<Vec<Vec<VertexId>>>) {
            if v == n {
                out.push(classes.clone());
                return;
            }
            for i in 0..classes.len() {
                classes[i].push(v);
                extend(v + 1, n, classes, out);
                classes[i].pop();
            }
            classes.push(vec![v]);
            extend(v + 1, n, classes, out);
            classes.pop();
        }
        let mut out = vec![];
        extend(0, n, &mut vec![], &mut out);
        out
    }
    fn feasible(graph: &NodeGraph, coloring: &[Vec<VertexId>]) -> bool {
        coloring.iter().all(|class| graph.accepts(class))
    }

    #[test]
    fn the_children_split_the_colorings_of_their_parent() {
        // C6 with one chord
        let base = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (0, 3)]).unwrap();
        let all = partitions(6);
        assert_eq!(203, all.len());
        let rule = BranchOnVertexPair::new(EPS);

        let root = Node::root(0.0, vec![]);
        let deeper = root
            .child(BranchDecision { u: 1, v: 4, direction: Direction::Same }, 0.0, vec![])
            .child(BranchDecision { u: 2, v: 5, direction: Direction::Different }, 0.0, vec![]);
        for parent in [root, deeper] {
            let graph = NodeGraph::with_decisions(&base, &parent.path).unwrap();
            let reps = graph.representatives().iter().collect::<Vec<_>>();
            let mut branched = 0;
            for (i, r) in reps.iter().copied().enumerate() {
                for s in reps.iter().copied().skip(i + 1).filter(|&s| !graph.are_adjacent(r, s)) {
                    let [same, diff] = rule.branch(&base, &parent, &[], 0.0, (r, s));
                    let same = NodeGraph::with_decisions(&base, &same.unwrap().path).unwrap();
                    let diff = NodeGraph::with_decisions(&base, &diff.unwrap().path).unwrap();
                    for coloring in all.iter() {
                        let in_same = feasible(&same, coloring);
                        let in_diff = feasible(&diff, coloring);
                        // disjoint regions whose union is the parent region
                        assert!(!(in_same && in_diff), "{coloring:?} in both children of ({r}, {s})");
                        assert_eq!(feasible(&graph, coloring), in_same || in_diff, "{coloring:?} on ({r}, {s})");
                    }
                    branched += 1;
                }
            }
            assert!(branched > 0);
        }
    }
    #[test]
    fn contradictory_decisions_yield_a_malformed_branch() {
        let base = c5();
        let rule = BranchOnVertexPair::new(EPS);
        let mut parent = Node::root(0.0, vec![]);
        parent = parent.child(BranchDecision { u: 0, v: 2, direction: Direction::Different }, 0.0, vec![]);
        let [same, diff] = rule.branch(&base, &parent, &[], 0.0, (0, 2));
        assert!(matches!(same, Err(Error::MalformedBranch(_))));
        assert!(diff.is_ok());
    }
}
