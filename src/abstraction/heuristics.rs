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

//! This module defines the traits used to encapsulate the heuristics a
//! branch-and-price solver relies upon: the pluggable bound providers called
//! at root initialization, the ordering of the fringe and the cutoff.

use std::cmp::Ordering;

use crate::{Graph, Node, VertexId};

/// A heuristic producing an initial proper coloring of the base graph. The
/// color classes of that coloring serve both as an initial upper bound and
/// as the warm start of the root master problem.
pub trait InitialColoring {
    /// Returns the color classes of a proper coloring of the given graph.
    /// Every vertex must belong to exactly one class.
    fn color(&self, graph: &Graph) -> Vec<Vec<VertexId>>;
}

/// A heuristic computing a combinatorial lower bound on the chromatic number
/// (e.g. the size of a clique). It serves as a global pruning floor.
pub trait LowerBound {
    /// Returns a valid lower bound on the chromatic number of the graph
    fn lower_bound(&self, graph: &Graph) -> usize;
}

/// A node ranking is an heuristic that imposes a partial order on the nodes
/// of the search tree. This order is used by the fringe to decide which node
/// is to be explored next.
pub trait NodeRanking {
    /// This method compares two nodes and determines which is the one that
    /// needs to be popped off the fringe first. In this ordering, greater
    /// means more likely to be popped first.
    fn compare(&self, a: &Node, b: &Node) -> Ordering;
}

/// This trait encapsulates a criterion (external to the solver) which imposes
/// to stop searching for a better solution. Typically, this is done to grant
/// a given time budget to the search.
pub trait Cutoff {
    /// Returns true iff the criterion is met and the search must stop.
    fn must_stop(&self) -> bool;
}
