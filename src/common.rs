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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

use std::sync::Arc;

// ----------------------------------------------------------------------------
// --- VERTEX -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes a vertex of the graph being colored. Vertices are
/// identified by an integer ranging from 0 until `graph.nb_vertices()`
pub type VertexId = usize;

// ----------------------------------------------------------------------------
// --- COLUMN -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The label attached to the columns of the initial solution
pub const INITIAL_COLUMN: &str = "initialColumn";
/// The label attached to the trivial columns covering one single vertex
pub const SINGLETON_COLUMN: &str = "singletonColumn";

/// A column is an independent set of the graph. In the master problem, it
/// stands for one color class: all the vertices of the set may share one
/// color since no two of them are adjacent.
///
/// # Note
/// The vertices of a column are always sorted in increasing order and never
/// contain any duplicate. This is what lets us identify two columns covering
/// the very same vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The id of the node whose pricing problem generated this column
    pub origin: usize,
    /// Is this a column of the initial (warm start) solution ?
    pub is_initial: bool,
    /// A label telling where that column comes from
    pub label: &'static str,
    /// The (sorted) vertices of the independent set
    pub vertices: Vec<VertexId>,
    /// The contribution of this column to the objective
    pub value: usize,
}
impl Column {
    /// Creates a new column with the given vertices (which need not be sorted).
    pub fn new(origin: usize, label: &'static str, mut vertices: Vec<VertexId>) -> Self {
        vertices.sort_unstable();
        vertices.dedup();
        Column { origin, is_initial: false, label, vertices, value: 1 }
    }
    /// Creates a new column belonging to the initial solution
    pub fn initial(vertices: Vec<VertexId>) -> Self {
        let mut col = Self::new(0, INITIAL_COLUMN, vertices);
        col.is_initial = true;
        col
    }
    /// Returns true iff the vertex `v` belongs to this independent set
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }
    /// The number of vertices in the set
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    /// Returns true iff the set comprises no vertex at all
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// A solution is nothing but the sequence of color classes it uses
pub type Solution = Vec<Column>;

// ----------------------------------------------------------------------------
// --- BRANCHING DECISION -----------------------------------------------------
// ----------------------------------------------------------------------------
/// The two sides of a Ryan-Foster branching on a pair of vertices
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Both vertices must receive the same color (they are contracted)
    Same,
    /// The vertices must receive different colors (they are forbidden together)
    Different,
}

/// A branching decision is made of a vertex pair and a direction. It should
/// be understood as ```[[ color(u) == color(v) ]]``` (resp. `!=`)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BranchDecision {
    pub u: VertexId,
    pub v: VertexId,
    pub direction: Direction,
}

// ----------------------------------------------------------------------------
// --- NODE -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The lifecycle of a node in the search tree
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    /// Waiting in the fringe
    Open,
    /// Currently being solved by column generation
    Processing,
    /// Pruned because its bound cannot improve on the incumbent
    Bounded,
    /// Pruned because it admits no feasible solution
    Infeasible,
    /// Its relaxation is integral: this node is a leaf
    Integral,
    /// It has been split in two children
    Branched,
}

/// A node is a residual problem of the search tree. It is entirely described
/// by the sequence of branching decisions leading to it from the root, and it
/// carries the columns inherited from its parent as a warm start.
///
/// # Note:
/// Nodes are automatically instanciated by the solvers when branching. You
/// do not need to create any node yourself.
#[derive(Debug, Clone)]
pub struct Node {
    /// A unique identifier for this node
    pub id: usize,
    /// The id of the node this one has been branched from (if any)
    pub parent: Option<usize>,
    /// The depth of the node with respect to the root
    pub depth: usize,
    /// A valid lower bound on the number of colors needed in this subtree
    pub bound: f64,
    /// The branching decisions to apply on the base graph to reach this node
    pub path: Arc<Vec<BranchDecision>>,
    /// The columns inherited from the parent (warm start)
    pub columns: Vec<Column>,
    /// Where that node stands in its lifecycle
    pub status: NodeStatus,
}
impl Node {
    /// Creates the root node of the search tree
    pub fn root(bound: f64, columns: Vec<Column>) -> Self {
        Node {
            id: 0,
            parent: None,
            depth: 0,
            bound,
            path: Arc::new(vec![]),
            columns,
            status: NodeStatus::Open,
        }
    }
    /// Creates a child of this node after taking the given decision.
    /// The child id is left for the solver to assign.
    pub fn child(&self, decision: BranchDecision, bound: f64, columns: Vec<Column>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(decision);
        Node {
            id: 0,
            parent: Some(self.id),
            depth: self.depth + 1,
            bound: bound.max(self.bound),
            path: Arc::new(path),
            columns,
            status: NodeStatus::Open,
        }
    }
    /// The smallest number of colors this node may achieve
    pub fn rounded_bound(&self, tolerance: f64) -> usize {
        round_bound(self.bound, tolerance)
    }
}

/// Since the chromatic number is integral, any fractional lower bound may be
/// rounded up (up to the numeric tolerance).
pub fn round_bound(bound: f64, tolerance: f64) -> usize {
    if bound <= 0.0 {
        0
    } else {
        (bound - tolerance).ceil().max(0.0) as usize
    }
}

// ----------------------------------------------------------------------------
// --- BOUND STATE ------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The bounds of a run along with the best known solution. The lower bound
/// never decreases and the upper bound never increases.
#[derive(Debug, Clone, Default)]
pub struct BoundState {
    lower: usize,
    upper: usize,
    incumbent: Solution,
}
impl BoundState {
    pub fn new(lower: usize, upper: usize, incumbent: Solution) -> Self {
        BoundState { lower: lower.min(upper), upper, incumbent }
    }
    /// The best proven lower bound
    pub fn lower(&self) -> usize {
        self.lower
    }
    /// The number of colors used by the incumbent
    pub fn upper(&self) -> usize {
        self.upper
    }
    /// The best known coloring
    pub fn incumbent(&self) -> &Solution {
        &self.incumbent
    }
    /// Returns true iff the incumbent has been proven optimal
    pub fn is_closed(&self) -> bool {
        self.lower >= self.upper
    }
    /// Raises the lower bound. It returns true iff the bound was improved.
    pub fn raise_lower(&mut self, bound: usize) -> bool {
        let bound = bound.min(self.upper);
        if bound > self.lower {
            self.lower = bound;
            true
        } else {
            false
        }
    }
    /// Replaces the incumbent iff the given solution is strictly better.
    pub fn improve_upper(&mut self, solution: Solution) -> bool {
        if solution.len() < self.upper {
            self.upper = solution.len();
            self.incumbent = solution;
            self.lower = self.lower.min(self.upper);
            true
        } else {
            false
        }
    }
    /// Marks the incumbent as proven optimal
    pub fn close(&mut self) {
        self.lower = self.upper;
    }
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A reason explaining why the search stopped before proving optimality
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Reason {
    /// It stopped because the configured cutoff criterion was met
    CutoffOccurred,
}

/// The outcome of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// is the given solution exact (proved optimal) or is it an approximation ?
    pub is_exact: bool,
    /// if present, the number of colors used by the best known solution
    pub best_value: Option<usize>,
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_column {
    use crate::*;

    #[test]
    fn vertices_are_sorted_and_deduplicated() {
        let col = Column::new(3, "test", vec![4, 1, 4, 2]);
        assert_eq!(vec![1, 2, 4], col.vertices);
        assert_eq!(3, col.origin);
        assert_eq!(1, col.value);
        assert!(!col.is_initial);
    }
    #[test]
    fn initial_columns_are_flagged() {
        let col = Column::initial(vec![0, 2]);
        assert!(col.is_initial);
        assert_eq!(INITIAL_COLUMN, col.label);
    }
    #[test]
    fn contains_tells_membership() {
        let col = Column::new(0, "test", vec![5, 3, 9]);
        assert!(col.contains(3));
        assert!(col.contains(9));
        assert!(!col.contains(4));
        assert_eq!(3, col.len());
        assert!(!col.is_empty());
    }
}
