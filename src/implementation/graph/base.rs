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

//! This module provides the immutable base graph whose chromatic number is
//! being computed.

use bit_set::BitSet;

use crate::{Error, Result, VertexId, Column};

/// An undirected simple graph. Vertices are identified by the integers in
/// `0..nb_vertices` and the adjacency is stored as one bitset per vertex.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    /// An optional name for the instance
    name: Option<String>,
    /// adjacency[v] is the set of neighbors of v
    adjacency: Vec<BitSet>,
    /// The number of (undirected) edges
    nb_edges: usize,
}

impl Graph {
    /// Creates an edgeless graph with the given number of vertices
    pub fn new(nb_vertices: usize) -> Self {
        Graph {
            name: None,
            adjacency: vec![BitSet::with_capacity(nb_vertices); nb_vertices],
            nb_edges: 0,
        }
    }
    /// Creates a graph from its list of edges
    pub fn from_edges(nb_vertices: usize, edges: &[(VertexId, VertexId)]) -> Result<Self> {
        let mut graph = Self::new(nb_vertices);
        for (u, v) in edges.iter().copied() {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }
    /// Gives a name to this instance
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }
    /// The name of the instance (if any)
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// Adds the edge {u, v} to the graph. Adding an edge twice has no effect.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<()> {
        let n = self.nb_vertices();
        if u >= n || v >= n {
            return Err(Error::ContractViolation(format!("edge ({u}, {v}) references a vertex beyond {n}")));
        }
        if u == v {
            return Err(Error::ContractViolation(format!("self loop on vertex {u} cannot be colored")));
        }
        if self.adjacency[u].insert(v) {
            self.adjacency[v].insert(u);
            self.nb_edges += 1;
        }
        Ok(())
    }
    pub fn nb_vertices(&self) -> usize {
        self.adjacency.len()
    }
    pub fn nb_edges(&self) -> usize {
        self.nb_edges
    }
    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency[v].len()
    }
    /// The set of neighbors of v
    pub fn neighbors(&self, v: VertexId) -> &BitSet {
        &self.adjacency[v]
    }
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency[u].contains(v)
    }
    /// Returns true iff the given vertices exist and are pairwise non adjacent
    pub fn is_independent(&self, vertices: &[VertexId]) -> bool {
        let n = self.nb_vertices();
        let mut set = BitSet::with_capacity(n);
        for v in vertices.iter().copied() {
            if v >= n || !self.adjacency[v].is_disjoint(&set) {
                return false;
            }
            set.insert(v);
        }
        true
    }
    /// Checks that the given columns form a valid coloring: each column must
    /// be an independent set, and every vertex must be covered at least once
    /// (a vertex covered many times may pick any of its classes).
    pub fn is_valid_coloring(&self, columns: &[Column]) -> bool {
        let mut covered = BitSet::with_capacity(self.nb_vertices());
        for col in columns {
            if !self.is_independent(&col.vertices) {
                return false;
            }
            covered.extend(col.vertices.iter().copied());
        }
        covered.len() == self.nb_vertices()
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
