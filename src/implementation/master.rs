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

//! This module provides the master problem of a node: the restricted LP
//! relaxation of the set covering formulation over the columns generated so
//! far.

use fxhash::FxHashSet;

use crate::{Column, Error, LpSolution, LpSolver, Result, VertexId};

/// The master problem maintains the working set of columns of one node. The
/// LP itself is delegated to an `LpSolver` which is owned by the worker
/// processing the node, and reset when the master is created.
///
/// # Note
/// Columns are never removed from a master. They are deduplicated on their
/// vertex sets: adding twice the same independent set has no effect.
pub struct Master<'a, L: LpSolver> {
    lp: &'a mut L,
    nb_vertices: usize,
    columns: Vec<Column>,
    known: FxHashSet<Vec<VertexId>>,
}

impl<'a, L: LpSolver> Master<'a, L> {
    /// Creates an empty master problem with one covering row per vertex
    pub fn new(lp: &'a mut L, nb_vertices: usize) -> Self {
        lp.reset(nb_vertices);
        Master { lp, nb_vertices, columns: vec![], known: FxHashSet::default() }
    }
    /// Adds a column to the master. It returns true iff the column was not
    /// already part of the master.
    ///
    /// A column naming a vertex absent from the graph (or no vertex at all)
    /// violates the contract of the master.
    pub fn add_column(&mut self, column: Column) -> Result<bool> {
        if column.is_empty() {
            return Err(Error::ContractViolation("empty columns cannot enter the master".to_string()));
        }
        if let Some(v) = column.vertices.iter().find(|&&v| v >= self.nb_vertices) {
            return Err(Error::ContractViolation(format!("column references vertex {v} beyond {}", self.nb_vertices)));
        }
        if self.known.contains(&column.vertices) {
            return Ok(false);
        }
        self.known.insert(column.vertices.clone());
        self.lp.add_column(&column.vertices, column.value as f64);
        self.columns.push(column);
        Ok(true)
    }
    /// The columns of the master, in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
    pub fn nb_columns(&self) -> usize {
        self.columns.len()
    }
    /// Solves the LP relaxation and returns its objective along with the
    /// dual value of each vertex
    pub fn solve(&mut self) -> Result<LpSolution> {
        self.lp.solve()
    }
    /// Returns the value of each column at the optimum of the relaxation
    pub fn values(&mut self) -> Result<Vec<f64>> {
        let values = self.lp.values()?;
        if values.len() != self.columns.len() {
            return Err(Error::Lp(format!("{} values for {} columns", values.len(), self.columns.len())));
        }
        Ok(values)
    }
    /// Consumes the master and yields its columns
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_master {
    use crate::*;

    #[test]
    fn creating_a_master_resets_the_lp() {
        let mut lp = MinilpSolver::default();
        lp.reset(2);
        lp.add_column(&[0], 1.0);
        let master = Master::new(&mut lp, 3);
        assert_eq!(0, master.nb_columns());
        drop(master);
        assert_eq!(0, lp.nb_columns());
    }
    #[test]
    fn duplicate_columns_are_ignored() {
        let mut lp = MinilpSolver::default();
        let mut master = Master::new(&mut lp, 3);
        assert!(master.add_column(Column::new(0, "test", vec![0, 2])).unwrap());
        assert!(!master.add_column(Column::new(4, "other", vec![2, 0])).unwrap());
        assert_eq!(1, master.nb_columns());
        assert_eq!("test", master.columns()[0].label);
    }
    #[test]
    fn columns_beyond_the_graph_violate_the_contract() {
        let mut lp = MinilpSolver::default();
        let mut master = Master::new(&mut lp, 3);
        let err = master.add_column(Column::new(0, "test", vec![1, 3])).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
        let err = master.add_column(Column::new(0, "test", vec![])).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }
    #[test]
    fn an_uncovered_vertex_makes_the_node_infeasible() {
        let mut lp = MinilpSolver::default();
        let mut master = Master::new(&mut lp, 3);
        master.add_column(Column::new(0, "test", vec![0, 1])).unwrap();
        assert_eq!(Err(Error::InfeasibleNode), master.solve());
    }
    #[test]
    fn values_follow_the_insertion_order() {
        let mut lp = MinilpSolver::default();
        let mut master = Master::new(&mut lp, 3);
        master.add_column(Column::new(0, "test", vec![0, 2])).unwrap();
        master.add_column(Column::new(0, "test", vec![1])).unwrap();
        master.add_column(Column::new(0, "test", vec![0])).unwrap();
        let sol = master.solve().unwrap();
        assert!((sol.objective - 2.0).abs() < 1e-6);
        let values = master.values().unwrap();
        assert!((values[0] - 1.0).abs() < 1e-6);
        assert!((values[1] - 1.0).abs() < 1e-6);
        assert!(values[2].abs() < 1e-6);
        assert_eq!(3, master.into_columns().len());
    }
}
