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

//! This module provides the implementation of a sequential branch-and-price
//! solver. That is a solver that processes the nodes of the search tree one
//! after the other, on the calling thread.
use std::marker::PhantomData;

use crate::{BranchOnVertexPair, Column, Completion, Cutoff, Error, Explorer, Graph, InitialColoring, LowerBound, LpSolver, MinilpSolver, Pricer, Reason, Result, RunCutoff, RunReport, SearchState, Settings, Solution, Solver, Strategies};

/// This is the structure implementing a single-threaded branch-and-price
/// solver.
///
/// # Example Usage
/// ```
/// # use bapcol::*;
/// // the 5-cycle: an odd cycle needs 3 colors
/// let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
/// let mut solver = SequentialSolver::<MinilpSolver>::new(&graph, Settings::default());
/// let outcome = solver.minimize().unwrap();
/// assert!(outcome.is_exact);
/// assert_eq!(Some(3), outcome.best_value);
/// // the optimal coloring is retrieved with
/// let coloring = solver.best_solution().unwrap();
/// assert!(graph.is_valid_coloring(&coloring));
/// ```
pub struct SequentialSolver<'a, L: LpSolver + Default = MinilpSolver> {
    graph: &'a Graph,
    settings: Settings,
    strategies: Strategies,
    state: SearchState,
    _phantom: PhantomData<L>,
}

impl<'a, L: LpSolver + Default> SequentialSolver<'a, L> {
    pub fn new(graph: &'a Graph, settings: Settings) -> Self {
        let strategies = Strategies::new(&settings);
        let state = SearchState::new(&settings);
        SequentialSolver { graph, settings, strategies, state, _phantom: PhantomData }
    }
    /// Sets the criterion that may stop the search before optimality is proved
    pub fn with_cutoff<C: Cutoff + Send + Sync + 'static>(mut self, cutoff: C) -> Self {
        self.strategies.cutoff = Box::new(cutoff);
        self
    }
    /// Sets the heuristic computing the initial coloring
    pub fn with_coloring<H: InitialColoring + Send + Sync + 'static>(mut self, coloring: H) -> Self {
        self.strategies.coloring = Box::new(coloring);
        self
    }
    /// Sets the heuristic computing the initial lower bound
    pub fn with_lower_bound<H: LowerBound + Send + Sync + 'static>(mut self, lower_bound: H) -> Self {
        self.strategies.lower_bound = Box::new(lower_bound);
        self
    }
    /// Replaces the pricers derived from the settings. They are called in
    /// sequence; the last one should be exact.
    pub fn with_pricers(mut self, pricers: Vec<Box<dyn Pricer + Send + Sync>>) -> Self {
        self.strategies.pricers = pricers;
        self
    }
    /// Warm starts the root node with the given independent sets
    pub fn with_initial_columns(mut self, columns: Vec<Column>) -> Self {
        self.strategies.initial_columns = Some(columns);
        self
    }
}

impl<L: LpSolver + Default> Solver for SequentialSolver<'_, L> {
    /// Applies the branch-and-price algorithm until the fringe is exhausted,
    /// the bounds meet, or the cutoff criterion is met.
    fn minimize(&mut self) -> Result<Completion> {
        self.state.bootstrap(self.graph, &self.settings, &self.strategies)?;

        let cutoff = RunCutoff::start(self.strategies.cutoff.as_ref(), &self.settings);
        let explorer = Explorer {
            graph: self.graph,
            settings: &self.settings,
            pricers: &self.strategies.pricers,
            cutoff: &cutoff,
            branching: BranchOnVertexPair::new(self.settings.tolerance),
        };
        let mut lp = L::default();

        loop {
            self.state.refresh_lower_bound(&[]);
            if self.state.is_closed() {
                break;
            }
            if cutoff.must_stop() {
                self.state.abort(Reason::CutoffOccurred);
                break;
            }
            let Some(node) = self.state.pop() else {
                break;
            };
            let upper = self.state.upper();
            match explorer.explore(&mut lp, node, upper) {
                Ok(exploration) => self.state.absorb(exploration),
                Err(Error::GlobalTimeout) => {
                    self.state.abort(Reason::CutoffOccurred);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self.state.complete())
    }
    fn best_value(&self) -> Option<usize> {
        self.state.best_value()
    }
    fn best_solution(&self) -> Option<Solution> {
        self.state.best_solution()
    }
    fn best_lower_bound(&self) -> usize {
        self.state.lower()
    }
    fn best_upper_bound(&self) -> usize {
        self.state.upper()
    }
    fn report(&self) -> RunReport {
        self.state.report(self.graph)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

/// As in the parallel solver, the sequential solver is mostly tested end to
/// end (see the tests folder). These tests check its configuration and the
/// state it exposes.
#[cfg(test)]
mod test_sequential_solver {
    use std::time::Duration;
    use crate::*;

    type Seq<'a> = SequentialSolver<'a, MinilpSolver>;

    fn c5() -> Graph {
        Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap()
    }

    #[test]
    fn by_default_nothing_is_known() {
        let g = c5();
        let solver = Seq::new(&g, Settings::default());
        assert_eq!(None, solver.best_value());
        assert_eq!(None, solver.best_solution());
        assert_eq!(0, solver.best_lower_bound());
        assert_eq!(usize::MAX, solver.best_upper_bound());
    }
    #[test]
    fn when_the_problem_is_solved_the_bounds_meet() {
        let g = c5();
        let mut solver = Seq::new(&g, Settings::default());
        let outcome = solver.minimize().unwrap();
        assert_eq!(Completion { is_exact: true, best_value: Some(3) }, outcome);
        assert_eq!(3, solver.best_lower_bound());
        assert_eq!(3, solver.best_upper_bound());
        assert_eq!(0.0, solver.gap());
    }
    #[test]
    fn a_bad_initial_coloring_gets_improved() {
        // coloring every vertex on its own is valid but far from optimal
        struct OneColorPerVertex;
        impl InitialColoring for OneColorPerVertex {
            fn color(&self, graph: &Graph) -> Vec<Vec<VertexId>> {
                (0..graph.nb_vertices()).map(|v| vec![v]).collect()
            }
        }
        let g = c5();
        let mut solver = Seq::new(&g, Settings::default()).with_coloring(OneColorPerVertex);
        let outcome = solver.minimize().unwrap();
        assert_eq!(Some(3), outcome.best_value);
        assert!(solver.report().nodes >= 1);
    }
    #[test]
    fn an_invalid_initial_coloring_is_a_contract_violation() {
        struct Monochrome;
        impl InitialColoring for Monochrome {
            fn color(&self, graph: &Graph) -> Vec<Vec<VertexId>> {
                vec![(0..graph.nb_vertices()).collect()]
            }
        }
        let g = c5();
        let mut solver = Seq::new(&g, Settings::default()).with_coloring(Monochrome);
        assert!(matches!(solver.minimize(), Err(Error::ContractViolation(_))));
    }
    #[test]
    fn a_trivial_lower_bound_still_yields_the_optimum() {
        struct Zero;
        impl LowerBound for Zero {
            fn lower_bound(&self, _: &Graph) -> usize { 0 }
        }
        let g = c5();
        let mut solver = Seq::new(&g, Settings::default()).with_lower_bound(Zero);
        assert_eq!(Some(3), solver.minimize().unwrap().best_value);
        assert_eq!(3, solver.best_lower_bound());
    }
    #[test]
    fn an_elapsed_cutoff_returns_the_initial_coloring() {
        let g = c5();
        let settings = SettingsBuilder::default().warm_start(false).build().unwrap();
        let mut solver = Seq::new(&g, settings).with_cutoff(TimeBudget::new(Duration::ZERO));
        let outcome = solver.minimize().unwrap();
        assert!(!outcome.is_exact);
        assert_eq!(Some(5), outcome.best_value);
        assert_eq!(Some(Reason::CutoffOccurred), solver.report().reason);
        assert!(solver.gap() > 0.0);
    }
    #[test]
    fn custom_pricers_are_used() {
        let g = c5();
        let mut solver = Seq::new(&g, Settings::default())
            .with_pricers(vec![Box::new(ExactPricer::new())]);
        assert_eq!(Some(3), solver.minimize().unwrap().best_value);
        let report = solver.report();
        assert!(report.columns.iter().all(|c| c.label != GREEDY_PRICER));
    }
}
