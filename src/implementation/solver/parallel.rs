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

//! This module provides the implementation of a parallel branch-and-price
//! solver. That is a solver that will process the open nodes of the search
//! tree using as many threads as requested. By default, it uses as many
//! threads as the number of hardware threads available on the machine.
//!
//! Each worker owns its LP solver and processes one node at a time. Only the
//! search state (fringe, bounds, incumbent and statistics) is shared, and it
//! is never locked while a node is being processed.
use std::marker::PhantomData;

use parking_lot::{Condvar, Mutex};

use crate::{BranchOnVertexPair, Column, Completion, Cutoff, Error, Exploration, Explorer, Graph, InitialColoring, LowerBound, LpSolver, MinilpSolver, Node, Pricer, Reason, Result, RunCutoff, RunReport, SearchState, Settings, Solution, Solver, Strategies};

/// The shared data that may only be manipulated within critical sections
struct Critical {
    /// The fringe, bounds and statistics of the search
    search: SearchState,
    /// This is the number of nodes that are currently being explored.
    ///
    /// # Note
    /// This is the piece of information that lets us distinguish between a
    /// node-starvation and the completion of the search. This counter needs
    /// to be carefully managed to guarantee the termination of all threads.
    ongoing: usize,
    /// The bound of the node currently processed by each thread (None when
    /// the thread is idle). These nodes are neither in the fringe nor
    /// closed, so they must be accounted for in the global lower bound.
    ongoing_bounds: Vec<Option<f64>>,
    /// The fatal error which stopped the search (if any)
    failure: Option<Error>,
}
/// The state which is shared among the many running threads: it provides an
/// access to the critical data (protected by a mutex) as well as a monitor
/// (condvar) to park threads in case of node-starvation.
struct Shared<'a, 'b> {
    explorer: Explorer<'b>,
    cutoff: &'b RunCutoff<'b>,
    critical: &'a Mutex<Critical>,
    /// This is the monitor on which nodes must wait when facing an empty
    /// fringe. Whenever a thread has completed the processing of a node, it
    /// must wake-up all parked threads waiting on this monitor.
    monitor: &'a Condvar,
}
/// The workload a thread can get from the shared state
enum WorkLoad {
    /// There is no work left to be done: you can safely terminate
    Complete,
    /// The work must stop because of an external cutoff or a failure
    Aborted,
    /// There is nothing you can do right now. Check again when you wake up
    Starvation,
    /// The item to process, along with the number of colors of the incumbent
    WorkItem { node: Node, upper: usize },
}

/// This is the structure implementing a multi-threaded branch-and-price
/// solver.
///
/// # Example Usage
/// ```
/// # use bapcol::*;
/// // the Petersen graph has chromatic number 3
/// let mut edges = vec![];
/// for i in 0..5 {
///     edges.push((i, (i + 1) % 5));      // outer cycle
///     edges.push((i, i + 5));            // spokes
///     edges.push((i + 5, (i + 2) % 5 + 5)); // inner star
/// }
/// let graph = Graph::from_edges(10, &edges).unwrap().with_name("petersen");
/// let mut solver = DefaultSolver::new(&graph, Settings::default()).with_nb_threads(2);
/// let outcome = solver.minimize().unwrap();
/// assert_eq!(Some(3), outcome.best_value);
///
/// let report = solver.report();
/// assert!(report.optimal);
/// println!("{}", report.to_json());
/// ```
pub struct ParallelSolver<'a, L: LpSolver + Default + Send = MinilpSolver> {
    graph: &'a Graph,
    settings: Settings,
    strategies: Strategies,
    critical: Mutex<Critical>,
    monitor: Condvar,
    /// This is a configuration parameter that tunes the number of threads that
    /// will be spawned to solve the problem. By default, this number amounts
    /// to the value set in the settings.
    nb_threads: usize,
    /// This is just a marker that allows us to remember the exact type of the
    /// LP solvers to be instantiated.
    _phantom: PhantomData<L>,
}

impl<'a, L: LpSolver + Default + Send> ParallelSolver<'a, L> {
    pub fn new(graph: &'a Graph, settings: Settings) -> Self {
        let nb_threads = settings.nb_threads.max(1);
        let strategies = Strategies::new(&settings);
        let search = SearchState::new(&settings);
        ParallelSolver {
            graph,
            settings,
            strategies,
            critical: Mutex::new(Critical { search, ongoing: 0, ongoing_bounds: vec![None; nb_threads], failure: None }),
            monitor: Condvar::new(),
            nb_threads,
            _phantom: PhantomData,
        }
    }
    /// Sets the number of threads used by the solver
    pub fn with_nb_threads(mut self, nb_threads: usize) -> Self {
        self.nb_threads = nb_threads.max(1);
        self
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

    /// This method initializes the search: it computes the initial bounds and
    /// posts the root node onto the fringe so that a thread can pick it up.
    fn initialize(&mut self) -> Result<()> {
        let critical = self.critical.get_mut();
        critical.search.bootstrap(self.graph, &self.settings, &self.strategies)?;
        critical.ongoing = 0;
        critical.ongoing_bounds = vec![None; self.nb_threads];
        critical.failure = None;
        Ok(())
    }

    /// Acknowledges that a thread finished processing its node, and merges
    /// the outcome of that node into the search.
    fn notify_node_finished(shared: &Shared, thread_id: usize, outcome: Result<Exploration>) {
        let mut critical = shared.critical.lock();
        critical.ongoing -= 1;
        critical.ongoing_bounds[thread_id] = None;
        match outcome {
            Ok(exploration) => critical.search.absorb(exploration),
            Err(Error::GlobalTimeout) => critical.search.abort(Reason::CutoffOccurred),
            Err(e) => {
                critical.search.abort(Reason::CutoffOccurred);
                if critical.failure.is_none() {
                    critical.failure = Some(e);
                }
            }
        }
        shared.monitor.notify_all();
    }

    /// Consults the shared state to fetch a workload. Depending on the current
    /// state, the workload can either be:
    ///
    ///   + Complete, when the search is over and all threads should stop
    ///   + Aborted, when the search was interrupted
    ///   + Starvation, when there is no node available for processing
    ///     at the time being (but some nodes are still being processed
    ///     and thus the search cannot be considered over).
    ///   + WorkItem, when the thread successfully obtained a node to process.
    fn get_workload(shared: &Shared, thread_id: usize) -> WorkLoad {
        let mut guard = shared.critical.lock();
        let critical = &mut *guard;

        // Do we need to stop ?
        if critical.failure.is_some() || critical.search.is_aborted() {
            return WorkLoad::Aborted;
        }

        critical.search.refresh_lower_bound(&critical.ongoing_bounds);

        // Are we done ?
        if critical.search.is_closed() || (critical.ongoing == 0 && critical.search.fringe_is_empty()) {
            return WorkLoad::Complete;
        }

        if shared.cutoff.must_stop() {
            critical.search.abort(Reason::CutoffOccurred);
            shared.monitor.notify_all();
            return WorkLoad::Aborted;
        }

        // Nothing to do yet ? => Wait for someone to post jobs
        if critical.search.fringe_is_empty() {
            shared.monitor.wait(&mut guard);
            return WorkLoad::Starvation;
        }

        match critical.search.pop() {
            None => WorkLoad::Starvation,
            Some(node) => {
                critical.ongoing += 1;
                critical.ongoing_bounds[thread_id] = Some(node.bound);
                WorkLoad::WorkItem { node, upper: critical.search.upper() }
            }
        }
    }
}

impl<L: LpSolver + Default + Send> Solver for ParallelSolver<'_, L> {
    /// Applies the branch-and-price algorithm. To do so, it spawns
    /// `nb_threads` workers (long running threads); each of which will
    /// continually get a workload and process it until the search is over.
    fn minimize(&mut self) -> Result<Completion> {
        self.initialize()?;

        let cutoff = RunCutoff::start(self.strategies.cutoff.as_ref(), &self.settings);
        let shared = Shared {
            explorer: Explorer {
                graph: self.graph,
                settings: &self.settings,
                pricers: &self.strategies.pricers,
                cutoff: &cutoff,
                branching: BranchOnVertexPair::new(self.settings.tolerance),
            },
            cutoff: &cutoff,
            critical: &self.critical,
            monitor: &self.monitor,
        };

        std::thread::scope(|s| {
            for i in 0..self.nb_threads {
                let shared = &shared;
                s.spawn(move || {
                    let mut lp = L::default();
                    loop {
                        match Self::get_workload(shared, i) {
                            WorkLoad::Complete => break,
                            WorkLoad::Aborted => break,
                            WorkLoad::Starvation => continue,
                            WorkLoad::WorkItem { node, upper } => {
                                let outcome = shared.explorer.explore(&mut lp, node, upper);
                                let stop = outcome.is_err();
                                Self::notify_node_finished(shared, i, outcome);
                                if stop {
                                    break;
                                }
                            }
                        }
                    }
                });
            }
        });

        let critical = self.critical.get_mut();
        if let Some(failure) = critical.failure.take() {
            return Err(failure);
        }
        Ok(critical.search.complete())
    }

    fn best_value(&self) -> Option<usize> {
        self.critical.lock().search.best_value()
    }
    fn best_solution(&self) -> Option<Solution> {
        self.critical.lock().search.best_solution()
    }
    fn best_lower_bound(&self) -> usize {
        self.critical.lock().search.lower()
    }
    fn best_upper_bound(&self) -> usize {
        self.critical.lock().search.upper()
    }
    fn report(&self) -> RunReport {
        self.critical.lock().search.report(self.graph)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

/// Unlike the rest of the library, the solvers modules are not tested in depth
/// with unit tests. So we basically unit test the configuration capabilities
/// of the solvers and then resort to the solving of graphs with a known
/// chromatic number (see the tests folder) to validate the behavior of the
/// minimize function.
#[cfg(test)]
mod test_parallel_solver {
    use std::time::Duration;
    use crate::*;

    fn c5() -> Graph {
        Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap()
    }

    #[test]
    fn by_default_best_lb_is_zero_and_best_ub_is_plus_infinity() {
        let g = c5();
        let solver = DefaultSolver::new(&g, Settings::default());
        assert_eq!(0, solver.best_lower_bound());
        assert_eq!(usize::MAX, solver.best_upper_bound());
        assert_eq!(None, solver.best_value());
    }
    #[test]
    fn when_the_problem_is_solved_best_lb_is_best_value() {
        let g = c5();
        let mut solver = DefaultSolver::new(&g, Settings::default()).with_nb_threads(3);
        let outcome = solver.minimize().unwrap();
        assert_eq!(Completion { is_exact: true, best_value: Some(3) }, outcome);
        assert_eq!(3, solver.best_lower_bound());
        assert_eq!(3, solver.best_upper_bound());
        assert!(g.is_valid_coloring(&solver.best_solution().unwrap()));
    }
    #[test]
    fn the_number_of_threads_is_at_least_one() {
        let g = c5();
        let mut solver = DefaultSolver::new(&g, Settings::default()).with_nb_threads(0);
        assert_eq!(Some(3), solver.minimize().unwrap().best_value);
    }
    #[test]
    fn an_elapsed_cutoff_stops_all_workers() {
        let g = c5();
        let settings = SettingsBuilder::default().warm_start(false).nb_threads(4).build().unwrap();
        let mut solver = DefaultSolver::new(&g, settings).with_cutoff(TimeBudget::new(Duration::ZERO));
        let outcome = solver.minimize().unwrap();
        assert!(!outcome.is_exact);
        assert_eq!(Some(5), outcome.best_value);
        assert_eq!(0, solver.report().nodes);
    }
    #[test]
    fn invalid_initial_columns_are_reported() {
        let g = c5();
        let mut solver = DefaultSolver::new(&g, Settings::default())
            .with_initial_columns(vec![Column::initial(vec![3, 4])]);
        assert!(matches!(solver.minimize(), Err(Error::ContractViolation(_))));
    }
    #[test]
    fn minimize_may_be_called_twice() {
        let g = c5();
        let mut solver = DefaultSolver::new(&g, Settings::default()).with_nb_threads(2);
        let first = solver.minimize().unwrap();
        let second = solver.minimize().unwrap();
        assert_eq!(first, second);
    }
}
