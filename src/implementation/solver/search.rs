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

//! This module provides the state of a search which is shared by all the
//! workers of a solver: the fringe, the bounds and the statistics of the run.
//! It also bootstraps that state with the root node.

use std::time::Duration;

use bit_set::BitSet;
use log::info;

use crate::{BoundState, Column, Completion, Diagnostics, Error, Exploration, Fringe, Graph, Node, NodeStatus, Reason, Result, RunReport, SINGLETON_COLUMN, Settings, Solution, Strategies, round_bound};

/// The shared state of a search. The solvers guarantee that it is only ever
/// mutated by one worker at a time.
pub(crate) struct SearchState {
    /// The open nodes
    fringe: Box<dyn Fringe + Send + Sync>,
    /// The global bounds and incumbent
    bounds: BoundState,
    /// True iff the incumbent is a coloring of the graph
    known: bool,
    /// The id to assign to the next node pushed onto the fringe
    next_id: usize,
    /// The number of nodes processed so far
    nodes: usize,
    iterations: usize,
    master_time: Duration,
    pricing_time: Duration,
    diagnostics: Diagnostics,
    /// If the search was stopped before proving optimality, this is why
    abort_proof: Option<Reason>,
    tolerance: f64,
}

impl SearchState {
    pub fn new(settings: &Settings) -> Self {
        SearchState {
            fringe: settings.node_selection.fringe(),
            bounds: BoundState::new(0, usize::MAX, vec![]),
            known: false,
            next_id: 0,
            nodes: 0,
            iterations: 0,
            master_time: Duration::ZERO,
            pricing_time: Duration::ZERO,
            diagnostics: Diagnostics::default(),
            abort_proof: None,
            tolerance: settings.tolerance,
        }
    }

    /// Computes the initial bounds and pushes the root node onto the fringe
    /// (unless the initial bounds already match).
    ///
    /// The user supplied columns must be independent sets of the graph. They
    /// are added to the root master, and they become the incumbent if they
    /// cover every vertex with less colors than the initial coloring.
    pub fn bootstrap(&mut self, graph: &Graph, settings: &Settings, strategies: &Strategies) -> Result<()> {
        *self = Self::new(settings);
        let n = graph.nb_vertices();
        if n == 0 {
            self.bounds = BoundState::new(0, 0, vec![]);
            self.known = true;
            info!("{}: empty graph", graph.name().unwrap_or("graph"));
            return Ok(());
        }

        let mut columns: Vec<Column> = vec![];
        let incumbent: Solution = if settings.warm_start {
            let classes = strategies.coloring.color(graph);
            let classes = classes.into_iter().map(Column::initial).collect::<Vec<_>>();
            if !graph.is_valid_coloring(&classes) {
                return Err(Error::ContractViolation("the initial coloring is not a proper coloring".to_string()));
            }
            columns.extend(classes.iter().cloned());
            classes
        } else {
            (0..n).map(|v| Column::new(0, SINGLETON_COLUMN, vec![v])).collect()
        };
        let mut upper = BoundState::new(0, n, (0..n).map(|v| Column::new(0, SINGLETON_COLUMN, vec![v])).collect());
        upper.improve_upper(incumbent);

        if let Some(initial) = strategies.initial_columns.as_ref() {
            for column in initial.iter() {
                if column.is_empty() || !graph.is_independent(&column.vertices) {
                    return Err(Error::ContractViolation(format!("initial column {:?} is not an independent set", column.vertices)));
                }
            }
            if graph.is_valid_coloring(initial) {
                upper.improve_upper(initial.clone());
            }
            columns.extend(initial.iter().cloned());
        }

        let mut covered = BitSet::with_capacity(n);
        for column in columns.iter() {
            covered.extend(column.vertices.iter().copied());
        }
        for v in (0..n).filter(|v| !covered.contains(*v)) {
            columns.push(Column::new(0, SINGLETON_COLUMN, vec![v]));
        }

        let lower = strategies.lower_bound.lower_bound(graph);
        self.bounds = BoundState::new(lower, upper.upper(), upper.incumbent().clone());
        self.known = true;
        info!("{}: {} vertices, {} edges, initial bounds [{}, {}]",
            graph.name().unwrap_or("graph"), n, graph.nb_edges(), self.bounds.lower(), self.bounds.upper());

        if !self.bounds.is_closed() {
            self.push(Node::root(self.bounds.lower() as f64, columns));
        }
        Ok(())
    }

    pub fn upper(&self) -> usize {
        self.bounds.upper()
    }
    pub fn lower(&self) -> usize {
        self.bounds.lower()
    }
    pub fn is_closed(&self) -> bool {
        self.bounds.is_closed()
    }
    pub fn best_value(&self) -> Option<usize> {
        self.known.then(|| self.bounds.upper())
    }
    pub fn best_solution(&self) -> Option<Solution> {
        self.known.then(|| self.bounds.incumbent().clone())
    }
    pub fn fringe_is_empty(&self) -> bool {
        self.fringe.is_empty()
    }
    pub fn is_aborted(&self) -> bool {
        self.abort_proof.is_some()
    }

    /// Pushes a node onto the fringe unless it is dominated by the incumbent
    pub fn push(&mut self, mut node: Node) {
        if node.rounded_bound(self.tolerance) >= self.bounds.upper() {
            self.diagnostics.bounded += 1;
            return;
        }
        node.id = self.next_id;
        node.status = NodeStatus::Open;
        self.next_id += 1;
        self.fringe.push(node);
    }
    /// Pops the next node worth exploring (if any). The dominated nodes met
    /// on the way are discarded.
    pub fn pop(&mut self) -> Option<Node> {
        while let Some(mut node) = self.fringe.pop() {
            if node.rounded_bound(self.tolerance) >= self.bounds.upper() {
                self.diagnostics.bounded += 1;
                continue;
            }
            node.status = NodeStatus::Processing;
            self.nodes += 1;
            return Some(node);
        }
        None
    }
    /// Raises the global lower bound to the smallest bound of the nodes still
    /// open or being processed. When no such node exists, nothing changes.
    pub fn refresh_lower_bound(&mut self, ongoing: &[Option<f64>]) {
        let lowest = ongoing.iter().flatten().copied()
            .chain(self.fringe.lowest_bound())
            .reduce(f64::min);
        if let Some(lowest) = lowest {
            if self.bounds.raise_lower(round_bound(lowest, self.tolerance)) {
                info!("lower bound raised to {}", self.bounds.lower());
            }
        }
    }
    /// Merges the outcome of a node into the state of the search
    pub fn absorb(&mut self, exploration: Exploration) {
        self.iterations += exploration.iterations;
        self.master_time += exploration.master_time;
        self.pricing_time += exploration.pricing_time;
        self.diagnostics.malformed += exploration.malformed;
        if exploration.pricing_timeout {
            self.diagnostics.pricing_timeouts += 1;
        }
        if exploration.iteration_limit {
            self.diagnostics.iteration_limits += 1;
        }
        match exploration.status {
            NodeStatus::Infeasible => self.diagnostics.infeasible += 1,
            NodeStatus::Bounded => self.diagnostics.bounded += 1,
            NodeStatus::Integral => self.diagnostics.integral += 1,
            NodeStatus::Branched => self.diagnostics.branched += 1,
            NodeStatus::Open | NodeStatus::Processing => {}
        }
        if let Some(solution) = exploration.solution {
            let colors = solution.len();
            if self.bounds.improve_upper(solution) {
                info!("new incumbent with {colors} colors found at node {} (bounds [{}, {}])",
                    exploration.node, self.bounds.lower(), self.bounds.upper());
            }
        }
        for child in exploration.children {
            self.push(child);
        }
    }
    /// Stops the search without completing the proof of optimality
    pub fn abort(&mut self, reason: Reason) {
        self.abort_proof = Some(reason);
        self.fringe.clear();
    }
    /// Wraps up the search. Unless it was aborted, the exploration is
    /// complete and the incumbent is optimal.
    pub fn complete(&mut self) -> Completion {
        self.fringe.clear();
        if self.abort_proof.is_none() {
            self.bounds.close();
        }
        info!("search {} after {} nodes and {} iterations: {} colors (lower bound {})",
            if self.abort_proof.is_none() { "completed" } else { "aborted" },
            self.nodes, self.iterations, self.bounds.upper(), self.bounds.lower());
        Completion { is_exact: self.abort_proof.is_none(), best_value: self.best_value() }
    }
    /// Summarizes the search
    pub fn report(&self, graph: &Graph) -> RunReport {
        RunReport {
            instance: graph.name().map(str::to_string),
            objective: self.best_value(),
            optimal: self.known && self.abort_proof.is_none() && self.bounds.is_closed(),
            lower_bound: self.bounds.lower(),
            nodes: self.nodes,
            iterations: self.iterations,
            master_time: self.master_time,
            pricing_time: self.pricing_time,
            columns: self.best_solution().unwrap_or_default(),
            reason: self.abort_proof,
            diagnostics: self.diagnostics,
        }
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
