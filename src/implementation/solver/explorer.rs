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

//! This module provides the processing of one node of the search tree. It is
//! shared by the sequential and parallel solvers: a worker pops a node, hands
//! it to the explorer along with its own LP solver, and merges the resulting
//! `Exploration` into the shared search state.

use std::time::Duration;

use log::{debug, warn};

use crate::{BranchOnVertexPair, ColumnGeneration, Cutoff, Error, Graph, LpSolver, Master, Node, NodeGraph, NodeStatus, Pricer, Result, Settings, Solution, round_bound};

/// Everything a worker needs to process nodes. It is immutable and may be
/// shared among threads.
pub(crate) struct Explorer<'a> {
    pub graph: &'a Graph,
    pub settings: &'a Settings,
    pub pricers: &'a [Box<dyn Pricer + Send + Sync>],
    pub cutoff: &'a (dyn Cutoff + Send + Sync),
    pub branching: BranchOnVertexPair,
}

/// The outcome of the processing of one node
#[derive(Debug, Clone)]
pub(crate) struct Exploration {
    /// The id of the processed node
    pub node: usize,
    pub depth: usize,
    /// The final status of the node
    pub status: NodeStatus,
    /// The lower bound of the node after column generation
    pub bound: f64,
    /// The best coloring found while processing the node (if any)
    pub solution: Option<Solution>,
    /// The children to push onto the fringe (if the node was branched)
    pub children: Vec<Node>,
    pub iterations: usize,
    pub master_time: Duration,
    pub pricing_time: Duration,
    pub pricing_timeout: bool,
    /// True iff the column generation stopped before convergence
    pub iteration_limit: bool,
    /// The number of children that could not be created
    pub malformed: usize,
}
impl Exploration {
    fn new(node: &Node) -> Self {
        Exploration {
            node: node.id,
            depth: node.depth,
            status: NodeStatus::Processing,
            bound: node.bound,
            solution: None,
            children: vec![],
            iterations: 0,
            master_time: Duration::ZERO,
            pricing_time: Duration::ZERO,
            pricing_timeout: false,
            iteration_limit: false,
            malformed: 0,
        }
    }
}

impl Explorer<'_> {
    /// Processes the given node, knowing that a coloring with `upper` colors
    /// exists.
    ///
    /// Node level errors never escape this method: they turn the node
    /// infeasible (or bounded) and are recorded in the exploration. When the
    /// cutoff fires during the column generation, `Error::GlobalTimeout` is
    /// returned and the node is abandoned.
    pub fn explore<L: LpSolver>(&self, lp: &mut L, node: Node, upper: usize) -> Result<Exploration> {
        let mut out = Exploration::new(&node);
        let tolerance = self.settings.tolerance;

        let graph = match NodeGraph::with_decisions(self.graph, &node.path) {
            Ok(graph) => graph,
            Err(Error::MalformedBranch(why)) => {
                warn!("node {} is malformed: {why}", node.id);
                out.malformed += 1;
                out.status = NodeStatus::Infeasible;
                return Ok(out);
            }
            Err(e) => return Err(e),
        };

        let mut master = Master::new(lp, self.graph.nb_vertices());
        for column in node.columns.iter().cloned() {
            master.add_column(column)?;
        }
        let colgen = ColumnGeneration {
            graph: &graph,
            pricers: self.pricers,
            cutoff: self.cutoff,
            max_iterations: self.settings.max_cg_iterations,
            tolerance,
            floor: node.bound,
            ceiling: upper,
            origin: node.id,
        };
        let outcome = match colgen.run(&mut master) {
            Ok(outcome) => outcome,
            Err(Error::InfeasibleNode) => {
                warn!("node {} has an infeasible master", node.id);
                out.status = NodeStatus::Infeasible;
                return Ok(out);
            }
            Err(e) => return Err(e),
        };
        out.iterations = outcome.iterations;
        out.master_time = outcome.master_time;
        out.pricing_time = outcome.pricing_time;
        if !outcome.is_converged() && self.cutoff.must_stop() {
            return Err(Error::GlobalTimeout);
        }
        if let Some(nodes) = outcome.pricing_timeout {
            warn!("node {}: {}", node.id, Error::PricingTimeout(nodes));
            out.pricing_timeout = true;
        } else if !outcome.is_converged() {
            out.iteration_limit = true;
        }

        out.bound = node.bound.max(outcome.bound);
        let columns = master.into_columns();
        let values = outcome.values;

        let mut best = upper;
        if self.branching.is_integral(&values) {
            let solution = self.branching.integral_solution(&columns, &values);
            best = best.min(solution.len());
            out.solution = Some(solution);
        }

        if round_bound(out.bound, tolerance) >= best {
            out.status = if best < upper { NodeStatus::Integral } else { NodeStatus::Bounded };
            self.log(&out);
            return Ok(out);
        }

        match self.branching.select(&graph, &columns, &values) {
            None => {
                let solution = self.branching.complete_solution(&graph, node.id);
                out.bound = out.bound.max(solution.len() as f64);
                out.status = if solution.len() < best { NodeStatus::Integral } else { NodeStatus::Bounded };
                if solution.len() < best {
                    out.solution = Some(solution);
                }
            }
            Some(pair) => {
                for child in self.branching.branch(self.graph, &node, &columns, out.bound, pair) {
                    match child {
                        Ok(child) => out.children.push(child),
                        Err(Error::MalformedBranch(why)) => {
                            warn!("child of node {} is malformed: {why}", node.id);
                            out.malformed += 1;
                        }
                        Err(e) => return Err(e),
                    }
                }
                out.status = NodeStatus::Branched;
            }
        }
        self.log(&out);
        Ok(out)
    }

    fn log(&self, out: &Exploration) {
        debug!("node {} (depth {}): {:?} with bound {:.4} after {} iterations",
            out.node, out.depth, out.status, out.bound, out.iterations);
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
