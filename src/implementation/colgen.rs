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

//! This module provides the column generation loop solving the LP relaxation
//! of one node. It alternates between the master problem and the pricers:
//!
//! ```plain
//!   SOLVING_MASTER --(duals)--> PRICING --(columns added)--> SOLVING_MASTER
//!                                  |
//!                                  +--(exact pricer finds nothing)--> CONVERGED
//!   budget, deadline, pricing timeout or dominated bound --> ITERATION_LIMIT
//! ```

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::{Column, Cutoff, Error, LpSolution, LpSolver, Master, NodeGraph, Pricer, Result, round_bound};

/// The states of the column generation loop
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColGenState {
    /// The restricted master is being solved
    SolvingMaster,
    /// Improving columns are looked for under the current duals
    Pricing,
    /// The exact pricer proved that no improving column exists: the master
    /// objective is the optimum of the node relaxation
    Converged,
    /// The loop was stopped before its convergence could be certified
    IterationLimit,
}

/// The outcome of the column generation of one node
#[derive(Debug, Clone)]
pub struct ColGenOutcome {
    /// The final state of the loop: either `Converged` or `IterationLimit`
    pub state: ColGenState,
    /// The objective of the last restricted master (an upper bound on the
    /// relaxation optimum unless the loop converged)
    pub objective: f64,
    /// A valid lower bound on the relaxation optimum. It equals the
    /// objective upon convergence and is the best Lagrangian bound otherwise.
    pub bound: f64,
    /// The value of each master column at the optimum of the last master
    pub values: Vec<f64>,
    /// The number of master solves
    pub iterations: usize,
    /// Time spent solving the master
    pub master_time: Duration,
    /// Time spent pricing
    pub pricing_time: Duration,
    /// The budget the exact pricer exceeded (if it did)
    pub pricing_timeout: Option<usize>,
    /// True iff the loop stopped because the bound proved the node can't
    /// improve on the incumbent
    pub dominated: bool,
}
impl ColGenOutcome {
    pub fn is_converged(&self) -> bool {
        self.state == ColGenState::Converged
    }
}

/// The column generation of one node
pub struct ColumnGeneration<'a, 'g> {
    /// The node graph: every generated column is one of its independent sets
    pub graph: &'a NodeGraph<'g>,
    /// The pricers, called in sequence. The last one should be exact.
    pub pricers: &'a [Box<dyn Pricer + Send + Sync>],
    /// The external stopping criterion
    pub cutoff: &'a (dyn Cutoff + Send + Sync),
    /// The maximum number of master solves
    pub max_iterations: usize,
    /// The numeric tolerance
    pub tolerance: f64,
    /// A lower bound inherited from the parent node
    pub floor: f64,
    /// The number of colors of the incumbent: once the bound guarantees that
    /// no better coloring lies in this node, the loop stops early.
    pub ceiling: usize,
    /// The id of the node (recorded as origin of the generated columns)
    pub origin: usize,
}

impl ColumnGeneration<'_, '_> {
    /// Runs the column generation loop on the given master until it
    /// converges or hits one of its limits.
    ///
    /// An infeasible master yields `Error::InfeasibleNode`. A pricing timeout
    /// is not an error: the loop stops with `pricing_timeout` set.
    /// An exact pricer which only yields columns the master already holds
    /// does not certify convergence either: the loop stops at its bound.
    pub fn run<L: LpSolver>(&self, master: &mut Master<'_, L>) -> Result<ColGenOutcome> {
        let threshold = 1.0 + self.tolerance;
        let mut state = ColGenState::SolvingMaster;
        let mut solution: Option<LpSolution> = None;
        let mut iterations = 0;
        let mut bound = self.floor;
        let mut master_time = Duration::ZERO;
        let mut pricing_time = Duration::ZERO;
        let mut pricing_timeout = None;
        let mut dominated = false;

        loop {
            match state {
                ColGenState::SolvingMaster => {
                    if iterations >= self.max_iterations || self.cutoff.must_stop() {
                        state = ColGenState::IterationLimit;
                        continue;
                    }
                    iterations += 1;
                    let start = Instant::now();
                    let lp = master.solve()?;
                    master_time += start.elapsed();
                    trace!("node {} iteration {}: master objective {:.6} with {} columns",
                        self.origin, iterations, lp.objective, master.nb_columns());
                    solution = Some(lp);
                    state = ColGenState::Pricing;
                }
                ColGenState::Pricing => {
                    let Some(lp) = solution.as_ref() else {
                        state = ColGenState::SolvingMaster;
                        continue;
                    };
                    let weights = self.graph.weights(&lp.duals);
                    let mut added = 0;
                    let mut known = 0;
                    let mut certified = false;
                    for pricer in self.pricers.iter() {
                        let start = Instant::now();
                        let pricing = pricer.price(self.graph, &weights, threshold);
                        pricing_time += start.elapsed();
                        let pricing = match pricing {
                            Ok(pricing) => pricing,
                            Err(Error::PricingTimeout(nodes)) => {
                                trace!("node {}: {} gave up after {} nodes", self.origin, pricer.name(), nodes);
                                pricing_timeout = Some(nodes);
                                break;
                            }
                            Err(e) => return Err(e),
                        };
                        if let Some(max_weight) = pricing.max_weight {
                            bound = bound.max(lp.objective / max_weight.max(1.0));
                        }
                        for vertices in pricing.columns {
                            if !self.graph.accepts(&vertices) {
                                return Err(Error::ContractViolation(format!(
                                    "{} priced a set which is not independent in node {}: {vertices:?}",
                                    pricer.name(), self.origin)));
                            }
                            if master.add_column(Column::new(self.origin, pricer.name(), vertices))? {
                                added += 1;
                            } else {
                                known += 1;
                            }
                        }
                        if added > 0 {
                            break;
                        }
                        if pricer.is_exact() {
                            if known > 0 {
                                debug!("node {} iteration {}: {} only priced {} columns already in the master",
                                    self.origin, iterations, pricer.name(), known);
                            } else {
                                certified = true;
                            }
                            break;
                        }
                    }

                    state = if certified {
                        bound = bound.max(lp.objective);
                        ColGenState::Converged
                    } else if pricing_timeout.is_some() || added == 0 {
                        ColGenState::IterationLimit
                    } else if round_bound(bound, self.tolerance) >= self.ceiling {
                        dominated = true;
                        ColGenState::IterationLimit
                    } else {
                        ColGenState::SolvingMaster
                    };
                }
                ColGenState::Converged | ColGenState::IterationLimit => break,
            }
        }

        let start = Instant::now();
        let values = master.values()?;
        master_time += start.elapsed();
        let objective = match solution {
            Some(lp) => lp.objective,
            None => values.iter().sum(),
        };
        Ok(ColGenOutcome {
            state,
            objective,
            bound,
            values,
            iterations,
            master_time,
            pricing_time,
            pricing_timeout,
            dominated,
        })
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
