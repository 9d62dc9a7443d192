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

//! This module provides the summary of a run.

use std::time::Duration;

use serde_json::{json, Value};

use crate::{Reason, Solution};

/// Counts the reasons why nodes were pruned or could not be solved to
/// optimality. No node level error goes unaccounted for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Nodes whose master admitted no feasible solution
    pub infeasible: usize,
    /// Nodes (or children) whose branching decisions contradict each other
    pub malformed: usize,
    /// Nodes whose exact pricer exceeded its budget
    pub pricing_timeouts: usize,
    /// Nodes whose column generation stopped before convergence
    pub iteration_limits: usize,
    /// Nodes discarded because their bound could not beat the incumbent
    pub bounded: usize,
    /// Nodes whose relaxation was integral
    pub integral: usize,
    /// Nodes split in two children
    pub branched: usize,
}

/// The summary of a run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// The name of the graph instance (if any)
    pub instance: Option<String>,
    /// The number of colors of the best coloring (if one is known)
    pub objective: Option<usize>,
    /// True iff the objective was proven to be the chromatic number
    pub optimal: bool,
    /// The best proven lower bound
    pub lower_bound: usize,
    /// The number of nodes processed by column generation
    pub nodes: usize,
    /// The total number of master solves
    pub iterations: usize,
    /// The cumulated time spent solving masters
    pub master_time: Duration,
    /// The cumulated time spent pricing
    pub pricing_time: Duration,
    /// The color classes of the best coloring
    pub columns: Solution,
    /// Why the search stopped before proving optimality (if it did)
    pub reason: Option<Reason>,
    pub diagnostics: Diagnostics,
}

impl RunReport {
    /// Renders the report as a json object
    pub fn to_json(&self) -> Value {
        let columns = self.columns.iter()
            .map(|c| json!({
                "origin": c.origin,
                "initial": c.is_initial,
                "label": c.label,
                "vertices": c.vertices,
            }))
            .collect::<Vec<_>>();
        json!({
            "instance": self.instance,
            "objective": self.objective,
            "optimal": self.optimal,
            "lower_bound": self.lower_bound,
            "nodes": self.nodes,
            "iterations": self.iterations,
            "master_time": self.master_time.as_secs_f64(),
            "pricing_time": self.pricing_time.as_secs_f64(),
            "reason": self.reason.map(|r| format!("{r:?}")),
            "diagnostics": {
                "infeasible": self.diagnostics.infeasible,
                "malformed": self.diagnostics.malformed,
                "pricing_timeouts": self.diagnostics.pricing_timeouts,
                "iteration_limits": self.diagnostics.iteration_limits,
                "bounded": self.diagnostics.bounded,
                "integral": self.diagnostics.integral,
                "branched": self.diagnostics.branched,
            },
            "columns": columns,
        })
    }
}
