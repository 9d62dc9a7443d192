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

//! This module gathers the pluggable strategies of a solver and the cutoff
//! actually checked during a run.

use crate::{Column, Cutoff, Dsatur, ExactPricer, GreedyPricer, InitialColoring, LowerBound, MaxClique, NoCutoff, Pricer, Settings, TimeBudget};

/// The strategies a solver delegates to. Unless they are overridden, they
/// are derived from the settings.
pub(crate) struct Strategies {
    /// Produces the initial coloring (upper bound)
    pub coloring: Box<dyn InitialColoring + Send + Sync>,
    /// Produces the initial lower bound
    pub lower_bound: Box<dyn LowerBound + Send + Sync>,
    /// The pricers called in sequence during column generation
    pub pricers: Vec<Box<dyn Pricer + Send + Sync>>,
    /// A user supplied stopping criterion
    pub cutoff: Box<dyn Cutoff + Send + Sync>,
    /// Columns supplied by the user to warm start the root node
    pub initial_columns: Option<Vec<Column>>,
}
impl Strategies {
    pub fn new(settings: &Settings) -> Self {
        Strategies {
            coloring: Box::new(Dsatur),
            lower_bound: Box::new(MaxClique::default()),
            pricers: Self::default_pricers(settings),
            cutoff: Box::new(NoCutoff),
            initial_columns: None,
        }
    }
    /// The greedy pricer (if enabled) followed by the exact pricer
    pub fn default_pricers(settings: &Settings) -> Vec<Box<dyn Pricer + Send + Sync>> {
        let mut pricers: Vec<Box<dyn Pricer + Send + Sync>> = vec![];
        if settings.heuristic_pricing {
            pricers.push(Box::new(GreedyPricer::default()));
        }
        match settings.pricing_node_limit {
            Some(limit) => pricers.push(Box::new(ExactPricer::with_node_limit(limit))),
            None => pricers.push(Box::new(ExactPricer::new())),
        }
        pricers
    }
}

/// The cutoff of a run: the user criterion and the global time limit
pub(crate) struct RunCutoff<'a> {
    user: &'a (dyn Cutoff + Send + Sync),
    budget: Option<TimeBudget>,
}
impl<'a> RunCutoff<'a> {
    /// Starts the clock of the global time limit (if any)
    pub fn start(user: &'a (dyn Cutoff + Send + Sync), settings: &Settings) -> Self {
        RunCutoff { user, budget: settings.time_limit.map(TimeBudget::new) }
    }
}
impl Cutoff for RunCutoff<'_> {
    fn must_stop(&self) -> bool {
        self.user.must_stop() || self.budget.map_or(false, |b| b.must_stop())
    }
}
