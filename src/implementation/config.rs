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

//! This module provides the configuration of the branch-and-price solvers.

use std::time::Duration;

use derive_builder::Builder;

use crate::{DeepestFirst, Fringe, MinBound, SimpleFringe};

/// The order in which the open nodes of the search tree are explored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeSelection {
    /// Always explore the node with the smallest (best) lower bound first.
    /// This yields the tightest pruning.
    #[default]
    BestBound,
    /// Explore the deepest node first (finds integral leaves quickly)
    DepthFirst,
}
impl NodeSelection {
    /// Creates an empty fringe implementing this selection strategy
    pub fn fringe(self) -> Box<dyn Fringe + Send + Sync> {
        match self {
            NodeSelection::BestBound => Box::new(SimpleFringe::new(MinBound)),
            NodeSelection::DepthFirst => Box::new(SimpleFringe::new(DeepestFirst)),
        }
    }
}

/// This is how you configure a solver. All the fields have sensible
/// defaults, so that you only need to set the ones you care about:
///
/// ```
/// # use bapcol::*;
/// use std::time::Duration;
///
/// let settings = SettingsBuilder::default()
///     .node_selection(NodeSelection::DepthFirst)
///     .time_limit(Duration::from_secs(60))
///     .nb_threads(2)
///     .build()
///     .unwrap();
/// assert_eq!(10_000, settings.max_cg_iterations);
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct Settings {
    /// The maximum number of master solves in the column generation of one
    /// node. Past that budget, the node is bounded with its Lagrangian bound.
    pub max_cg_iterations: usize,
    /// The order in which open nodes are explored
    pub node_selection: NodeSelection,
    /// The number of worker threads used by the parallel solver
    pub nb_threads: usize,
    /// The global time limit (if any)
    #[builder(setter(strip_option))]
    pub time_limit: Option<Duration>,
    /// The maximum number of search nodes the exact pricer may explore in one
    /// call (if any)
    #[builder(setter(strip_option))]
    pub pricing_node_limit: Option<usize>,
    /// Run the greedy pricer before the exact one
    pub heuristic_pricing: bool,
    /// Seed the root node with the initial coloring. When false, the root
    /// only knows the trivial singleton columns.
    pub warm_start: bool,
    /// The numeric tolerance on reduced costs, integrality and bounds
    pub tolerance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_cg_iterations: 10_000,
            node_selection: NodeSelection::BestBound,
            nb_threads: num_cpus::get(),
            time_limit: None,
            pricing_node_limit: None,
            heuristic_pricing: true,
            warm_start: true,
            tolerance: 1e-6,
        }
    }
}


#[cfg(test)]
mod test_settings {
    use std::time::Duration;
    use crate::*;

    #[test]
    fn defaults_are_best_bound_with_warm_start() {
        let s = Settings::default();
        assert_eq!(NodeSelection::BestBound, s.node_selection);
        assert!(s.warm_start);
        assert!(s.heuristic_pricing);
        assert_eq!(None, s.time_limit);
        assert_eq!(None, s.pricing_node_limit);
        assert!(s.nb_threads >= 1);
    }
    #[test]
    fn the_builder_only_overrides_what_it_is_told() {
        let s = SettingsBuilder::default()
            .warm_start(false)
            .pricing_node_limit(50)
            .time_limit(Duration::from_millis(10))
            .build()
            .unwrap();
        assert!(!s.warm_start);
        assert_eq!(Some(50), s.pricing_node_limit);
        assert_eq!(Some(Duration::from_millis(10)), s.time_limit);
        assert_eq!(10_000, s.max_cg_iterations);
        assert_eq!(1e-6, s.tolerance);
    }
    #[test]
    fn node_selection_creates_the_matching_fringe() {
        let mut fringe = NodeSelection::DepthFirst.fringe();
        let mut shallow = Node::root(1.0, vec![]);
        shallow.id = 1;
        let mut deep = Node::root(5.0, vec![]);
        deep.id = 2;
        deep.depth = 4;
        fringe.push(shallow.clone());
        fringe.push(deep.clone());
        assert_eq!(2, fringe.pop().unwrap().id);

        let mut fringe = NodeSelection::BestBound.fringe();
        fringe.push(shallow);
        fringe.push(deep);
        assert_eq!(1, fringe.pop().unwrap().id);
    }
}
