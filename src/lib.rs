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

//! # bapcol
//! bapcol computes the chromatic number of a graph (the minimum number of
//! colors needed so that no edge joins two vertices of the same color) with a
//! branch-and-price algorithm.
//!
//! The coloring problem is formulated as a set covering problem where each
//! variable (column) stands for an independent set of the graph: a color
//! class. Since there are exponentially many independent sets, the LP
//! relaxation of each node of the search tree is solved by column generation:
//! the master problem is solved over a restricted set of columns, and a
//! pricing problem (a maximum weight independent set problem weighted by the
//! duals of the master) finds the columns which might improve it. When the
//! relaxation of a node is fractional, the node is split on a pair of
//! vertices (Ryan-Foster branching): either both vertices share a color or
//! they don't.
//!
//! ## Side benefit
//! As a side benefit from using `bapcol`, you will be able to exploit all of
//! your hardware: the open nodes of the search tree are processed in parallel.
//!
//! ## Quick Example
//! ```
//! # use bapcol::*;
//! // 1. Create the graph you want to color (here: the 5-cycle)
//! let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])
//!     .unwrap()
//!     .with_name("c5");
//! // 2. Configure the search
//! let settings = SettingsBuilder::default()
//!     .node_selection(NodeSelection::BestBound)
//!     .nb_threads(2)
//!     .build()
//!     .unwrap();
//! // 3. Instantiate your solver
//! let mut solver = DefaultSolver::new(&graph, settings);
//! // 4. Minimize the number of colors
//! // the outcome provides the number of colors of the best coloring that was
//! // found along with a flag indicating whether or not it was proven optimal.
//! // The `is_exact` flag will only be false if you explicitly decide to stop
//! // searching with a cutoff or a time limit.
//! let outcome = solver.minimize().unwrap();
//! assert!(outcome.is_exact);
//! assert_eq!(Some(3), outcome.best_value);
//! // 5. The best coloring is retrieved with
//! let coloring = solver.best_solution().unwrap();
//! for (color, class) in coloring.iter().enumerate() {
//!     println!("color {color}: {:?}", class.vertices);
//! }
//! ```

mod common;
mod error;
mod abstraction;
mod implementation;

pub use common::*;
pub use error::*;
pub use abstraction::*;
pub use implementation::*;
