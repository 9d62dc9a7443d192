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

//! Checks how the solvers behave when they are stopped before completing the
//! proof of optimality.

use std::time::Duration;

use bapcol::*;

fn cycle(n: usize) -> Graph {
    let edges = (0..n).map(|i| (i, (i + 1) % n)).collect::<Vec<_>>();
    Graph::from_edges(n, &edges).unwrap()
}
fn mycielski(g: &Graph) -> Graph {
    let n = g.nb_vertices();
    let mut m = Graph::new(2 * n + 1);
    for u in 0..n {
        for v in g.neighbors(u).iter() {
            if u < v {
                m.add_edge(u, v).unwrap();
            }
            m.add_edge(n + u, v).unwrap();
        }
        m.add_edge(n + u, 2 * n).unwrap();
    }
    m
}
/// Triangle free, yet 5 colors are needed: the initial bounds never meet
fn myciel4() -> Graph {
    mycielski(&mycielski(&cycle(5))).with_name("myciel4")
}

fn check_aborted(solver: &mut dyn Solver, graph: &Graph) {
    let outcome = solver.minimize().unwrap();
    assert!(!outcome.is_exact);
    // the incumbent is still a proper coloring
    let best = outcome.best_value.unwrap();
    let coloring = solver.best_solution().unwrap();
    assert_eq!(best, coloring.len());
    assert!(graph.is_valid_coloring(&coloring));
    assert!(best >= 5);
    assert!(solver.best_lower_bound() <= 5);
    assert!(solver.best_lower_bound() < solver.best_upper_bound());

    let report = solver.report();
    assert!(!report.optimal);
    assert_eq!(Some(Reason::CutoffOccurred), report.reason);
    assert_eq!(Some("myciel4".to_string()), report.instance);
}

#[test]
fn a_zero_time_limit_stops_the_parallel_solver() {
    let g = myciel4();
    let settings = SettingsBuilder::default().time_limit(Duration::ZERO).build().unwrap();
    let mut solver = DefaultSolver::new(&g, settings);
    check_aborted(&mut solver, &g);
}
#[test]
fn a_zero_time_limit_stops_the_sequential_solver() {
    let g = myciel4();
    let settings = SettingsBuilder::default().time_limit(Duration::ZERO).build().unwrap();
    let mut solver = DefaultSequentialSolver::new(&g, settings);
    check_aborted(&mut solver, &g);
}
#[test]
fn an_elapsed_time_budget_stops_the_search() {
    let g = myciel4();
    let mut solver = DefaultSolver::new(&g, Settings::default())
        .with_cutoff(TimeBudget::new(Duration::ZERO));
    check_aborted(&mut solver, &g);
    assert_eq!(0, solver.report().nodes);
}
#[test]
fn without_warm_start_an_aborted_search_still_has_a_coloring() {
    let g = myciel4();
    let settings = SettingsBuilder::default()
        .warm_start(false)
        .time_limit(Duration::ZERO)
        .build()
        .unwrap();
    let mut solver = DefaultSequentialSolver::new(&g, settings);
    let outcome = solver.minimize().unwrap();
    assert!(!outcome.is_exact);
    assert_eq!(Some(g.nb_vertices()), outcome.best_value);
    assert!(g.is_valid_coloring(&solver.best_solution().unwrap()));
}
#[test]
fn a_time_limit_never_hurts_an_easy_instance() {
    let g = cycle(7);
    let settings = SettingsBuilder::default().time_limit(Duration::from_secs(60)).build().unwrap();
    let mut solver = DefaultSolver::new(&g, settings);
    let outcome = solver.minimize().unwrap();
    assert!(outcome.is_exact);
    assert_eq!(Some(3), outcome.best_value);
    assert_eq!(None, solver.report().reason);
}
#[test]
fn a_closed_gap_needs_no_time_at_all() {
    // a clique is solved by the initial bounds alone, before any cutoff check
    let mut g = Graph::new(4);
    for u in 0..4 {
        for v in u + 1..4 {
            g.add_edge(u, v).unwrap();
        }
    }
    let settings = SettingsBuilder::default().time_limit(Duration::ZERO).build().unwrap();
    let mut solver = DefaultSolver::new(&g, settings);
    let outcome = solver.minimize().unwrap();
    assert!(outcome.is_exact);
    assert_eq!(Some(4), outcome.best_value);
}
