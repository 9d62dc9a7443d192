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

//! Solves graphs whose chromatic number is known in advance.

use bapcol::*;

fn cycle(n: usize) -> Graph {
    let edges = (0..n).map(|i| (i, (i + 1) % n)).collect::<Vec<_>>();
    Graph::from_edges(n, &edges).unwrap().with_name(format!("c{n}"))
}
fn complete(n: usize) -> Graph {
    let mut g = Graph::new(n).with_name(format!("k{n}"));
    for u in 0..n {
        for v in u + 1..n {
            g.add_edge(u, v).unwrap();
        }
    }
    g
}
fn complete_bipartite(a: usize, b: usize) -> Graph {
    let mut g = Graph::new(a + b);
    for u in 0..a {
        for v in a..a + b {
            g.add_edge(u, v).unwrap();
        }
    }
    g
}
fn wheel(rim: usize) -> Graph {
    let mut g = Graph::new(rim + 1);
    for i in 0..rim {
        g.add_edge(i, (i + 1) % rim).unwrap();
        g.add_edge(i, rim).unwrap();
    }
    g
}
fn petersen() -> Graph {
    let mut edges = vec![];
    for i in 0..5 {
        edges.push((i, (i + 1) % 5));
        edges.push((i, i + 5));
        edges.push((i + 5, (i + 2) % 5 + 5));
    }
    Graph::from_edges(10, &edges).unwrap().with_name("petersen")
}
/// The Mycielskian of g: its chromatic number is one more than that of g
/// while its clique number stays the same (for triangle free graphs).
fn mycielski(g: &Graph) -> Graph {
    let n = g.nb_vertices();
    let w = 2 * n;
    let mut m = Graph::new(2 * n + 1);
    for u in 0..n {
        for v in g.neighbors(u).iter() {
            if u < v {
                m.add_edge(u, v).unwrap();
            }
            m.add_edge(n + u, v).unwrap();
        }
        m.add_edge(n + u, w).unwrap();
    }
    m
}
/// The n-queens graph: two squares are adjacent iff a queen on one of them
/// attacks the other one.
fn queens(n: usize) -> Graph {
    let mut g = Graph::new(n * n);
    for a in 0..n * n {
        for b in a + 1..n * n {
            let (ra, ca) = ((a / n) as isize, (a % n) as isize);
            let (rb, cb) = ((b / n) as isize, (b % n) as isize);
            if ra == rb || ca == cb || (ra - rb).abs() == (ca - cb).abs() {
                g.add_edge(a, b).unwrap();
            }
        }
    }
    g
}

fn solve(graph: &Graph) -> usize {
    let mut solver = DefaultSolver::new(graph, Settings::default());
    let outcome = solver.minimize().unwrap();
    assert!(outcome.is_exact);
    let coloring = solver.best_solution().unwrap();
    assert!(graph.is_valid_coloring(&coloring));
    assert_eq!(outcome.best_value, Some(coloring.len()));
    assert_eq!(solver.best_lower_bound(), solver.best_upper_bound());
    outcome.best_value.unwrap()
}

#[test]
fn empty_graph() {
    assert_eq!(solve(&Graph::new(0)), 0);
}
#[test]
fn single_vertex() {
    assert_eq!(solve(&Graph::new(1)), 1);
}
#[test]
fn edgeless_graph() {
    assert_eq!(solve(&Graph::new(6)), 1);
}
#[test]
fn c5() {
    assert_eq!(solve(&cycle(5)), 3);
}
#[test]
fn c6() {
    assert_eq!(solve(&cycle(6)), 2);
}
#[test]
fn c7() {
    assert_eq!(solve(&cycle(7)), 3);
}
#[test]
fn c9() {
    assert_eq!(solve(&cycle(9)), 3);
}
#[test]
fn complete_graphs() {
    for k in 1..=6 {
        assert_eq!(solve(&complete(k)), k);
    }
}
#[test]
fn k33() {
    assert_eq!(solve(&complete_bipartite(3, 3)), 2);
}
#[test]
fn k25() {
    assert_eq!(solve(&complete_bipartite(2, 5)), 2);
}
#[test]
fn odd_wheel() {
    assert_eq!(solve(&wheel(5)), 4);
}
#[test]
fn even_wheel() {
    assert_eq!(solve(&wheel(6)), 3);
}
#[test]
fn petersen_graph() {
    assert_eq!(solve(&petersen()), 3);
}
#[test]
fn myciel3() {
    // the Groetzsch graph: triangle free, yet it needs 4 colors
    let g = mycielski(&cycle(5));
    assert_eq!(11, g.nb_vertices());
    assert_eq!(20, g.nb_edges());
    assert_eq!(solve(&g), 4);
}
#[test]
fn queen5_5() {
    assert_eq!(solve(&queens(5)), 5);
}
#[test]
fn the_report_of_an_optimal_run() {
    let g = petersen();
    let mut solver = DefaultSolver::new(&g, Settings::default());
    solver.minimize().unwrap();
    let report = solver.report();
    assert_eq!(Some("petersen".to_string()), report.instance);
    assert_eq!(Some(3), report.objective);
    assert!(report.optimal);
    assert_eq!(3, report.lower_bound);
    assert_eq!(3, report.columns.len());
    assert_eq!(None, report.reason);
    assert_eq!(0, report.diagnostics.infeasible);
    assert_eq!(0, report.diagnostics.malformed);
    assert_eq!(Some(3), report.to_json()["objective"].as_u64().map(|x| x as usize));
}
