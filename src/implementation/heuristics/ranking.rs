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

//! This module provides the implementation of the node rankings that decide
//! the order in which the search tree is explored.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{Node, NodeRanking};

/// The best-bound ranking (default): the node with the smallest lower bound
/// is explored first. Ties are broken in favor of the deepest node and then
/// of the oldest one. This is the ranking yielding the tightest pruning.
#[derive(Debug, Default, Copy, Clone)]
pub struct MinBound;
impl NodeRanking for MinBound {
    fn compare(&self, l: &Node, r: &Node) -> Ordering {
        OrderedFloat(r.bound).cmp(&OrderedFloat(l.bound))
            .then_with(|| l.depth.cmp(&r.depth))
            .then_with(|| r.id.cmp(&l.id))
    }
}

/// The depth-first ranking: the deepest node is explored first. Among nodes
/// of the same depth, the one with the smallest bound goes first, then the
/// most recent one.
#[derive(Debug, Default, Copy, Clone)]
pub struct DeepestFirst;
impl NodeRanking for DeepestFirst {
    fn compare(&self, l: &Node, r: &Node) -> Ordering {
        l.depth.cmp(&r.depth)
            .then_with(|| OrderedFloat(r.bound).cmp(&OrderedFloat(l.bound)))
            .then_with(|| l.id.cmp(&r.id))
    }
}


#[cfg(test)]
mod test_ranking {
    use std::cmp::Ordering;
    use crate::*;

    fn node(id: usize, depth: usize, bound: f64) -> Node {
        let mut n = Node::root(bound, vec![]);
        n.id = id;
        n.depth = depth;
        n
    }

    #[test]
    fn min_bound_prefers_the_smallest_bound() {
        assert_eq!(Ordering::Greater, MinBound.compare(&node(1, 0, 2.5), &node(2, 4, 3.0)));
        assert_eq!(Ordering::Less, MinBound.compare(&node(1, 4, 3.0), &node(2, 0, 2.5)));
    }
    #[test]
    fn min_bound_breaks_ties_by_depth_then_age() {
        assert_eq!(Ordering::Greater, MinBound.compare(&node(1, 3, 2.5), &node(2, 2, 2.5)));
        assert_eq!(Ordering::Greater, MinBound.compare(&node(1, 2, 2.5), &node(2, 2, 2.5)));
        assert_eq!(Ordering::Equal, MinBound.compare(&node(1, 2, 2.5), &node(1, 2, 2.5)));
    }
    #[test]
    fn deepest_first_prefers_the_deepest_node() {
        assert_eq!(Ordering::Greater, DeepestFirst.compare(&node(1, 5, 9.0), &node(2, 1, 1.0)));
    }
    #[test]
    fn deepest_first_breaks_ties_by_bound_then_recency() {
        assert_eq!(Ordering::Greater, DeepestFirst.compare(&node(1, 2, 1.0), &node(2, 2, 2.0)));
        assert_eq!(Ordering::Greater, DeepestFirst.compare(&node(3, 2, 1.0), &node(2, 2, 1.0)));
    }
}
