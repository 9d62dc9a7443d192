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

//! This module provide some convenient utilities to work with used defined heuristics.

use std::cmp::Ordering;

use compare::Compare;

use crate::{Node, NodeRanking};


/// This is a thin wrapper to convert a NodeRanking into a `Compare` object
/// as is sometimes required (e.g. to configure the order in a binary heap)
///
/// This struct has no behavior of its own: it simply delegates to the
/// underlying implementation.
#[derive(Debug, Clone, Copy)]
pub struct CompareNode<X: NodeRanking>(X);
impl<X: NodeRanking> CompareNode<X> {
    /// Creates a new instance
    pub fn new(x: X) -> Self {
        Self(x)
    }
}
impl<X: NodeRanking> Compare<Node> for CompareNode<X> {
    fn compare(&self, l: &Node, r: &Node) -> Ordering {
        self.0.compare(l, r)
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;
    use compare::Compare;
    use crate::{CompareNode, Node, NodeRanking};

    /// A dummy ranking for use in the tests
    struct ByDepth;
    impl NodeRanking for ByDepth {
        fn compare(&self, a: &Node, b: &Node) -> Ordering {
            a.depth.cmp(&b.depth)
        }
    }

    fn node(depth: usize) -> Node {
        let mut n = Node::root(0.0, vec![]);
        n.depth = depth;
        n
    }

    #[test]
    fn when_a_is_less_than_b_comparenode_returns_less() {
        let cmp = CompareNode::new(ByDepth);
        assert_eq!(cmp.compare(&node(1), &node(2)), Ordering::Less);
    }
    #[test]
    fn when_a_is_greater_than_b_comparenode_returns_greater() {
        let cmp = CompareNode::new(ByDepth);
        assert_eq!(cmp.compare(&node(3), &node(2)), Ordering::Greater);
    }
    #[test]
    fn when_a_equals_b_comparenode_returns_equal() {
        let cmp = CompareNode::new(ByDepth);
        assert_eq!(cmp.compare(&node(2), &node(2)), Ordering::Equal);
    }
}
