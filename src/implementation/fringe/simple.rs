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

//! This module provides the implementation of a simple solver fringe (priority queue)

use std::collections::BTreeMap;

use binary_heap_plus::BinaryHeap;
use ordered_float::OrderedFloat;

use crate::*;


/// The simplest fringe implementation you can think of: is basically consists
/// of a binary heap that pushes and pops the open nodes in the order imposed
/// by a `NodeRanking`.
///
/// # Note
/// Use `SimpleFringe::new(MinBound)` for a best-bound exploration and
/// `SimpleFringe::new(DeepestFirst)` for a depth-first one.
pub struct SimpleFringe<O: NodeRanking> {
    heap: BinaryHeap<Node, CompareNode<O>>,
    /// How many nodes of the heap carry each bound
    bounds: BTreeMap<OrderedFloat<f64>, usize>,
}
impl <O> SimpleFringe<O> where O: NodeRanking {
    /// This creates a new simple fringe which uses a custom fringe order.
    pub fn new(o: O) -> Self {
        Self{ heap: BinaryHeap::from_vec_cmp(vec![], CompareNode::new(o)), bounds: BTreeMap::new() }
    }
}
impl <O> Fringe for SimpleFringe<O> where O: NodeRanking {
    fn push(&mut self, node: Node) {
        *self.bounds.entry(OrderedFloat(node.bound)).or_insert(0) += 1;
        self.heap.push(node)
    }

    fn pop(&mut self) -> Option<Node> {
        let node = self.heap.pop()?;
        let key = OrderedFloat(node.bound);
        if let Some(count) = self.bounds.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.bounds.remove(&key);
            }
        }
        Some(node)
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.bounds.clear();
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn lowest_bound(&self) -> Option<f64> {
        self.bounds.keys().next().map(|b| b.0)
    }
}
