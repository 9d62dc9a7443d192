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

//! This module and its sub modules provide the actual implementations of the
//! branch-and-price solvers. The `sequential` module provides the
//! `SequentialSolver` which (obviously) processes the search tree on one single
//! thread. The `parallel` sub module provides the `ParallelSolver` structure.
//! Both structures implement the `Solver` trait, but `ParallelSolver` is able
//! to exploit multiple threads.
mod explorer;
mod parallel;
mod report;
mod search;
mod sequential;
mod strategies;

pub(crate) use explorer::*;
pub use parallel::*;
pub use report::*;
pub(crate) use search::*;
pub use sequential::*;
pub(crate) use strategies::*;

use crate::MinilpSolver;

/// A type alias to emphasize that this is the solver that should be used by default.
pub type DefaultSolver<'a> = ParallelSolver<'a, MinilpSolver>;
pub type DefaultSequentialSolver<'a> = SequentialSolver<'a, MinilpSolver>;
