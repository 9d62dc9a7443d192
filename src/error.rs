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

//! This module defines the errors that may occur while solving a coloring
//! problem with branch-and-price.
//!
//! Only `ContractViolation` and `Lp` are fatal to a run. All the other kinds
//! are node-level conditions: the solvers record them in the run diagnostics
//! and prune or bound the faulty node accordingly.

use thiserror::Error;

/// Errors that can occur during the branch-and-price resolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The master LP of a node admits no feasible solution
    #[error("the master problem of the node is infeasible")]
    InfeasibleNode,

    /// The exact pricer exceeded its budget
    #[error("pricing budget exceeded after {0} search nodes")]
    PricingTimeout(usize),

    /// A branching decision contradicts the decisions it is applied upon
    #[error("malformed branch: {0}")]
    MalformedBranch(String),

    /// The global deadline elapsed
    #[error("global time limit reached")]
    GlobalTimeout,

    /// A programming contract was violated
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// The LP collaborator failed for a reason other than infeasibility
    #[error("lp solver failure: {0}")]
    Lp(String),
}

impl Error {
    /// Returns true iff this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ContractViolation(_) | Error::Lp(_))
    }
}

/// Result type for the branch-and-price operations.
pub type Result<T> = std::result::Result<T, Error>;


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
