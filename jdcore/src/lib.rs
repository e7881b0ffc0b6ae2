//! Bounded backward proof search for a derivation checker.
//!
//! The crate closes the gap between a derivation step and the inference rules
//! of a language definition when the author leaves the step to the tool:
//! given a goal judgment, it looks for a derivation of bounded depth.
//!
//! Most consumers will interact with [`solve::Solver`], which builds the goal
//! from a step, runs [`prover::BackwardChainer`] and reports
//! [`diagnostics::Diagnostic`]s. The lower layers are public for tools that
//! want to drive the search themselves.

/// Reporting of errors and warnings.
pub mod diagnostics;
/// Constants and default values.
pub mod magic;
/// Proof trees.
pub mod proof;
/// Proof search.
pub mod prover;
/// Inference rules and the rule database.
pub mod rules;
/// The `by solve` derivation step.
pub mod solve;
#[cfg(any(test, feature = "test-utils"))]
pub mod tests_utils;
/// Configuration and error types.
pub mod utils;

pub use jdformal;

pub mod prelude {
    //! Convenient re-exports: the term language from `jdformal` together with
    //! rules, proofs, the prover and the solve step.
    pub use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity, Span};
    pub use crate::proof::Proof;
    pub use crate::prover::{BackwardChainer, ProofSearch, SearchStats};
    pub use crate::rules::{Rule, RuleDatabase, RuleInstance};
    pub use crate::solve::{GoalClause, SolveOutcome, SolveStep, Solver};
    pub use crate::utils::conf::SolveConfig;
    pub use crate::utils::error::{
        ExhaustionReason, JdError, JdResult, ProofCheckError, ProveError, RuleError,
    };
    pub use jdformal::prelude::*;
}
