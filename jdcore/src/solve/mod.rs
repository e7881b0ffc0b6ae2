//! The `by solve` justification of a derivation step.
//!
//! A step justified `by solve` asks the prover to find a derivation of its
//! clause on its own. The clause is instantiated with the current
//! substitution of the enclosing proof and searched with the configured depth
//! bound. A found derivation is rendered to the output and still produces a
//! warning, because the search only ever explores a bounded part of the
//! rule space; an unsuccessful search produces an error.
use std::{fmt, io::Write};

use jdformal::{
    judgment::{Judgment, JudgmentFamily},
    subst::Substitution,
    term::Term,
};
use log::{debug, info};
use strum::{EnumIs, EnumTryAs};
use termcolor::WriteColor;

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Span},
    magic::{BY_SOLVE_CLAUSE, MSG_SOLVE_FAILED, MSG_SOLVE_UNRELIABLE},
    proof::Proof,
    prover::BackwardChainer,
    rules::RuleDatabase,
    utils::{
        conf::SolveConfig,
        error::{JdResult, ProveError},
    },
};

/// The statement of a derivation step, as seen by the solver.
pub trait GoalClause {
    /// The statement as a term over the variables of the enclosing proof.
    fn as_term(&self) -> Term;

    /// The judgment family the statement belongs to, if it names one.
    fn judgment_family(&self) -> Option<JudgmentFamily>;
}

impl GoalClause for Judgment {
    fn as_term(&self) -> Term {
        self.term().clone()
    }

    fn judgment_family(&self) -> Option<JudgmentFamily> {
        Some(self.family().clone())
    }
}

/// A named derivation step justified by proof search.
#[derive(Debug, Clone)]
pub struct SolveStep<C> {
    pub name: String,
    pub clause: C,
    pub span: Option<Span>,
}

impl<C: GoalClause> SolveStep<C> {
    pub fn new<S: Into<String>>(name: S, clause: C, span: Option<Span>) -> Self {
        Self {
            name: name.into(),
            clause,
            span,
        }
    }

    /// The justification as printed after the clause.
    pub fn pretty_print_by_clause(&self) -> &'static str {
        BY_SOLVE_CLAUSE
    }
}

impl<C: GoalClause> fmt::Display for SolveStep<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}{}",
            self.name,
            self.clause.as_term(),
            self.pretty_print_by_clause()
        )
    }
}

/// What a solve step ended with. Diagnostics are reported separately.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, EnumTryAs)]
pub enum SolveOutcome {
    Proved(Proof),
    NotFound,
    Malformed,
}

/// Checks `by solve` steps against a fixed rule database.
#[derive(Debug, Clone)]
pub struct Solver<'r> {
    rules: &'r RuleDatabase,
    config: SolveConfig,
}

impl<'r> Solver<'r> {
    pub fn new(rules: &'r RuleDatabase, config: SolveConfig) -> Self {
        Self { rules, config }
    }

    /// A solver configured from [`SolveConfig::load_or_default`].
    pub fn from_default_config(rules: &'r RuleDatabase) -> JdResult<Self> {
        Ok(Self::new(rules, SolveConfig::load_or_default()?))
    }

    #[inline]
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Check `step` under the substitution `current` of the enclosing proof.
    ///
    /// A found proof is rendered to `out`, followed by an empty line, and a
    /// warning is emitted to `sink`. Failures emit one error. Only writing to
    /// `out` can fail.
    pub fn solve<C, S, W>(
        &self,
        step: &SolveStep<C>,
        current: &Substitution,
        sink: &mut S,
        out: &mut W,
    ) -> JdResult<SolveOutcome>
    where
        C: GoalClause,
        S: DiagnosticSink + ?Sized,
        W: WriteColor + Write,
    {
        let term = current.apply(&step.clause.as_term());
        let Some(family) = step.clause.judgment_family() else {
            debug!("Step `{}` does not name a judgment", step.name);
            sink.emit(Diagnostic::error(
                DiagnosticKind::SolveMalformedGoal,
                format!("Malformed goal: `{term}` is not a judgment."),
                step.span.clone(),
            ));
            return Ok(SolveOutcome::Malformed);
        };

        let goal = Judgment::new(term, family);
        let prover = BackwardChainer::new(self.rules).with_attempt_budget(self.config.attempt_budget);
        let (result, stats) = prover.search_with_stats(Proof::open(goal), self.config.depth_bound);

        match result {
            Ok(proof) => {
                info!(
                    "Step `{}` proved by solve ({} rule applications, {} attempts)",
                    step.name,
                    proof.size(),
                    stats.attempts
                );
                proof.render_to(self.config.render_width, out)?;
                writeln!(out)?;
                sink.emit(Diagnostic::warning(
                    DiagnosticKind::SolveUnreliable,
                    MSG_SOLVE_UNRELIABLE,
                    step.span.clone(),
                ));
                Ok(SolveOutcome::Proved(proof))
            }
            Err(err @ ProveError::SearchExhausted { .. }) => {
                sink.emit(
                    Diagnostic::error(DiagnosticKind::SolveFailed, MSG_SOLVE_FAILED, step.span.clone())
                        .with_debug_info(err.to_string()),
                );
                Ok(SolveOutcome::NotFound)
            }
            Err(err) => {
                sink.emit(Diagnostic::error(
                    DiagnosticKind::SolveMalformedGoal,
                    err.to_string(),
                    step.span.clone(),
                ));
                Ok(SolveOutcome::Malformed)
            }
        }
    }
}
