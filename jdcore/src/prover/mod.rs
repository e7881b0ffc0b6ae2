//! Bounded-depth backward proof search.
//!
//! ## Strategy
//! [`BackwardChainer`] closes a goal by trying the rules of its family in
//! declaration order. A rule applies when its conclusion pattern matches the
//! goal; its instantiated premises become subgoals, closed left to right with
//! one unit of depth less. Any failing subgoal discards the whole rule and the
//! next candidate is tried.
//!
//! ## Budget semantics
//! * `depth_bound`: a goal can only be closed with at least one unit of budget
//!   left, so a found proof never has more than `depth_bound` nested rule
//!   applications. A bound of 0 always fails. The bound counts levels of the
//!   tree, leaves included: `P(s(s(z)))` closes with `step`, `step` and then
//!   the axiom `base` at a third level, so it needs a bound of 3 and fails
//!   with 2 even though only two `step` applications are involved.
//! * `attempt_budget`: optional cap on the number of rules tried over the whole
//!   search. When it runs out the search stops with
//!   [`ExhaustionReason::AttemptBudget`].
//!
//! Only grounded rules (see [`Rule::is_grounded`](crate::rules::Rule::is_grounded)) are applied. Their premises
//! only mention metavariables fixed by the conclusion match, so subgoals share
//! no unknowns and never need to be revisited once closed. Ungrounded rules,
//! such as transitivity, stay in the database but are passed over.
//! The search is deterministic and always terminates.
//!
//! ```
//! use jdcore::prelude::*;
//!
//! let nat = JudgmentFamily::new("P", 1);
//! let p = |t: Term| Judgment::new(app("P", [t]), nat.clone());
//! let db = RuleDatabase::from_rules([
//!     Rule::axiom("base", p(cnst("z"))).unwrap(),
//!     Rule::new("step", [p(var("n"))], p(app("s", [var("n")]))).unwrap(),
//! ])
//! .unwrap();
//!
//! let prover = BackwardChainer::new(&db);
//! let goal = p(app("s", [app("s", [cnst("z")])]));
//! let proof = prover.search(Proof::open(goal.clone()), 5).unwrap();
//! assert_eq!(proof.rule_names(), ["step", "step", "base"]);
//! assert!(prover.search(Proof::open(goal), 1).is_err());
//! ```
use jdformal::{judgment::Judgment, matching::match_pattern};
use log::{debug, trace};

use crate::{
    proof::Proof,
    rules::{RuleDatabase, RuleInstance},
    utils::error::{ExhaustionReason, ProveError, ProveResult},
};

/// A procedure turning an open goal into a complete proof.
pub trait ProofSearch {
    /// Search for a complete proof of `root`, which must be an open goal,
    /// using at most `depth_bound` nested rule applications.
    ///
    /// Never returns a partial proof.
    fn search(&self, root: Proof, depth_bound: usize) -> ProveResult<Proof>;

    /// Search starting from a bare judgment.
    fn search_goal(&self, goal: Judgment, depth_bound: usize) -> ProveResult<Proof> {
        self.search(Proof::open(goal), depth_bound)
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Rules tried against a goal.
    pub attempts: usize,
    /// Rules whose conclusion matched the goal.
    pub matched: usize,
    /// Deepest level at which a goal was considered; the root is level 1.
    pub max_depth_reached: usize,
}

struct SearchState {
    stats: SearchStats,
    attempt_budget: usize,
    budget_spent: bool,
}

/// Depth-first, leftmost-first backward chaining over a [`RuleDatabase`].
#[derive(Debug, Clone, Copy)]
pub struct BackwardChainer<'r> {
    rules: &'r RuleDatabase,
    attempt_budget: Option<usize>,
}

impl<'r> BackwardChainer<'r> {
    pub fn new(rules: &'r RuleDatabase) -> Self {
        Self {
            rules,
            attempt_budget: None,
        }
    }

    /// Cap the number of rules tried per search.
    pub fn with_attempt_budget(mut self, attempt_budget: Option<usize>) -> Self {
        self.attempt_budget = attempt_budget;
        self
    }

    #[inline]
    pub fn rules(&self) -> &'r RuleDatabase {
        self.rules
    }

    /// Like [`ProofSearch::search`], also reporting search counters.
    pub fn search_with_stats(
        &self,
        root: Proof,
        depth_bound: usize,
    ) -> (ProveResult<Proof>, SearchStats) {
        let goal = match root {
            Proof::Open(goal) => goal,
            Proof::Closed(derivation) => {
                return (
                    Err(ProveError::RootNotOpen(derivation.judgment().clone())),
                    SearchStats::default(),
                );
            }
        };

        if let Err(err) = goal.validate() {
            debug!("Refusing to search malformed goal `{goal}`: {err}");
            return (Err(ProveError::MalformedGoal(err)), SearchStats::default());
        }

        debug!("Searching a proof of `{goal}` within depth {depth_bound}");
        let mut state = SearchState {
            stats: SearchStats::default(),
            attempt_budget: self.attempt_budget.unwrap_or(usize::MAX),
            budget_spent: false,
        };

        let found = self.close(&goal, depth_bound, 1, &mut state);
        let stats = state.stats;
        let result = match found {
            Some(proof) => {
                debug!(
                    "Found a proof of `{goal}` of height {} after {} attempts",
                    proof.height(),
                    stats.attempts
                );
                Ok(proof)
            }
            None => {
                let reason = if state.budget_spent {
                    ExhaustionReason::AttemptBudget
                } else {
                    ExhaustionReason::SearchSpace
                };
                debug!(
                    "No proof of `{goal}` within depth {depth_bound} after {} attempts ({reason})",
                    stats.attempts
                );
                Err(ProveError::SearchExhausted {
                    goal,
                    depth_bound,
                    attempts: stats.attempts,
                    reason,
                })
            }
        };
        (result, stats)
    }

    /// Close `goal` with at most `remaining` nested rule applications.
    fn close(
        &self,
        goal: &Judgment,
        remaining: usize,
        level: usize,
        state: &mut SearchState,
    ) -> Option<Proof> {
        if remaining == 0 {
            trace!("Depth exhausted at `{goal}`");
            return None;
        }
        state.stats.max_depth_reached = state.stats.max_depth_reached.max(level);

        for rule in self.rules.candidates(goal.family()) {
            if !rule.is_grounded() {
                trace!("Skipping ungrounded rule `{}` on `{goal}`", rule.name());
                continue;
            }
            if state.stats.attempts >= state.attempt_budget {
                state.budget_spent = true;
                return None;
            }
            state.stats.attempts += 1;

            let Some(sub) = match_pattern(rule.conclusion().term(), goal.term()) else {
                continue;
            };
            state.stats.matched += 1;
            trace!("Trying rule `{}` on `{goal}` with {sub}", rule.name());

            let instance = RuleInstance::new(rule.clone(), sub);
            let mut children = Vec::with_capacity(rule.premises().len());
            for premise in instance.premises() {
                match self.close(&premise, remaining - 1, level + 1, state) {
                    Some(child) => children.push(child),
                    None => break,
                }
            }

            if state.budget_spent {
                return None;
            }
            if children.len() == rule.premises().len() {
                return Some(Proof::closed_unchecked(goal.clone(), instance, children));
            }
            trace!("Rule `{}` failed on `{goal}`, backtracking", rule.name());
        }

        None
    }
}

impl ProofSearch for BackwardChainer<'_> {
    fn search(&self, root: Proof, depth_bound: usize) -> ProveResult<Proof> {
        self.search_with_stats(root, depth_bound).0
    }
}

#[cfg(test)]
mod tests {
    use jdformal::prelude::*;

    use super::*;
    use crate::tests_utils::{
        even_judgment, even_rules, le_judgment, nat_judgment, nat_rules, numeral, order_rules,
        plus_judgment, plus_rules,
    };

    #[test]
    fn successor_chain_is_found() {
        let db = nat_rules();
        let prover = BackwardChainer::new(&db);
        let proof = prover.search_goal(nat_judgment(numeral(2)), 5).unwrap();

        assert!(proof.is_complete());
        assert_eq!(proof.rule_names(), ["step", "step", "base"]);
        assert_eq!(proof.height(), 3);
        assert_eq!(proof.check(&db), Ok(()));
    }

    #[test]
    fn bound_counts_nested_rule_applications() {
        let db = nat_rules();
        let prover = BackwardChainer::new(&db);
        let goal = nat_judgment(numeral(2));

        for bound in 0..3 {
            let err = prover.search_goal(goal.clone(), bound).unwrap_err();
            assert!(
                matches!(err, ProveError::SearchExhausted { depth_bound, reason: ExhaustionReason::SearchSpace, .. } if depth_bound == bound),
                "bound {bound}: {err}"
            );
        }
        assert!(prover.search_goal(goal, 3).is_ok());
    }

    #[test]
    fn goal_without_rules_fails() {
        let db = nat_rules();
        let prover = BackwardChainer::new(&db);
        let goal = Judgment::new(app("Q", [cnst("z")]), JudgmentFamily::new("Q", 1));

        let (result, stats) = prover.search_with_stats(Proof::open(goal), 5);
        assert!(result.unwrap_err().is_search_exhausted());
        assert_eq!(stats.attempts, 0);
    }

    #[test]
    fn zero_bound_fails_without_attempts() {
        let db = nat_rules();
        let prover = BackwardChainer::new(&db);
        let (result, stats) = prover.search_with_stats(Proof::open(nat_judgment(cnst("z"))), 0);
        assert!(result.is_err());
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn malformed_goal_fails_fast() {
        let db = nat_rules();
        let prover = BackwardChainer::new(&db);
        let goal = Judgment::new(app("P", [cnst("z"), cnst("z")]), JudgmentFamily::new("P", 1));

        let (result, stats) = prover.search_with_stats(Proof::open(goal), 5);
        assert!(matches!(
            result,
            Err(ProveError::MalformedGoal(MalformedJudgment::ArityMismatch { found: 2, .. }))
        ));
        assert_eq!(stats.attempts, 0);
    }

    #[test]
    fn closed_root_is_rejected() {
        let db = nat_rules();
        let prover = BackwardChainer::new(&db);
        let proof = prover.search_goal(nat_judgment(cnst("z")), 1).unwrap();
        assert!(prover.search(proof, 5).unwrap_err().is_root_not_open());
    }

    #[test]
    fn backtracks_past_a_looping_rule() {
        let db = even_rules();
        let prover = BackwardChainer::new(&db);
        let proof = prover.search_goal(even_judgment(numeral(4)), 3).unwrap();
        assert_eq!(proof.rule_names(), ["even_ss", "even_ss", "even_z"]);
        assert_eq!(proof.check(&db), Ok(()));

        assert!(prover.search_goal(even_judgment(numeral(3)), 6).is_err());
    }

    #[test]
    fn attempt_budget_stops_the_search() {
        let db = even_rules();
        let prover = BackwardChainer::new(&db).with_attempt_budget(Some(4));
        let (result, stats) = prover.search_with_stats(Proof::open(even_judgment(numeral(4))), 3);

        assert!(matches!(
            result,
            Err(ProveError::SearchExhausted { reason: ExhaustionReason::AttemptBudget, attempts: 4, .. })
        ));
        assert_eq!(stats.attempts, 4);
    }

    #[test]
    fn multi_premise_free_metavariables_come_from_the_goal() {
        let db = plus_rules();
        let prover = BackwardChainer::new(&db);

        let goal = plus_judgment(numeral(2), numeral(1), numeral(3));
        let proof = prover.search_goal(goal, 5).unwrap();
        assert_eq!(proof.rule_names(), ["plus_s", "plus_s", "plus_z"]);

        let wrong = plus_judgment(numeral(2), numeral(1), numeral(2));
        assert!(prover.search_goal(wrong, 5).is_err());
    }

    #[test]
    fn goals_with_free_variables_are_rigid() {
        let db = nat_rules();
        let prover = BackwardChainer::new(&db);
        assert!(prover.search_goal(nat_judgment(var("x")), 5).is_err());
        assert!(prover.search_goal(nat_judgment(app("s", [var("x")])), 5).is_err());
    }

    #[test]
    fn ungrounded_rules_do_not_block_other_goals() {
        let db = order_rules();
        let le_trans = db.get(&Symbol::from("le_trans")).unwrap();
        assert!(!le_trans.is_grounded());

        let prover = BackwardChainer::new(&db);
        let proof = prover.search_goal(nat_judgment(numeral(2)), 5).unwrap();
        assert_eq!(proof.rule_names(), ["step", "step", "base"]);

        let proof = prover.search_goal(le_judgment(numeral(0), numeral(2)), 5).unwrap();
        assert_eq!(proof.rule_names(), ["le_s", "le_s", "le_refl"]);
        assert_eq!(proof.check(&db), Ok(()));
    }

    #[test]
    fn searching_twice_gives_the_same_proof() {
        let db = even_rules();
        let prover = BackwardChainer::new(&db);
        let goal = even_judgment(numeral(6));
        assert_eq!(
            prover.search_goal(goal.clone(), 4).unwrap(),
            prover.search_goal(goal, 4).unwrap()
        );
    }
}
