//! One-directional pattern matching of rule patterns against goal terms.
//!
//! The free variables of a pattern are metavariables; the target is rigid, so
//! its free variables only match a metavariable or the very same variable in
//! the pattern. Binders on both sides are matched up to alpha-equivalence.
//!
//! ```
//! use jdformal::matching::match_pattern;
//! use jdformal::term::func::*;
//! use jdformal::variable::Variable;
//!
//! let pattern = app("P", [app("s", [var("n")])]);
//! let goal = app("P", [app("s", [app("s", [cnst("z")])])]);
//! let sub = match_pattern(&pattern, &goal).unwrap();
//! assert_eq!(sub.get(&Variable::new("n")), Some(&app("s", [cnst("z")])));
//! ```
use std::collections::BTreeMap;

use crate::{
    subst::Substitution,
    term::{Term, TermView},
    variable::Variable,
};

/// Where a variable occurrence points to, seen from one side of the match.
enum Resolved {
    /// Bound by the binder pair at this index of the environment.
    Bound(usize),
    Free,
}

struct Matcher<'a> {
    /// Kept as a plain map: a metavariable bound to the variable of the same
    /// name is still bound.
    bindings: BTreeMap<Variable, Term>,
    /// Binder pairs (pattern side, target side), innermost last.
    env: Vec<(&'a Variable, &'a Variable)>,
}

impl<'a> Matcher<'a> {
    fn resolve_pattern(&self, v: &Variable) -> Resolved {
        match self.env.iter().rposition(|(p, _)| *p == v) {
            Some(index) => Resolved::Bound(index),
            None => Resolved::Free,
        }
    }

    fn resolve_target(&self, v: &Variable) -> Resolved {
        match self.env.iter().rposition(|(_, t)| *t == v) {
            Some(index) => Resolved::Bound(index),
            None => Resolved::Free,
        }
    }

    /// A metavariable cannot capture variables bound inside the target.
    fn escapes(&self, target: &Term) -> bool {
        !self.env.is_empty()
            && target
                .free_vars()
                .iter()
                .any(|v| matches!(self.resolve_target(v), Resolved::Bound(_)))
    }

    fn go(&mut self, pattern: &'a Term, target: &'a Term) -> bool {
        match (pattern.view(), target.view()) {
            (TermView::Var(p), _) => match self.resolve_pattern(p) {
                Resolved::Bound(index) => match target.view() {
                    TermView::Var(t) => {
                        matches!(self.resolve_target(t), Resolved::Bound(other) if other == index)
                    }
                    _ => false,
                },
                Resolved::Free => {
                    if self.escapes(target) {
                        return false;
                    }
                    match self.bindings.get(p) {
                        Some(previous) => previous == target,
                        None => {
                            self.bindings.insert(p.clone(), target.clone());
                            true
                        }
                    }
                }
            },
            (TermView::Const(a), TermView::Const(b)) => a == b,
            (
                TermView::App {
                    head: head_p,
                    args: args_p,
                },
                TermView::App {
                    head: head_t,
                    args: args_t,
                },
            ) => {
                head_p == head_t
                    && args_p.len() == args_t.len()
                    && args_p
                        .iter()
                        .zip(args_t.iter())
                        .all(|(p, t)| self.go(p, t))
            }
            (
                TermView::Abs {
                    binder: binder_p,
                    body: body_p,
                },
                TermView::Abs {
                    binder: binder_t,
                    body: body_t,
                },
            ) => {
                self.env.push((binder_p, binder_t));
                let matched = self.go(body_p, body_t);
                self.env.pop();
                matched
            }
            _ => false,
        }
    }
}

/// Match `pattern` against `target`.
///
/// On success, applying the returned substitution to `pattern` yields a term
/// alpha-equivalent to `target`. Its domain is the set of metavariables of
/// `pattern`, minus those matched by the variable of the same name.
pub fn match_pattern(pattern: &Term, target: &Term) -> Option<Substitution> {
    let mut matcher = Matcher {
        bindings: BTreeMap::new(),
        env: Vec::new(),
    };
    if !matcher.go(pattern, target) {
        return None;
    }
    Some(matcher.bindings.into_iter().collect())
}
