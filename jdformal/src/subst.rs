//! Capture-avoiding substitutions.
//!
//! Role
//! - [`Substitution`] is an ordered mapping from variables to terms, applied
//!   simultaneously: `[x := y, y := x]` swaps `x` and `y`.
//! - Only free occurrences are replaced. When a replacement would be captured
//!   by a binder, the binder is renamed with [`Variable::fresh_avoiding`].
//!
//! Sharing
//! - Subtrees left untouched by a substitution are returned as the original
//!   `Rc` handles, so applying a substitution never deep-copies unaffected
//!   parts of a term. Applying the identity returns the input handle.
//!
//! Example
//! ```
//! use jdformal::subst::Substitution;
//! use jdformal::term::func::*;
//! use jdformal::variable::Variable;
//!
//! let sub = Substitution::singleton(Variable::new("n"), app("s", [cnst("z")]));
//! assert_eq!(sub.apply(&app("s", [var("n")])), app("s", [app("s", [cnst("z")])]));
//! ```
use std::collections::{BTreeMap, btree_map};

use smallvec::SmallVec;

use crate::{
    term::{Term, TermView},
    variable::Variable,
};

/// Ordered mapping from variables to terms.
///
/// Equality compares bindings pairwise, terms up to alpha-equivalence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: BTreeMap<Variable, Term>,
}

impl Substitution {
    /// The substitution that maps nothing.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The substitution `[v := t]`.
    pub fn singleton(v: Variable, t: Term) -> Self {
        let mut sub = Self::identity();
        sub.bind(v, t);
        sub
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bind `v` to `t`, returning the previous binding. Binding a variable to
    /// itself removes it instead.
    pub fn bind(&mut self, v: Variable, t: Term) -> Option<Term> {
        if matches!(t.view(), TermView::Var(w) if *w == v) {
            self.map.remove(&v)
        } else {
            self.map.insert(v, t)
        }
    }

    pub fn get(&self, v: &Variable) -> Option<&Term> {
        self.map.get(v)
    }

    pub fn contains(&self, v: &Variable) -> bool {
        self.map.contains_key(v)
    }

    /// Variables bound by this substitution, in order.
    pub fn domain(&self) -> impl Iterator<Item = &Variable> {
        self.map.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Variable, Term> {
        self.map.iter()
    }

    /// Apply the substitution to `term`.
    pub fn apply(&self, term: &Term) -> Term {
        if self.is_identity() {
            return term.clone();
        }
        self.apply_in(term)
    }

    fn apply_in(&self, term: &Term) -> Term {
        match term.view() {
            TermView::Var(v) => self.map.get(v).cloned().unwrap_or_else(|| term.clone()),
            TermView::Const(_) => term.clone(),
            TermView::App { head, args } => {
                let replaced: SmallVec<Term, 3> = args.iter().map(|a| self.apply_in(a)).collect();
                if replaced.iter().zip(args.iter()).all(|(n, o)| n.ptr_eq(o)) {
                    term.clone()
                } else {
                    Term::app(head.clone(), replaced)
                }
            }
            TermView::Abs { binder, body } => self.apply_under_binder(term, binder, body),
        }
    }

    fn apply_under_binder(&self, term: &Term, binder: &Variable, body: &Term) -> Term {
        let body_fv = body.free_vars();

        // Bindings for the binder itself are shadowed, bindings for variables
        // absent from the body are irrelevant.
        let relevant = Substitution {
            map: self
                .map
                .iter()
                .filter(|(v, _)| *v != binder && body_fv.contains(*v))
                .map(|(v, t)| (v.clone(), t.clone()))
                .collect(),
        };
        if relevant.is_identity() {
            return term.clone();
        }

        if !relevant.map.values().any(|t| t.occurs_free(binder)) {
            let new_body = relevant.apply_in(body);
            return if new_body.ptr_eq(body) {
                term.clone()
            } else {
                Term::abs(binder.clone(), new_body)
            };
        }

        // A replacement mentions the binder: rename it first.
        let mut avoid = body_fv;
        avoid.insert(binder.clone());
        for t in relevant.map.values() {
            avoid.extend(t.free_vars());
        }
        let fresh = binder.fresh_avoiding(&avoid);

        let mut renamed = relevant;
        renamed.map.insert(binder.clone(), Term::var(fresh.clone()));
        Term::abs(fresh, renamed.apply_in(body))
    }

    /// Composition: apply `self`, then `other`.
    ///
    /// `s.then(o).apply(t)` is alpha-equivalent to `o.apply(&s.apply(t))`.
    pub fn then(&self, other: &Substitution) -> Substitution {
        let mut composed = Substitution::identity();
        for (v, t) in &self.map {
            composed.bind(v.clone(), other.apply(t));
        }
        for (v, t) in &other.map {
            if !self.map.contains_key(v) {
                composed.bind(v.clone(), t.clone());
            }
        }
        composed
    }
}

impl FromIterator<(Variable, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, Term)>>(iter: I) -> Self {
        let mut sub = Substitution::identity();
        for (v, t) in iter {
            sub.bind(v, t);
        }
        sub
    }
}

impl<'a> IntoIterator for &'a Substitution {
    type Item = (&'a Variable, &'a Term);
    type IntoIter = btree_map::Iter<'a, Variable, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl std::fmt::Display for Substitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (v, t)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v} := {t}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::func::*;

    fn v(name: &str) -> Variable {
        Variable::new(name)
    }

    #[test]
    fn identity_returns_the_same_node() {
        let t = app("f", [abs("x", var("x")), var("y")]);
        let out = Substitution::identity().apply(&t);
        assert!(out.ptr_eq(&t));
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let left = app("s", [app("s", [cnst("z")])]);
        let t = app("pair", [left.clone(), var("n")]);
        let out = Substitution::singleton(v("n"), cnst("z")).apply(&t);
        assert!(out.args()[0].ptr_eq(&left));
        assert_eq!(out, app("pair", [left, cnst("z")]));
    }

    #[test]
    fn bound_occurrences_are_not_replaced() {
        let t = abs("x", app("f", [var("x"), var("y")]));
        let out = Substitution::singleton(v("x"), cnst("c")).apply(&t);
        assert!(out.ptr_eq(&t));
    }

    #[test]
    fn binder_is_renamed_to_avoid_capture() {
        // (\x. f(x, y))[y := x]  ==  \x'. f(x', x)
        let t = abs("x", app("f", [var("x"), var("y")]));
        let out = Substitution::singleton(v("y"), var("x")).apply(&t);

        assert_eq!(out, abs("w", app("f", [var("w"), var("x")])));
        let TermView::Abs { binder, .. } = out.view() else {
            panic!("expected a binder");
        };
        assert_eq!(binder, &Variable::with_stamp("x", 1));
        assert!(out.occurs_free(&v("x")));
    }

    #[test]
    fn application_is_simultaneous() {
        let sub: Substitution = [(v("x"), var("y")), (v("y"), var("x"))]
            .into_iter()
            .collect();
        assert_eq!(
            sub.apply(&app("p", [var("x"), var("y")])),
            app("p", [var("y"), var("x")])
        );
    }

    #[test]
    fn self_binding_is_dropped() {
        let mut sub = Substitution::identity();
        sub.bind(v("x"), var("x"));
        assert!(sub.is_identity());
    }

    #[test]
    fn composition_applies_left_then_right() {
        let first = Substitution::singleton(v("x"), app("s", [var("y")]));
        let second = Substitution::singleton(v("y"), cnst("z"));
        let composed = first.then(&second);

        let t = app("p", [var("x"), var("y")]);
        assert_eq!(composed.apply(&t), second.apply(&first.apply(&t)));
        assert_eq!(composed.to_string(), "[x := s(z), y := z]");
    }
}
