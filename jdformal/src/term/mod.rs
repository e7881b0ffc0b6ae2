//! Immutable terms: constructors, alpha-equivalence and free variables.
//!
//! Role
//! - A single term language covering variables, constants, constructor
//!   applications and binders.
//! - Builders in [`func`] let you write terms tersely; [`Term::view`] exposes
//!   the outer constructor for inspection.
//!
//! Sharing
//! - A [`Term`] is a reference-counted pointer to an immutable node. Cloning is
//!   O(1) and subtrees are shared between every term that mentions them.
//!
//! Equality semantics
//! - [`Term`] compares up to alpha-equivalence: `\x. f(x)` equals `\y. f(y)`.
//!   [`Hash`] is consistent with that equality, so terms (and judgments) can key
//!   hash maps.
//!
//! Example
//! ```
//! use jdformal::term::func::*;
//!
//! let two = app("s", [app("s", [cnst("z")])]);
//! assert_eq!(two.to_string(), "s(s(z))");
//! assert_eq!(abs("x", var("x")), abs("y", var("y")));
//! ```
pub mod func;
pub mod pretty;

use std::{
    collections::BTreeSet,
    hash::{Hash, Hasher},
    rc::Rc,
};

use smallvec::SmallVec;
use strum::EnumIs;

use crate::{
    variable::{Symbol, Variable},
    walker::{Visit, subterms, walk},
};

/// Outer constructor of a term together with its children.
#[derive(Debug, Clone, EnumIs)]
pub enum TermView {
    /// A variable, free or bound by an enclosing [`TermView::Abs`].
    Var(Variable),

    /// A constant (nullary constructor), e.g. `z`.
    Const(Symbol),

    /// A constructor applied to one or more arguments, e.g. `s(z)`.
    App {
        head: Symbol,
        args: SmallVec<Term, 3>,
    },

    /// A binder `\binder. body`.
    Abs { binder: Variable, body: Term },
}

/// Shared, immutable term.
#[derive(Clone)]
pub struct Term(Rc<TermView>);

impl Term {
    /// Build a variable occurrence.
    pub fn var<V: Into<Variable>>(v: V) -> Self {
        Self(Rc::new(TermView::Var(v.into())))
    }

    /// Build a constant.
    pub fn constant<S: Into<Symbol>>(name: S) -> Self {
        Self(Rc::new(TermView::Const(name.into())))
    }

    /// Build an application. An application without arguments is a constant.
    pub fn app<S, I>(head: S, args: I) -> Self
    where
        S: Into<Symbol>,
        I: IntoIterator<Item = Term>,
    {
        let args: SmallVec<Term, 3> = args.into_iter().collect();
        if args.is_empty() {
            Self::constant(head)
        } else {
            Self(Rc::new(TermView::App {
                head: head.into(),
                args,
            }))
        }
    }

    /// Build a binder.
    pub fn abs<V: Into<Variable>>(binder: V, body: Term) -> Self {
        Self(Rc::new(TermView::Abs {
            binder: binder.into(),
            body,
        }))
    }

    /// Describe the outer constructor of the term.
    #[inline]
    pub fn view(&self) -> &TermView {
        &self.0
    }

    /// True if both handles point to the very same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Term) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Head symbol of a constant or application.
    pub fn head(&self) -> Option<&Symbol> {
        match self.view() {
            TermView::Const(head) | TermView::App { head, .. } => Some(head),
            TermView::Var(_) | TermView::Abs { .. } => None,
        }
    }

    /// Arguments of an application; empty for any other term.
    pub fn args(&self) -> &[Term] {
        match self.view() {
            TermView::App { args, .. } => args,
            _ => &[],
        }
    }

    /// Free variables of the term, in variable order.
    pub fn free_vars(&self) -> BTreeSet<Variable> {
        let mut out = BTreeSet::new();
        let mut bound = Vec::new();
        self.collect_free(&mut bound, &mut out);
        out
    }

    fn collect_free<'a>(&'a self, bound: &mut Vec<&'a Variable>, out: &mut BTreeSet<Variable>) {
        match self.view() {
            TermView::Var(v) => {
                if !bound.contains(&v) {
                    out.insert(v.clone());
                }
            }
            TermView::Const(_) => {}
            TermView::App { args, .. } => {
                for arg in args.iter() {
                    arg.collect_free(bound, out);
                }
            }
            TermView::Abs { binder, body } => {
                bound.push(binder);
                body.collect_free(bound, out);
                bound.pop();
            }
        }
    }

    /// Whether `v` occurs free in the term.
    pub fn occurs_free(&self, v: &Variable) -> bool {
        match self.view() {
            TermView::Var(w) => w == v,
            TermView::Const(_) => false,
            TermView::App { args, .. } => args.iter().any(|arg| arg.occurs_free(v)),
            TermView::Abs { binder, body } => binder != v && body.occurs_free(v),
        }
    }

    /// True if the term has no free variables.
    pub fn is_closed(&self) -> bool {
        self.free_vars().is_empty()
    }

    /// Number of nodes in the term.
    pub fn size(&self) -> usize {
        subterms(self).count()
    }

    /// Length of the longest path from the root to a leaf, counting nodes.
    pub fn height(&self) -> usize {
        let mut height = 0;
        walk(self, 1usize, |_, depth| {
            height = height.max(*depth);
            Visit::Children(depth + 1)
        });
        height
    }

    fn alpha_eq_in<'a>(&'a self, other: &'a Term, env: &mut Vec<(&'a Variable, &'a Variable)>) -> bool {
        // Sharing only implies equality when no binder pairs are pending.
        if env.is_empty() && self.ptr_eq(other) {
            return true;
        }

        match (self.view(), other.view()) {
            (TermView::Var(x), TermView::Var(y)) => {
                // Innermost binder mentioning either side decides.
                for (bx, by) in env.iter().rev() {
                    if *bx == x || *by == y {
                        return *bx == x && *by == y;
                    }
                }
                x == y
            }
            (TermView::Const(a), TermView::Const(b)) => a == b,
            (
                TermView::App {
                    head: head_a,
                    args: args_a,
                },
                TermView::App {
                    head: head_b,
                    args: args_b,
                },
            ) => {
                head_a == head_b
                    && args_a.len() == args_b.len()
                    && args_a
                        .iter()
                        .zip(args_b.iter())
                        .all(|(a, b)| a.alpha_eq_in(b, env))
            }
            (
                TermView::Abs {
                    binder: binder_a,
                    body: body_a,
                },
                TermView::Abs {
                    binder: binder_b,
                    body: body_b,
                },
            ) => {
                env.push((binder_a, binder_b));
                let eq = body_a.alpha_eq_in(body_b, env);
                env.pop();
                eq
            }
            _ => false,
        }
    }

    fn hash_in<'a, H: Hasher>(&'a self, state: &mut H, bound: &mut Vec<&'a Variable>) {
        match self.view() {
            TermView::Var(v) => match bound.iter().rposition(|b| *b == v) {
                Some(index) => {
                    0u8.hash(state);
                    (bound.len() - 1 - index).hash(state);
                }
                None => {
                    1u8.hash(state);
                    v.hash(state);
                }
            },
            TermView::Const(name) => {
                2u8.hash(state);
                name.hash(state);
            }
            TermView::App { head, args } => {
                3u8.hash(state);
                head.hash(state);
                args.len().hash(state);
                for arg in args.iter() {
                    arg.hash_in(state, bound);
                }
            }
            TermView::Abs { binder, body } => {
                4u8.hash(state);
                bound.push(binder);
                body.hash_in(state, bound);
                bound.pop();
            }
        }
    }
}

impl PartialEq for Term {
    /// Alpha-equivalence. Expect O(n) in the size of the smaller term, plus a
    /// scan of the enclosing binders at each variable.
    fn eq(&self, other: &Self) -> bool {
        let mut env = Vec::new();
        self.alpha_eq_in(other, &mut env)
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut bound = Vec::new();
        self.hash_in(state, &mut bound);
    }
}

impl std::fmt::Debug for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{self}`")
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::var(v)
    }
}

#[cfg(test)]
mod tests {
    use super::func::*;
    use super::*;

    #[test]
    fn empty_application_is_a_constant() {
        let z = app("z", []);
        assert!(z.view().is_const());
        assert_eq!(z, cnst("z"));
    }

    #[test]
    fn shadowing_binders_compare_by_position() {
        // \x. \x. x  ==  \a. \b. b   but  !=  \a. \b. a
        let lhs = abs("x", abs("x", var("x")));
        assert_eq!(lhs, abs("a", abs("b", var("b"))));
        assert_ne!(lhs, abs("a", abs("b", var("a"))));
    }

    #[test]
    fn free_variable_is_not_equal_to_bound_one() {
        // \x. y  !=  \y. y
        assert_ne!(abs("x", var("y")), abs("y", var("y")));
    }

    #[test]
    fn free_vars_respect_scoping() {
        let t = app("pair", [abs("x", app("f", [var("x"), var("y")])), var("x")]);
        let fv: Vec<_> = t.free_vars().into_iter().collect();
        assert_eq!(fv, vec![Variable::new("x"), Variable::new("y")]);
        assert!(t.occurs_free(&Variable::new("y")));
        assert!(!abs("y", var("y")).occurs_free(&Variable::new("y")));
    }

    #[test]
    fn size_and_height() {
        let t = app("s", [app("s", [cnst("z")])]);
        assert_eq!(t.size(), 3);
        assert_eq!(t.height(), 3);
        assert_eq!(abs("x", var("x")).height(), 2);
    }
}
