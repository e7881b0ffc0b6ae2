//! Free-function builders for terms.
//!
//! ```
//! use jdformal::term::func::*;
//!
//! // plus(s(z), n, s(n))
//! let t = app("plus", [app("s", [cnst("z")]), var("n"), app("s", [var("n")])]);
//! assert_eq!(t.args().len(), 3);
//! ```
use crate::{
    term::Term,
    variable::{Symbol, Variable},
};

/// Variable occurrence `x`.
#[inline]
pub fn var<V: Into<Variable>>(v: V) -> Term {
    Term::var(v)
}

/// Constant `c`.
#[inline]
pub fn cnst<S: Into<Symbol>>(name: S) -> Term {
    Term::constant(name)
}

/// Application `head(args...)`.
#[inline]
pub fn app<S: Into<Symbol>, I: IntoIterator<Item = Term>>(head: S, args: I) -> Term {
    Term::app(head, args)
}

/// Binder `\x. body`.
#[inline]
pub fn abs<V: Into<Variable>>(binder: V, body: Term) -> Term {
    Term::abs(binder, body)
}
