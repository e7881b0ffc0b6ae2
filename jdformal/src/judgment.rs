//! Judgments: terms tagged with the family they must inhabit.
//!
//! A [`JudgmentFamily`] such as `plus/3` fixes the head constructor and the
//! number of arguments of the terms it classifies. A [`Judgment`] pairs a term
//! with its family; the same type is used for concrete goals and for the
//! patterns appearing in inference rules.
use std::fmt;

use pretty::{FmtWrite, RcDoc};
use thiserror::Error;

use crate::{
    subst::Substitution,
    term::{
        Term,
        pretty::{PrettyTerm, Style},
    },
    variable::Symbol,
};

/// A family of judgments, identified by the head constructor of its terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JudgmentFamily {
    name: Symbol,
    arity: usize,
}

impl JudgmentFamily {
    pub fn new<S: Into<Symbol>>(name: S, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for JudgmentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// Reasons a term does not inhabit the shape of its family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedJudgment {
    /// The term is a variable or a binder rather than a constructor form.
    #[error("Judgment `{term}` of family `{family}` is not a constructor application.")]
    NotAnApplication { family: JudgmentFamily, term: Term },

    /// The head constructor differs from the family name.
    #[error("Judgment `{term}` is headed by `{found}` but belongs to family `{family}`.")]
    HeadMismatch {
        family: JudgmentFamily,
        found: Symbol,
        term: Term,
    },

    /// Wrong number of arguments.
    #[error("Judgment `{term}` has {found} arguments, family `{family}` expects {}.", .family.arity())]
    ArityMismatch {
        family: JudgmentFamily,
        found: usize,
        term: Term,
    },
}

/// A term paired with its judgment family.
///
/// Equality and hashing use both fields, with the term compared up to
/// alpha-equivalence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Judgment {
    term: Term,
    family: JudgmentFamily,
}

impl Judgment {
    /// Pair a term with its family. The shape is not checked; see [`Judgment::validate`].
    pub fn new(term: Term, family: JudgmentFamily) -> Self {
        Self { term, family }
    }

    #[inline]
    pub fn term(&self) -> &Term {
        &self.term
    }

    #[inline]
    pub fn family(&self) -> &JudgmentFamily {
        &self.family
    }

    /// Check that the term is headed by the family constructor with the
    /// expected number of arguments.
    pub fn validate(&self) -> Result<(), MalformedJudgment> {
        let Some(head) = self.term.head() else {
            return Err(MalformedJudgment::NotAnApplication {
                family: self.family.clone(),
                term: self.term.clone(),
            });
        };

        if head != self.family.name() {
            return Err(MalformedJudgment::HeadMismatch {
                family: self.family.clone(),
                found: head.clone(),
                term: self.term.clone(),
            });
        }

        let found = self.term.args().len();
        if found != self.family.arity() {
            return Err(MalformedJudgment::ArityMismatch {
                family: self.family.clone(),
                found,
                term: self.term.clone(),
            });
        }

        Ok(())
    }

    /// Apply `sub` to the term; the family is unchanged.
    pub fn instantiate(&self, sub: &Substitution) -> Judgment {
        Judgment {
            term: sub.apply(&self.term),
            family: self.family.clone(),
        }
    }
}

impl PrettyTerm for Judgment {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        self.term.pretty_doc()
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}
