//! Jdformal: immutable terms, substitutions and judgments for derivation checking.
//!
//! This crate exposes one term language used both for the goals a derivation
//! checker asks about and for the patterns of the inference rules it matches
//! them against.
//!
//! Building blocks
//!  - [`term::Term`]: reference-counted immutable trees (variables, constants,
//!    constructor applications, binders) compared up to alpha-equivalence.
//!  - [`subst::Substitution`]: ordered, simultaneous, capture-avoiding substitution.
//!  - [`matching::match_pattern`]: one-directional matching of a pattern whose free
//!    variables are metavariables against a rigid target.
//!  - [`judgment::Judgment`]: a term tagged with the [`judgment::JudgmentFamily`] it inhabits.
//!
//! Sharing
//!  - Terms are never mutated after construction; substitution reuses every untouched
//!    subtree instead of copying it.
//!
//! Example
//! ```
//! use jdformal::prelude::*;
//!
//! let nat = JudgmentFamily::new("P", 1);
//! let pattern = Judgment::new(app("P", [app("s", [var("n")])]), nat.clone());
//! let goal = Judgment::new(app("P", [app("s", [cnst("z")])]), nat);
//!
//! let sub = match_pattern(pattern.term(), goal.term()).unwrap();
//! assert_eq!(pattern.instantiate(&sub), goal);
//! assert_eq!(goal.to_string(), "P(s(z))");
//! ```

/// Judgments and judgment families.
pub mod judgment;
/// One-directional pattern matching.
pub mod matching;
/// Capture-avoiding substitutions.
pub mod subst;
/// Term representation, builders and pretty printing.
pub mod term;
/// Symbols and variables.
pub mod variable;
/// Iterative traversal of terms.
pub mod walker;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Term`, `TermView` and the free-function builders from `func::*`
    //! - `Substitution` and `match_pattern`
    //! - `Judgment`, `JudgmentFamily`
    //! - Pretty-printing via `PrettyTerm`
    //! - Symbol and variable types
    pub use crate::judgment::{Judgment, JudgmentFamily, MalformedJudgment};
    pub use crate::matching::match_pattern;
    pub use crate::subst::Substitution;
    pub use crate::term::{Term, TermView, func::*, pretty::PrettyTerm};
    pub use crate::variable::{Symbol, Variable};
}
