//! Names and variables used across terms, judgments and rules.
//!
//! Role
//! - [`Symbol`] names constants, constructors, judgment families and rules.
//! - [`Variable`] names binders and free variables. Free variables of a rule
//!   pattern are its metavariables; free variables of a goal are rigid.
//! - Fresh variables are produced by bumping the stamp of an existing name, so
//!   renaming never depends on global state.
use std::{collections::BTreeSet, fmt, rc::Rc};

/// Reference-counted name. Cloning is a pointer copy.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier for a variable, either written in the source (stamp 0) or
/// produced by renaming.
///
/// Display
/// - `x` for stamp 0, `x#3` for a variable renamed with stamp 3.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    name: Symbol,
    stamp: u32,
}

impl Variable {
    /// Create a source-level variable.
    pub fn new<S: Into<Symbol>>(name: S) -> Self {
        Self {
            name: name.into(),
            stamp: 0,
        }
    }

    /// Create a variable with an explicit stamp.
    pub fn with_stamp<S: Into<Symbol>>(name: S, stamp: u32) -> Self {
        Self {
            name: name.into(),
            stamp,
        }
    }

    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    #[inline]
    pub fn stamp(&self) -> u32 {
        self.stamp
    }

    /// Return a variable with the same name that does not belong to `avoid`.
    ///
    /// The stamp is one past the largest stamp used by a variable of the same
    /// name in `avoid` (and past `self`), which keeps renaming deterministic.
    pub fn fresh_avoiding(&self, avoid: &BTreeSet<Variable>) -> Variable {
        let highest = avoid
            .iter()
            .filter(|v| v.name == self.name)
            .map(|v| v.stamp)
            .chain(std::iter::once(self.stamp))
            .max()
            .unwrap_or(self.stamp);

        Variable {
            name: self.name.clone(),
            stamp: highest + 1,
        }
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Variable::new(value)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stamp == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}#{}", self.name, self.stamp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_variable_skips_used_stamps() {
        let x = Variable::new("x");
        let avoid: BTreeSet<_> = [
            Variable::new("x"),
            Variable::with_stamp("x", 4),
            Variable::with_stamp("y", 9),
        ]
        .into_iter()
        .collect();

        let fresh = x.fresh_avoiding(&avoid);
        assert_eq!(fresh, Variable::with_stamp("x", 5));
        assert!(!avoid.contains(&fresh));
    }

    #[test]
    fn display_shows_stamp_only_when_renamed() {
        assert_eq!(Variable::new("n").to_string(), "n");
        assert_eq!(Variable::with_stamp("n", 2).to_string(), "n#2");
    }
}
