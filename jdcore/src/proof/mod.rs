//! Proof trees produced by backward search.
//!
//! A [`Proof`] is either an open goal or a judgment closed by a rule
//! application whose premises are the children of the node. Callers only
//! build open roots with [`Proof::open`]; closed nodes come from the prover,
//! which only hands out complete trees.
//!
//! Rendering is pre-order, one line per node, indented two columns per level:
//!
//! ```text
//! P(s(s(z))) by rule step
//!   P(s(z)) by rule step
//!     P(z) by rule base
//! ```
use std::{fmt, io, io::Write};

use jdformal::{
    judgment::Judgment,
    matching::match_pattern,
    term::pretty::{PrettyTerm, Style, kw, render_to, styled},
};
use pretty::{FmtWrite, RcDoc};
use strum::{EnumIs, EnumTryAs};
use termcolor::WriteColor;

use crate::{
    rules::{RuleDatabase, RuleInstance},
    utils::error::ProofCheckError,
};

/// A judgment justified by a rule instance and one sub-proof per premise.
#[derive(Debug, Clone)]
pub struct Derivation {
    judgment: Judgment,
    instance: RuleInstance,
    children: Vec<Proof>,
}

impl Derivation {
    #[inline]
    pub fn judgment(&self) -> &Judgment {
        &self.judgment
    }

    #[inline]
    pub fn instance(&self) -> &RuleInstance {
        &self.instance
    }

    #[inline]
    pub fn children(&self) -> &[Proof] {
        &self.children
    }
}

impl PartialEq for Derivation {
    fn eq(&self, other: &Self) -> bool {
        self.judgment == other.judgment
            && self.instance.rule().name() == other.instance.rule().name()
            && self.children == other.children
    }
}

impl Eq for Derivation {}

/// A proof tree. Outside this crate only open roots can be built:
///
/// ```
/// use jdcore::prelude::*;
///
/// let goal = Judgment::new(app("P", [cnst("z")]), JudgmentFamily::new("P", 1));
/// assert!(Proof::open(goal).is_partial());
/// ```
///
/// ```compile_fail
/// use jdcore::proof::Proof;
///
/// let _ = Proof::refine;
/// ```
///
/// ```compile_fail
/// use jdcore::proof::Proof;
///
/// let _ = Proof::close_with;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, EnumTryAs)]
pub enum Proof {
    /// A goal nothing justifies yet.
    Open(Judgment),
    /// A goal justified by a rule application.
    Closed(Derivation),
}

impl Proof {
    pub fn open(judgment: Judgment) -> Self {
        Proof::Open(judgment)
    }

    /// Close `judgment` without checking anything. The caller guarantees that
    /// the conclusion of `instance` is `judgment` and that the children prove
    /// the instantiated premises, in order.
    pub(crate) fn closed_unchecked(
        judgment: Judgment,
        instance: RuleInstance,
        children: Vec<Proof>,
    ) -> Self {
        Proof::Closed(Derivation {
            judgment,
            instance,
            children,
        })
    }

    /// Apply a rule instance backwards: its conclusion is closed and every
    /// premise becomes an open goal.
    #[cfg(test)]
    pub(crate) fn refine(instance: RuleInstance) -> Self {
        let children = instance.premises().map(Proof::Open).collect();
        Self::closed_unchecked(instance.conclusion(), instance, children)
    }

    /// Close the conclusion of `instance` with the given sub-proofs, checking
    /// that they prove its premises in order.
    #[cfg(test)]
    pub(crate) fn close_with(
        instance: RuleInstance,
        children: Vec<Proof>,
    ) -> Result<Self, ProofCheckError> {
        let rule = instance.rule();
        if rule.premises().len() != children.len() {
            return Err(ProofCheckError::PremiseCountMismatch {
                rule: rule.name().clone(),
                expected: rule.premises().len(),
                found: children.len(),
            });
        }

        for (index, (expected, child)) in instance.premises().zip(&children).enumerate() {
            if expected != *child.judgment() {
                return Err(ProofCheckError::PremiseMismatch {
                    rule: rule.name().clone(),
                    index,
                    expected,
                    found: child.judgment().clone(),
                });
            }
        }

        Ok(Self::closed_unchecked(instance.conclusion(), instance, children))
    }

    /// The judgment at the root of this tree.
    pub fn judgment(&self) -> &Judgment {
        match self {
            Proof::Open(judgment) => judgment,
            Proof::Closed(derivation) => &derivation.judgment,
        }
    }

    /// `true` iff no open goal remains anywhere in the tree.
    pub fn is_complete(&self) -> bool {
        match self {
            Proof::Open(_) => false,
            Proof::Closed(derivation) => derivation.children.iter().all(Proof::is_complete),
        }
    }

    /// `true` iff some goal is still open.
    #[inline]
    pub fn is_partial(&self) -> bool {
        !self.is_complete()
    }

    /// Open goals, in pre-order.
    pub fn open_goals(&self) -> Vec<&Judgment> {
        let mut goals = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Proof::Open(judgment) => goals.push(judgment),
                Proof::Closed(derivation) => stack.extend(derivation.children.iter().rev()),
            }
        }
        goals
    }

    /// Number of rule applications.
    pub fn size(&self) -> usize {
        match self {
            Proof::Open(_) => 0,
            Proof::Closed(derivation) => {
                1 + derivation.children.iter().map(Proof::size).sum::<usize>()
            }
        }
    }

    /// Longest chain of rule applications from the root. An open goal has height 0.
    pub fn height(&self) -> usize {
        match self {
            Proof::Open(_) => 0,
            Proof::Closed(derivation) => {
                1 + derivation
                    .children
                    .iter()
                    .map(Proof::height)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Names of the applied rules, in pre-order.
    pub fn rule_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Proof::Closed(derivation) = node {
                names.push(derivation.instance.rule().name().to_string());
                stack.extend(derivation.children.iter().rev());
            }
        }
        names
    }

    /// Re-check the whole tree against `db`, independently of how it was built.
    ///
    /// Every node must be closed by a rule of `db` whose conclusion matches the
    /// node and whose instantiated premises are exactly the children.
    pub fn check(&self, db: &RuleDatabase) -> Result<(), ProofCheckError> {
        let derivation = match self {
            Proof::Open(judgment) => return Err(ProofCheckError::OpenGoal(judgment.clone())),
            Proof::Closed(derivation) => derivation,
        };

        let name = derivation.instance.rule().name();
        let rule = db
            .get(name)
            .filter(|rule| ***rule == **derivation.instance.rule())
            .ok_or_else(|| ProofCheckError::UnknownRule(name.clone()))?;

        let conclusion_mismatch = || ProofCheckError::ConclusionMismatch {
            rule: name.clone(),
            expected: rule.conclusion().clone(),
            found: derivation.judgment.clone(),
        };
        if rule.family() != derivation.judgment.family() {
            return Err(conclusion_mismatch());
        }
        let sub = match_pattern(rule.conclusion().term(), derivation.judgment.term())
            .ok_or_else(conclusion_mismatch)?;

        if rule.premises().len() != derivation.children.len() {
            return Err(ProofCheckError::PremiseCountMismatch {
                rule: name.clone(),
                expected: rule.premises().len(),
                found: derivation.children.len(),
            });
        }

        for (index, (premise, child)) in rule
            .premises()
            .iter()
            .zip(&derivation.children)
            .enumerate()
        {
            let expected = premise.instantiate(&sub);
            if expected != *child.judgment() {
                return Err(ProofCheckError::PremiseMismatch {
                    rule: name.clone(),
                    index,
                    expected,
                    found: child.judgment().clone(),
                });
            }
            child.check(db)?;
        }

        Ok(())
    }

    /// Render the tree with colors to `out`, breaking judgments at `width`.
    pub fn render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)?;
        writeln!(out)
    }

    /// Plain rendering, one line per node.
    pub fn render(&self) -> String {
        self.pretty_string()
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.render().lines().map(str::to_owned).collect()
    }
}

impl PrettyTerm for Proof {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        match self {
            Proof::Open(judgment) => judgment
                .pretty_doc()
                .append(RcDoc::space())
                .append(kw("by"))
                .append(RcDoc::space())
                .append(styled(Style::Punct, "?")),
            Proof::Closed(derivation) => {
                let line = derivation
                    .judgment
                    .pretty_doc()
                    .append(RcDoc::space())
                    .append(kw("by"))
                    .append(RcDoc::space())
                    .append(kw("rule"))
                    .append(RcDoc::space())
                    .append(styled(
                        Style::Rule,
                        derivation.instance.rule().name().to_string(),
                    ));

                let children = RcDoc::concat(
                    derivation
                        .children
                        .iter()
                        .map(|child| RcDoc::hardline().append(child.pretty_doc())),
                );
                line.append(children.nest(2))
            }
        }
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}
