//! Inference rules and the ordered rule database consulted by the prover.
//!
//! A [`Rule`] concludes one judgment from zero or more premises. Free
//! variables of a rule are metavariables. For a grounded rule, matching the
//! conclusion against a goal fixes all of them, so instantiated premises are
//! closed over the goal.
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::Rc,
};

use jdformal::{
    judgment::{Judgment, JudgmentFamily},
    subst::Substitution,
    term::pretty::{PrettyTerm, Style, kw, styled},
    variable::{Symbol, Variable},
};
use log::debug;
use pretty::RcDoc;
use smallvec::SmallVec;

use crate::utils::error::RuleError;

/// An inference rule `premises ⊢ conclusion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: Symbol,
    premises: SmallVec<Judgment, 2>,
    conclusion: Judgment,
    /// Every premise metavariable occurs in the conclusion.
    grounded: bool,
}

impl Rule {
    /// Build a rule, checking that every judgment fits its family.
    ///
    /// Premises may mention metavariables absent from the conclusion, as in
    /// transitivity; such rules are kept but see [`Rule::is_grounded`].
    pub fn new<S: Into<Symbol>>(
        name: S,
        premises: impl IntoIterator<Item = Judgment>,
        conclusion: Judgment,
    ) -> Result<Self, RuleError> {
        let name = name.into();

        conclusion
            .validate()
            .map_err(|source| RuleError::MalformedConclusion {
                rule: name.clone(),
                source,
            })?;

        let premises: SmallVec<Judgment, 2> = premises.into_iter().collect();
        for (index, premise) in premises.iter().enumerate() {
            premise
                .validate()
                .map_err(|source| RuleError::MalformedPremise {
                    rule: name.clone(),
                    index,
                    source,
                })?;
        }

        let mut rule = Self {
            name,
            premises,
            conclusion,
            grounded: true,
        };
        rule.grounded = rule.unbound_premise_variables().is_empty();
        if !rule.grounded {
            debug!(
                "Rule `{}` has premise-only metavariables; backward search will not apply it",
                rule.name
            );
        }
        Ok(rule)
    }

    /// A rule without premises.
    pub fn axiom<S: Into<Symbol>>(name: S, conclusion: Judgment) -> Result<Self, RuleError> {
        Self::new(name, std::iter::empty(), conclusion)
    }

    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    #[inline]
    pub fn premises(&self) -> &[Judgment] {
        &self.premises
    }

    #[inline]
    pub fn conclusion(&self) -> &Judgment {
        &self.conclusion
    }

    #[inline]
    pub fn family(&self) -> &JudgmentFamily {
        self.conclusion.family()
    }

    #[inline]
    pub fn is_axiom(&self) -> bool {
        self.premises.is_empty()
    }

    /// `true` iff matching the conclusion fixes every premise metavariable.
    ///
    /// Only grounded rules are applied by backward search: the premises of
    /// any other rule would leave unknowns that matching cannot fill.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Metavariables of the premises that the conclusion does not bind.
    pub fn unbound_premise_variables(&self) -> BTreeSet<Variable> {
        let bound = self.conclusion.term().free_vars();
        self.premises
            .iter()
            .flat_map(|p| p.term().free_vars())
            .filter(|v| !bound.contains(v))
            .collect()
    }
}

impl PrettyTerm for Rule {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        let head = styled(Style::Rule, self.name.to_string())
            .append(styled(Style::Punct, ":"))
            .append(RcDoc::space())
            .append(self.conclusion.pretty_doc());

        if self.premises.is_empty() {
            return head.group();
        }

        let premises = RcDoc::intersperse(
            self.premises.iter().map(PrettyTerm::pretty_doc),
            styled(Style::Punct, ",").append(RcDoc::line()),
        );
        head.append(RcDoc::line())
            .append(kw(":-"))
            .append(RcDoc::space())
            .append(premises.nest(2))
            .group()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_string())
    }
}

/// A rule together with the substitution fixing its metavariables.
#[derive(Debug, Clone)]
pub struct RuleInstance {
    rule: Rc<Rule>,
    substitution: Substitution,
}

impl RuleInstance {
    pub fn new(rule: Rc<Rule>, substitution: Substitution) -> Self {
        Self { rule, substitution }
    }

    #[inline]
    pub fn rule(&self) -> &Rc<Rule> {
        &self.rule
    }

    #[inline]
    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }

    pub fn conclusion(&self) -> Judgment {
        self.rule.conclusion.instantiate(&self.substitution)
    }

    /// Instantiated premises, in declaration order.
    pub fn premises(&self) -> impl Iterator<Item = Judgment> + '_ {
        self.rule
            .premises
            .iter()
            .map(|p| p.instantiate(&self.substitution))
    }
}

/// Rules in declaration order, indexed by the family they conclude.
///
/// The database is built once and only read during search.
#[derive(Debug, Clone, Default)]
pub struct RuleDatabase {
    rules: Vec<Rc<Rule>>,
    by_family: BTreeMap<JudgmentFamily, SmallVec<usize, 4>>,
    by_name: BTreeMap<Symbol, usize>,
}

impl RuleDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a database from rules given in declaration order.
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Result<Self, RuleError> {
        let mut db = Self::new();
        for rule in rules {
            db.add(rule)?;
        }
        Ok(db)
    }

    /// Append a rule. Names must be unique.
    pub fn add(&mut self, rule: Rule) -> Result<(), RuleError> {
        if self.by_name.contains_key(rule.name()) {
            return Err(RuleError::DuplicateRule(rule.name().clone()));
        }

        let index = self.rules.len();
        debug!(
            "Declaring rule `{}` (#{index}) for family `{}`",
            rule.name(),
            rule.family()
        );
        self.by_name.insert(rule.name().clone(), index);
        self.by_family
            .entry(rule.family().clone())
            .or_default()
            .push(index);
        self.rules.push(Rc::new(rule));
        Ok(())
    }

    /// Rules concluding `family`, in declaration order.
    pub fn candidates<'a>(
        &'a self,
        family: &JudgmentFamily,
    ) -> impl Iterator<Item = &'a Rc<Rule>> + 'a {
        self.by_family
            .get(family)
            .into_iter()
            .flat_map(|indices| indices.iter().map(|&i| &self.rules[i]))
    }

    pub fn get(&self, name: &Symbol) -> Option<&Rc<Rule>> {
        self.by_name.get(name).map(|&i| &self.rules[i])
    }

    pub fn contains(&self, name: &Symbol) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Rule>> {
        self.rules.iter()
    }

    pub fn families(&self) -> impl Iterator<Item = &JudgmentFamily> {
        self.by_family.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
