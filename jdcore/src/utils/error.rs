use jdformal::{
    judgment::{Judgment, MalformedJudgment},
    variable::Symbol,
};
use strum::{Display, EnumIs};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JdError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize configuration for '{file}': {source}")]
    ConfigSerializeError {
        source: toml::ser::Error,
        file: String,
    },

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Prove(#[from] ProveError),
}

pub type JdResult<T> = Result<T, JdError>;

/// Errors raised while building a rule database.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum RuleError {
    /// Two rules share a name.
    #[error("A rule named `{0}` is already declared in the rule database.")]
    DuplicateRule(Symbol),

    /// The conclusion does not fit its judgment family.
    #[error("The conclusion of rule `{rule}` is malformed: {source}")]
    MalformedConclusion {
        rule: Symbol,
        source: MalformedJudgment,
    },

    /// A premise does not fit its judgment family.
    #[error("Premise #{index} of rule `{rule}` is malformed: {source}")]
    MalformedPremise {
        rule: Symbol,
        index: usize,
        source: MalformedJudgment,
    },
}

/// Why a search ended without a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ExhaustionReason {
    /// Every branch allowed by the depth bound failed.
    #[strum(to_string = "search space exhausted")]
    SearchSpace,

    /// The configured attempt budget ran out first.
    #[strum(to_string = "attempt budget spent")]
    AttemptBudget,
}

/// Failures of a proof search call.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum ProveError {
    /// No proof exists within the bound. Expected outcome of an incomplete search.
    #[error(
        "No proof of `{goal}` found within depth bound {depth_bound} ({attempts} rule attempts, {reason})."
    )]
    SearchExhausted {
        goal: Judgment,
        depth_bound: usize,
        attempts: usize,
        reason: ExhaustionReason,
    },

    /// The goal does not fit its judgment family; a caller contract violation.
    #[error("Malformed goal: {0}")]
    MalformedGoal(#[from] MalformedJudgment),

    /// Search starts from an open goal.
    #[error("Proof search must start from an open goal, but `{0}` is already justified.")]
    RootNotOpen(Judgment),
}

pub type ProveResult<T> = Result<T, ProveError>;

/// Reasons a proof tree fails independent verification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum ProofCheckError {
    #[error("Judgment `{0}` is still open.")]
    OpenGoal(Judgment),

    #[error("Rule `{0}` is not part of the rule database.")]
    UnknownRule(Symbol),

    #[error("Rule `{rule}` concludes `{expected}`, but the node proves `{found}`.")]
    ConclusionMismatch {
        rule: Symbol,
        expected: Judgment,
        found: Judgment,
    },

    #[error("Rule `{rule}` has {expected} premises, but the node has {found} children.")]
    PremiseCountMismatch {
        rule: Symbol,
        expected: usize,
        found: usize,
    },

    #[error("Premise #{index} of rule `{rule}` is `{expected}`, but the child proves `{found}`.")]
    PremiseMismatch {
        rule: Symbol,
        index: usize,
        expected: Judgment,
        found: Judgment,
    },
}
