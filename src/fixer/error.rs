//! Error types for the fixer engine
//!
//! The taxonomy separates per-file failures (tokenization, a rule signaling
//! during its transform) from process-wide startup failures (an unresolvable
//! rule order). Convergence failure is deliberately NOT an error: the engine
//! returns the best-effort text with a `converged: false` flag, and callers
//! decide how loudly to report it.

use thiserror::Error;

/// Input that could not be lexed.
///
/// With the catch-all symbol kind the lexer alphabet is total, so this is a
/// guard against pattern regressions rather than an expected runtime path. It
/// is surfaced per file and never aborts other files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("input could not be tokenized at byte offset {offset}")]
pub struct TokenizeError {
    /// Byte offset of the first unlexable position
    pub offset: usize,
}

/// A rule signaled failure while transforming a stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
}

impl RuleError {
    /// Create a rule error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        RuleError {
            message: message.into(),
        }
    }
}

/// Errors that abort a single file's fixing pipeline.
///
/// One file's failure never aborts the batch; the processor records it in that
/// file's report and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    /// The file could not be tokenized at all
    #[error("tokenization failed: {0}")]
    Tokenize(#[from] TokenizeError),

    /// A rule failed while applying; the rule is named so a faulty rule can be
    /// disabled without touching the rest of the set
    #[error("rule '{rule}' failed: {source}")]
    Rule {
        rule: String,
        #[source]
        source: RuleError,
    },
}

/// Startup-time failures while resolving the rule set.
///
/// All of these are fatal before any file is processed: an engine with an
/// ambiguous or unsatisfiable rule order cannot produce deterministic output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two registered rules share a name
    #[error("duplicate rule name '{0}'")]
    DuplicateRule(String),

    /// Two enabled rules declare a conflict with each other
    #[error("rules '{first}' and '{second}' conflict and cannot both be enabled")]
    ConflictingRules { first: String, second: String },

    /// Ordering constraints are cyclic and admit no total order
    #[error("rule ordering constraints form a cycle involving: {}", .involved.join(", "))]
    CyclicOrdering { involved: Vec<String> },

    /// A configured rule name does not match any registered rule
    #[error("unknown rule '{0}' in configuration")]
    UnknownRule(String),
}
