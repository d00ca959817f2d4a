//! Rule contract and built-in fixer rules
//!
//! A rule is an independent unit of fixing: a cheap candidacy predicate plus a
//! transform over one file's [TokenStream]. Rules own no state between
//! invocations and are stateless across files, which is what makes the engine
//! free to re-run them to a fixed point and to process files in parallel.
//!
//! # Contract
//!
//! - `is_candidate` must be pure and fast: gate on kind presence
//!   (`is_kind_found`), never on content scans. The engine screens every rule
//!   against every file each pass, so this is the primary performance guard.
//! - `apply` must be deterministic (same input stream produces the same output)
//!   and should be idempotent: applying it twice in immediate succession
//!   produces no further change. The engine re-runs all candidate rules until
//!   the file converges, and defends against non-idempotent rules with an
//!   iteration cap rather than trusting this.
//! - Ordering needs are declared, not coded: a rule that must precede another
//!   names it in [RuleConstraints]; the registry turns the declarations into a
//!   deterministic total order.

pub mod inline_tag;
pub mod trailing_whitespace;

pub use inline_tag::InlineTagRule;
pub use trailing_whitespace::TrailingWhitespaceRule;

use crate::fixer::error::RuleError;
use crate::fixer::stream::TokenStream;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The identity of the file being fixed.
///
/// Passed to every rule application so rules can discriminate on the file's
/// path (a rule may behave differently for test files, for example). The
/// identity never influences tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    path: PathBuf,
}

impl FileContext {
    /// Create a context for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileContext { path: path.into() }
    }

    /// The path identifying this file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final path component, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Heuristic test-file check: a `tests`/`test` directory component, or a
    /// file stem with a `test_` prefix or `_test` suffix.
    pub fn is_test_file(&self) -> bool {
        let in_test_dir = self
            .path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|c| c == "tests" || c == "test");
        let stem_is_test = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.starts_with("test_") || stem.ends_with("_test"));
        in_test_dir || stem_is_test
    }
}

/// Declared ordering relations of a rule.
///
/// Constraints reference other rules by name. A name that matches no enabled
/// rule is ignored during resolution: rules are written independently, and a
/// disabled counterpart must not break the remaining set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConstraints {
    /// Names of rules this rule must run before
    pub run_before: Vec<&'static str>,
    /// Names of rules this rule cannot be enabled together with
    pub conflicts_with: Vec<&'static str>,
}

impl RuleConstraints {
    /// No declared relations.
    pub fn none() -> Self {
        RuleConstraints::default()
    }

    /// Declare rules this rule must run before.
    pub fn run_before(names: &[&'static str]) -> Self {
        RuleConstraints {
            run_before: names.to_vec(),
            ..RuleConstraints::default()
        }
    }
}

/// A fixer rule: candidacy predicate plus stream transform.
///
/// Implementors are value-like objects; any configuration they need is captured
/// at construction (compiled patterns included), never mutated afterwards.
pub trait Rule: Send + Sync {
    /// Unique name, used for registration, ordering constraints, and reports.
    fn name(&self) -> &'static str;

    /// Human-readable description of what the rule fixes.
    fn description(&self) -> &'static str;

    /// Scheduling weight: higher priorities run earlier among rules with no
    /// constraint path between them. Defaults to 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Declared ordering relations. Defaults to none.
    fn constraints(&self) -> RuleConstraints {
        RuleConstraints::none()
    }

    /// Cheap screen: does this rule have any possible work on this stream?
    ///
    /// Must return `false` without scanning content when the relevant lexeme
    /// kind is absent.
    fn is_candidate(&self, stream: &TokenStream) -> bool;

    /// Transform the stream in place.
    ///
    /// Only invoked when `is_candidate` returned `true` on the current stream.
    fn apply(&self, file: &FileContext, stream: &mut TokenStream) -> Result<(), RuleError>;
}

impl std::fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name()).finish()
    }
}

/// The built-in ruleset, in registration order.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(InlineTagRule::new()),
        Arc::new(TrailingWhitespaceRule::new()),
    ]
}
