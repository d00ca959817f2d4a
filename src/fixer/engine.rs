//! Fixer engine: the per-file fixed-point scheduler
//!
//! One pass tokenizes the file, screens every rule in the resolved order for
//! candidacy, and applies the candidates to the same stream, so later rules
//! observe earlier rules' edits. After the pass the stream is serialized and
//! byte-compared against the pre-pass text: equal means the file converged;
//! different means the new text is re-tokenized and the whole pass repeats, up
//! to an iteration cap.
//!
//! Rules are written independently and one rule's output can expose another
//! rule's input (a whitespace rewrite revealing a tag spelling, say), so a
//! single linear pass is insufficient; the fixed point is the correctness
//! contract callers depend on. The cap, in turn, defends against a
//! non-idempotent or mutually re-triggering rule pair oscillating forever:
//! hitting it yields the last computed text flagged as non-converged, a
//! reportable anomaly rather than a crash.
//!
//! The engine holds no per-file state. Fixing one file is pure with respect to
//! every other file, which is what lets the processor run files on a parallel
//! worker pool sharing one engine by reference.

use crate::fixer::config::FixerConfig;
use crate::fixer::error::{FixError, RegistryError};
use crate::fixer::lexing::{serialize, tokenize};
use crate::fixer::registry::RuleRegistry;
use crate::fixer::rules::Rule;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub use crate::fixer::rules::FileContext;

/// Result of fixing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The final text: the fixed point, or the best effort at the cap
    pub text: String,
    /// Whether the final text differs from the input
    pub changed: bool,
    /// Number of passes executed, the final (no-change) pass included
    pub passes: usize,
    /// Whether a fixed point was reached within the pass cap
    pub converged: bool,
}

/// Applies an ordered ruleset to files until each reaches a fixed point.
///
/// Immutable after construction; the resolved rule order is computed once and
/// shared by reference across worker threads.
pub struct FixerEngine {
    rules: Vec<Arc<dyn Rule>>,
    max_passes: usize,
}

impl FixerEngine {
    /// Build an engine from a registry and configuration.
    ///
    /// Resolves the enabled subset into a total order; any resolution failure
    /// is fatal here, before a single file is touched.
    pub fn from_registry(
        registry: &RuleRegistry,
        config: &FixerConfig,
    ) -> Result<Self, RegistryError> {
        let rules = registry.resolve(config.rules.as_deref())?;
        Ok(FixerEngine {
            rules,
            max_passes: config.max_passes,
        })
    }

    /// Build an engine directly from an ordered ruleset.
    ///
    /// The caller vouches for the order; intended for tests and embedders that
    /// manage their own registry.
    pub fn with_rules(rules: Vec<Arc<dyn Rule>>, max_passes: usize) -> Self {
        FixerEngine { rules, max_passes }
    }

    /// The rules in the order they run.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// The pass cap.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Fix one file's text to a fixed point.
    ///
    /// `file` is identity context for the rules only; it never affects
    /// tokenization. Errors abort this file alone: the caller decides whether
    /// other files continue.
    pub fn fix_text(&self, file: &FileContext, source: &str) -> Result<FixOutcome, FixError> {
        let mut current = source.to_string();
        let mut passes = 0;

        while passes < self.max_passes {
            passes += 1;
            let mut stream = tokenize(&current)?;

            for rule in &self.rules {
                // A structural edit invalidated offsets; rebuild before the
                // next rule observes the stream
                if stream.is_structure_dirty() {
                    let text = serialize(&stream);
                    stream = tokenize(&text)?;
                }

                if rule.is_candidate(&stream) {
                    trace!(rule = rule.name(), pass = passes, "applying rule");
                    rule.apply(file, &mut stream)
                        .map_err(|rule_error| FixError::Rule {
                            rule: rule.name().to_string(),
                            source: rule_error,
                        })?;
                }
            }

            let after = serialize(&stream);
            if after == current {
                debug!(
                    path = %file.path().display(),
                    passes,
                    changed = (current != source),
                    "converged"
                );
                return Ok(FixOutcome {
                    changed: current != source,
                    text: current,
                    passes,
                    converged: true,
                });
            }
            current = after;
        }

        warn!(
            path = %file.path().display(),
            max_passes = self.max_passes,
            "no fixed point within the pass cap; returning best-effort text"
        );
        Ok(FixOutcome {
            changed: current != source,
            text: current,
            passes,
            converged: false,
        })
    }
}
