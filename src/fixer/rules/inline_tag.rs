//! Inline tag normalization for documentation comments
//!
//! Rewrites loose inline-tag spellings inside doc comments to the canonical
//! `{@tag text}` form: the `@` moves inside the braces (`@{tag}` becomes
//! `{@tag}`), duplicate braces collapse, whitespace between `{` and `@` and
//! before the closing brace is dropped, a trailing `s` on the tag name is
//! removed, and the tag name is lower-cased. Bare `@inheritdoc` outside braces
//! is additionally made inline.
//!
//! Matching is non-overlapping and left-to-right, case-insensitive on the tag
//! name. The trailing-text capture is non-greedy; since it cannot cross a
//! closing brace either way, nested spellings such as `@{@link}` keep their
//! inner tag and nothing more (see tests).

use crate::fixer::error::RuleError;
use crate::fixer::lexing::LexemeKind;
use crate::fixer::rules::{FileContext, Rule, RuleConstraints};
use crate::fixer::stream::TokenStream;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Loose inline-tag spelling: `@`/`{` in either order with optional duplicate
/// braces and horizontal whitespace, a whitelisted tag name with an optional
/// trailing `s`, arbitrary trailing text, one or more closing braces.
static INLINE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:@\{+|\{+[ \t]*@)[ \t]*(example|id|internal|inheritdoc|link|source|toc|tutorial)s?([^}]*?)\}+",
    )
    .unwrap()
});

/// Bare `@inheritdoc`/`@inheritdocs`; brace enclosure is checked separately
/// because the regex crate has no lookaround.
static BARE_INHERITDOC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)@inheritdocs?").unwrap());

/// Canonicalizes inline tags in documentation comments.
pub struct InlineTagRule;

impl InlineTagRule {
    /// Create the rule; the patterns are compiled once, process-wide.
    pub fn new() -> Self {
        InlineTagRule
    }

    fn rewrite(content: &str) -> String {
        let content = INLINE_TAG.replace_all(content, |caps: &Captures<'_>| {
            let tag = caps[1].to_lowercase();
            let text = caps[2].trim();
            if text.is_empty() {
                format!("{{@{}}}", tag)
            } else {
                format!("{{@{} {}}}", tag, text)
            }
        });
        inline_bare_inheritdoc(&content)
    }
}

impl Default for InlineTagRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for InlineTagRule {
    fn name(&self) -> &'static str {
        "doc_inline_tag"
    }

    fn description(&self) -> &'static str {
        "Fix doc comment inline tags, make inheritdoc always inline."
    }

    fn priority(&self) -> i32 {
        10
    }

    fn constraints(&self) -> RuleConstraints {
        // Content rewrites land before whitespace cleanup
        RuleConstraints::run_before(&["trailing_whitespace"])
    }

    fn is_candidate(&self, stream: &TokenStream) -> bool {
        stream.is_kind_found(LexemeKind::DocComment)
    }

    fn apply(&self, _file: &FileContext, stream: &mut TokenStream) -> Result<(), RuleError> {
        for index in 0..stream.len() {
            if !stream[index].is_kind(LexemeKind::DocComment) {
                continue;
            }

            let rewritten = Self::rewrite(stream[index].content());
            if rewritten != stream[index].content() {
                stream.set_content(index, rewritten);
            }
        }

        Ok(())
    }
}

/// Rewrite every bare `@inheritdoc`/`@inheritdocs` that is not already
/// enclosed (preceded by `{` or followed by `}`) to `{@inheritdoc}`.
fn inline_bare_inheritdoc(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut last = 0;

    for found in BARE_INHERITDOC.find_iter(content) {
        let preceded_by_brace = content[..found.start()].ends_with('{');
        let followed_by_brace = content[found.end()..].starts_with('}');
        if preceded_by_brace || followed_by_brace {
            continue;
        }

        result.push_str(&content[last..found.start()]);
        result.push_str("{@inheritdoc}");
        last = found.end();
    }

    result.push_str(&content[last..]);
    result
}
