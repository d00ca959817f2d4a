//! Trailing whitespace removal
//!
//! Blanks horizontal whitespace lexemes that sit immediately before a newline
//! or at the end of the file. This is a content-only rewrite: the emptied
//! lexeme contributes nothing at serialization and the next tokenization pass
//! never recreates it.
//!
//! Whitespace inside comment or string lexemes is part of their content and is
//! not touched here.

use crate::fixer::error::RuleError;
use crate::fixer::lexing::LexemeKind;
use crate::fixer::rules::{FileContext, Rule};
use crate::fixer::stream::TokenStream;

/// Removes trailing horizontal whitespace at line ends.
pub struct TrailingWhitespaceRule;

impl TrailingWhitespaceRule {
    /// Create the rule.
    pub fn new() -> Self {
        TrailingWhitespaceRule
    }
}

impl Default for TrailingWhitespaceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for TrailingWhitespaceRule {
    fn name(&self) -> &'static str {
        "trailing_whitespace"
    }

    fn description(&self) -> &'static str {
        "Remove trailing horizontal whitespace at the end of lines."
    }

    fn is_candidate(&self, stream: &TokenStream) -> bool {
        stream.is_kind_found(LexemeKind::Whitespace)
    }

    fn apply(&self, _file: &FileContext, stream: &mut TokenStream) -> Result<(), RuleError> {
        for index in 0..stream.len() {
            if !stream[index].is_kind(LexemeKind::Whitespace) {
                continue;
            }
            if stream[index].content().is_empty() {
                continue;
            }

            let at_line_end = match stream.get(index + 1) {
                Some(next) => next.is_kind(LexemeKind::Newline),
                None => true,
            };
            if at_line_end {
                stream.set_content(index, String::new());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixer::lexing::{serialize, tokenize};

    fn fix(source: &str) -> String {
        let mut stream = tokenize(source).expect("lexing is total");
        let rule = TrailingWhitespaceRule::new();
        let file = FileContext::new("sample.src");
        if rule.is_candidate(&stream) {
            rule.apply(&file, &mut stream).expect("rule is infallible");
        }
        serialize(&stream)
    }

    #[test]
    fn test_trailing_spaces_removed() {
        assert_eq!(fix("a  \nb\t\n"), "a\nb\n");
    }

    #[test]
    fn test_trailing_whitespace_at_eof_removed() {
        assert_eq!(fix("a   "), "a");
    }

    #[test]
    fn test_interior_whitespace_preserved() {
        assert_eq!(fix("a b\n  c d\n"), "a b\n  c d\n");
    }

    #[test]
    fn test_whitespace_inside_comments_untouched() {
        // The comment body is one lexeme; its inner spacing is not this
        // rule's business
        assert_eq!(fix("/** a  \n * b */\n"), "/** a  \n * b */\n");
    }

    #[test]
    fn test_no_whitespace_means_no_candidacy() {
        let stream = tokenize("a\nb\n").expect("lexing is total");
        assert!(!TrailingWhitespaceRule::new().is_candidate(&stream));
    }

    #[test]
    fn test_idempotent_within_a_pass() {
        let mut stream = tokenize("a  \n").expect("lexing is total");
        let rule = TrailingWhitespaceRule::new();
        let file = FileContext::new("sample.src");
        rule.apply(&file, &mut stream).expect("rule is infallible");
        rule.apply(&file, &mut stream).expect("rule is infallible");
        assert_eq!(serialize(&stream), "a\n");
    }
}
