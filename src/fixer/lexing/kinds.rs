//! Lexeme kind definitions
//!
//! This module defines the closed set of lexeme kinds produced by the tokenizer.
//! The kinds are defined using the logos derive macro, so the enumeration is the
//! lexer definition: each variant carries the pattern that produces it.
//!
//! The set is deliberately lexical, not grammatical. Rules gate their candidacy
//! on kind presence (`TokenStream::is_kind_found`), so the kinds are chosen to
//! make those checks cheap and meaningful: documentation comments are separated
//! from plain block comments, whitespace from newlines, and everything the other
//! patterns do not claim becomes a single-character `Symbol`. The catch-all makes
//! tokenization total: no input can fail to lex or drop bytes.

use logos::Logos;
use serde::{Deserialize, Serialize};

/// All lexeme kinds the tokenizer can produce.
///
/// The enumeration is process-wide and immutable; kinds are `Copy` and shared
/// freely between the tokenizer, the stream, and rules on any thread.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexemeKind {
    /// Documentation block comment: `/** ... */`
    #[regex(r"/\*\*[^*]*\*+(?:[^/*][^*]*\*+)*/", priority = 10)]
    DocComment,

    /// Plain block comment: `/* ... */`
    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/", priority = 9)]
    BlockComment,

    /// Line comment: `// ...` or `# ...`, up to but excluding the newline
    #[regex(r"(?://|#)[^\n]*", priority = 8)]
    LineComment,

    /// Horizontal whitespace (spaces and tabs, excluding newlines)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line break (`\n`, or `\r\n` as one lexeme)
    #[regex(r"\r?\n")]
    Newline,

    /// Identifier or keyword
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// Integer or decimal literal
    #[regex(r"[0-9]+(?:\.[0-9]+)?")]
    Number,

    /// Single- or double-quoted string literal on one line
    #[regex(r#""(?:[^"\\\n]|\\[^\n])*""#)]
    #[regex(r"'(?:[^'\\\n]|\\[^\n])*'")]
    StringLiteral,

    /// Any single character not claimed by another pattern.
    ///
    /// This includes operators, punctuation, unterminated comment or string
    /// openers, and arbitrary non-ASCII text. Priority 1 keeps it below every
    /// other pattern so it only wins when nothing else matches.
    #[regex(r".", priority = 1)]
    Symbol,
}

impl LexemeKind {
    /// Check if this kind is a comment of any flavor
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            LexemeKind::DocComment | LexemeKind::BlockComment | LexemeKind::LineComment
        )
    }

    /// Check if this kind is whitespace (including newlines)
    pub fn is_whitespace(&self) -> bool {
        matches!(self, LexemeKind::Whitespace | LexemeKind::Newline)
    }
}
