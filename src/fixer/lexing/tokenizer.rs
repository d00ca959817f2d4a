//! Base tokenization for the fixer pipeline
//!
//! This module produces the initial [TokenStream] from raw source text using
//! the logos lexer. This is the entry point where source strings become lexeme
//! sequences; the engine calls it once per pass and again after any structural
//! edit invalidates offsets.
//!
//! Tokenization is lossless: the concatenated contents of the produced lexemes
//! reconstruct the input exactly, for any input. Rules rely on this when the
//! engine byte-compares serialized passes to detect a fixed point.

use crate::fixer::error::TokenizeError;
use crate::fixer::lexing::kinds::LexemeKind;
use crate::fixer::lexing::lexeme::Lexeme;
use crate::fixer::stream::TokenStream;
use logos::Logos;

/// Tokenize source text into a fresh [TokenStream].
///
/// The catch-all `Symbol` kind makes the lexer total, so this only fails if a
/// pattern set regression leaves a gap in the alphabet; the error carries the
/// byte offset of the first unlexable position so the caller can report it per
/// file without aborting a batch.
pub fn tokenize(source: &str) -> Result<TokenStream, TokenizeError> {
    let mut lexer = LexemeKind::lexer(source);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => lexemes.push(Lexeme::new(kind, source[span.clone()].to_string(), span)),
            Err(()) => return Err(TokenizeError { offset: span.start }),
        }
    }

    Ok(TokenStream::new(lexemes))
}
