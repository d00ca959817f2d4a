//! Serializer for edited token streams
//!
//! This module converts a stream of lexemes back into a string. Serialization
//! is the inverse of tokenization: for a freshly tokenized stream the output is
//! byte-identical to the input, and after content rewrites the output is the
//! transformed file text.

use crate::fixer::stream::TokenStream;

/// Serialize a stream back into source text by concatenating lexeme contents.
///
/// Lexemes whose content was rewritten to the empty string contribute nothing;
/// the next tokenization pass simply never recreates them.
pub fn serialize(stream: &TokenStream) -> String {
    let mut result = String::with_capacity(stream.lexemes().iter().map(|l| l.content().len()).sum());
    for lexeme in stream.lexemes() {
        result.push_str(lexeme.content());
    }
    result
}
