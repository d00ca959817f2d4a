//! Lexing layer: lexeme kinds, tokenization, and serialization
//!
//! This layer turns raw source text into the flat lexeme sequence the fixer
//! pipeline operates on, and turns an edited sequence back into text. Lexing is
//! total: every byte of the input lands in exactly one lexeme, so serializing a
//! freshly tokenized stream reproduces the input exactly. Rules depend on that
//! invariant; the engine compares serialized text byte-for-byte to decide
//! whether a pass changed anything.
//!
//! This is NOT a parser. Lexemes carry a kind and a span but no grammar
//! structure; anything the kind patterns do not claim falls through to the
//! single-character catch-all kind.

pub mod kinds;
pub mod lexeme;
pub mod serializer;
pub mod tokenizer;

pub use kinds::LexemeKind;
pub use lexeme::Lexeme;
pub use serializer::serialize;
pub use tokenizer::tokenize;
