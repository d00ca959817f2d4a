//! Property-based round-trip tests for the tokenizer
//!
//! Serialization of a freshly tokenized stream must reproduce the input
//! byte-for-byte for ANY input, malformed input included. The whole engine
//! leans on this: pass-to-pass change detection is a byte comparison of
//! serialized text.

use lexfix::fixer::{serialize, tokenize, LexemeKind};
use proptest::prelude::*;

fn assert_roundtrip(source: &str) {
    let stream = tokenize(source).expect("lexing is total");
    assert_eq!(serialize(&stream), source);
}

#[test]
fn test_roundtrip_code_samples() {
    assert_roundtrip("");
    assert_roundtrip("fn main() {\n    let x = 1;\n}\n");
    assert_roundtrip("/**\n * Summary.\n * @inheritdoc\n */\nclass Foo {}\n");
    assert_roundtrip("// line\n# hash\n/* block */\n/** doc */");
    assert_roundtrip("\"string with // no comment\" 'and \\' escape'");
    assert_roundtrip("a\r\nb\rc\n");
}

#[test]
fn test_roundtrip_malformed_samples() {
    assert_roundtrip("/* never closed");
    assert_roundtrip("/** almost closed *");
    assert_roundtrip("\"unterminated");
    assert_roundtrip("'\\");
    assert_roundtrip("@{{{}}}@");
}

#[test]
fn test_roundtrip_non_utf8_boundary_free_text() {
    assert_roundtrip("héllo wörld → ∑ 漢字\n");
    assert_roundtrip("emoji 🦀 in source");
}

#[test]
fn test_spans_partition_the_input() {
    let source = "/** d */ let x = \"s\"; // c\n";
    let stream = tokenize(source).expect("lexing is total");

    let mut expected_start = 0;
    for lexeme in stream.iter() {
        assert_eq!(lexeme.span().start, expected_start);
        assert_eq!(&source[lexeme.span()], lexeme.content());
        expected_start = lexeme.span().end;
    }
    assert_eq!(expected_start, source.len());
}

#[test]
fn test_kind_presence_matches_lexemes() {
    let source = "/** d */ x 1 \"s\"\n";
    let stream = tokenize(source).expect("lexing is total");

    for kind in [
        LexemeKind::DocComment,
        LexemeKind::Identifier,
        LexemeKind::Number,
        LexemeKind::StringLiteral,
        LexemeKind::Whitespace,
        LexemeKind::Newline,
    ] {
        assert!(stream.is_kind_found(kind), "expected {kind:?} present");
    }
    assert!(!stream.is_kind_found(LexemeKind::BlockComment));
    assert!(!stream.is_kind_found(LexemeKind::LineComment));
}

proptest! {
    #[test]
    fn prop_roundtrip_arbitrary_input(source in any::<String>()) {
        assert_roundtrip(&source);
    }

    #[test]
    fn prop_roundtrip_source_like_input(
        source in r"([a-zA-Z_0-9 \t\n{}@*/\\'\x22#.-]|\r\n){0,200}"
    ) {
        assert_roundtrip(&source);
    }

    #[test]
    fn prop_tokenization_never_fails(source in any::<String>()) {
        prop_assert!(tokenize(&source).is_ok());
    }
}
