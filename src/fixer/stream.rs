//! Token stream representation for the fixer pipeline
//!
//! This module provides the single data structure every rule operates on: an
//! ordered, mutable sequence of [Lexeme]s covering exactly one file. The stream
//! is the standard input and output of each fixing pass.
//!
//! # Design
//!
//! 1. **Kind index**: kind presence is precomputed once at construction, so the
//!    candidacy screen every rule runs (`is_kind_found`) is O(1) regardless of
//!    file size or rule count.
//! 2. **Content rewrites are cheap**: rules rewrite lexeme contents in place;
//!    the stream only records that it is dirty. Spans and the kind index are
//!    snapshots of the last tokenization and go stale the moment content
//!    changes; the engine re-tokenizes between passes, never the stream.
//! 3. **Structural edits are expensive**: inserting or removing lexemes marks
//!    the stream structurally dirty. Offsets are not renumbered eagerly;
//!    instead the engine discards the stream and re-tokenizes the serialized
//!    text before the next rule runs.
//!
//! The stream is created fresh by [tokenize](crate::fixer::lexing::tokenize)
//! each pass and discarded at the end of it.

use crate::fixer::lexing::kinds::LexemeKind;
use crate::fixer::lexing::lexeme::Lexeme;
use std::collections::HashSet;
use std::ops::Index;

/// An ordered, mutable sequence of lexemes for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    lexemes: Vec<Lexeme>,
    kinds_present: HashSet<LexemeKind>,
    content_dirty: bool,
    structure_dirty: bool,
}

impl TokenStream {
    /// Build a stream from tokenized lexemes, precomputing the kind index.
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        let kinds_present = lexemes.iter().map(Lexeme::kind).collect();
        TokenStream {
            lexemes,
            kinds_present,
            content_dirty: false,
            structure_dirty: false,
        }
    }

    /// The lexemes in document order.
    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    /// Number of lexemes in the stream.
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    /// Check whether the stream holds no lexemes.
    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    /// Get a lexeme by position.
    pub fn get(&self, index: usize) -> Option<&Lexeme> {
        self.lexemes.get(index)
    }

    /// Iterate over the lexemes in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Lexeme> {
        self.lexemes.iter()
    }

    /// Check whether any lexeme of the given kind exists.
    ///
    /// This is the candidacy screen: it is answered from the index computed at
    /// tokenization time, so thousands of rules can be screened per file
    /// without scanning content. Like spans, the answer reflects the last
    /// tokenization, not intervening content rewrites.
    pub fn is_kind_found(&self, kind: LexemeKind) -> bool {
        self.kinds_present.contains(&kind)
    }

    /// Iterate over `(position, lexeme)` pairs of a single kind.
    pub fn lexemes_of_kind(
        &self,
        kind: LexemeKind,
    ) -> impl Iterator<Item = (usize, &Lexeme)> + '_ {
        self.lexemes
            .iter()
            .enumerate()
            .filter(move |(_, lexeme)| lexeme.kind() == kind)
    }

    /// Rewrite the content of the lexeme at `index` in place.
    ///
    /// Marks the stream content-dirty; the lexeme's kind and span (and those of
    /// all following lexemes) are stale until the next tokenization.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    pub fn set_content(&mut self, index: usize, content: String) {
        self.lexemes[index].set_content(content);
        self.content_dirty = true;
    }

    /// Insert a lexeme at `index`, shifting the rest right.
    ///
    /// Structural edit: offsets are not renumbered; the stream must be
    /// re-tokenized before another rule consumes it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, lexeme: Lexeme) {
        self.lexemes.insert(index, lexeme);
        self.structure_dirty = true;
    }

    /// Remove and return the lexeme at `index`.
    ///
    /// Structural edit: offsets are not renumbered; the stream must be
    /// re-tokenized before another rule consumes it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Lexeme {
        self.structure_dirty = true;
        self.lexemes.remove(index)
    }

    /// True if any content rewrite happened since tokenization.
    pub fn is_content_dirty(&self) -> bool {
        self.content_dirty
    }

    /// True if any structural edit happened since tokenization; the engine must
    /// re-tokenize before running another rule.
    pub fn is_structure_dirty(&self) -> bool {
        self.structure_dirty
    }
}

impl Index<usize> for TokenStream {
    type Output = Lexeme;

    fn index(&self, index: usize) -> &Lexeme {
        &self.lexemes[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Lexeme;
    type IntoIter = std::slice::Iter<'a, Lexeme>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
