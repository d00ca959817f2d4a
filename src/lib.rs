//! # lexfix
//!
//! A fixed-point token-stream fixer engine for source formatting tools.
//!
//! The engine tokenizes a source file into a [TokenStream](fixer::stream::TokenStream),
//! screens a registered set of fixer rules for candidacy, applies the candidates in a
//! deterministic, constraint-consistent order, and repeats the whole pass until the
//! serialized text reaches a fixed point (or an iteration cap is hit).
//!
//! ## Testing
//!
//! Core invariants (lossless round-trip, idempotence, ordering determinism, the
//! convergence bound) are covered by integration tests under `tests/`; per-module
//! behavior is covered by inline `#[cfg(test)]` modules.

pub mod fixer;
