//! Main module for the lexfix engine

pub mod config;
pub mod engine;
pub mod error;
pub mod lexing;
pub mod processor;
pub mod registry;
pub mod rules;
pub mod stream;

pub use config::FixerConfig;
pub use engine::{FileContext, FixOutcome, FixerEngine};
pub use error::{FixError, RegistryError, RuleError, TokenizeError};
pub use lexing::{serialize, tokenize, Lexeme, LexemeKind};
pub use processor::{FileReport, Processor, ProcessorMode};
pub use registry::RuleRegistry;
pub use rules::{Rule, RuleConstraints};
pub use stream::TokenStream;
