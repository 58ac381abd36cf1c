//! Element parser system for flattening `.config` documents.
//!
//! Parsers implement [`ElementParser`] and are registered on a
//! [`ParserChain`]. The [`FlattenEngine`] hands each top-level section of a
//! document to the first parser in the chain that accepts it.

mod chain;
mod defaults;
mod engine;
pub mod handlers;
mod parser;
mod types;

pub use chain::ParserChain;
pub use defaults::create_default_chain;
pub use engine::FlattenEngine;
pub use handlers::{KeyValueParser, SubtreeParser};
pub use parser::ElementParser;
pub use types::{
    ConfigData, ConfigurationAction, Diagnostic, DiagnosticLevel, FlattenResult, ParseContext,
    ParserKind,
};
