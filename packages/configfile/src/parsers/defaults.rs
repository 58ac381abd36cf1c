//! Default parser chain for `.config` documents.

use super::chain::ParserChain;
use super::handlers::{KeyValueParser, SubtreeParser};

/// Create the default parser chain.
///
/// Order matters, the first parser accepting a top-level section owns it:
/// 1. `<add key value>` collections (`appSettings` and custom sections)
/// 2. `<add name connectionString>` collections (`connectionStrings`)
/// 3. everything else that is not framework-reserved, serialized per leaf
#[must_use]
pub fn create_default_chain() -> ParserChain {
    ParserChain::new()
        .with(KeyValueParser::new())
        .with(KeyValueParser::connection_strings())
        .with(SubtreeParser::new())
}
