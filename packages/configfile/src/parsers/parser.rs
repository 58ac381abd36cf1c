//! Element parser trait definition.

use roxmltree::Node;

use super::types::{ConfigData, ParseContext, ParserKind};
use crate::error::Result;

/// Trait for element parsers.
///
/// A parser decides whether it can flatten a subtree and, if so, writes the
/// resulting entries into the shared result map. Parsers are consulted in
/// registration order and the first one whose [`can_parse`] returns `true`
/// owns the subtree.
///
/// [`can_parse`]: ElementParser::can_parse
pub trait ElementParser: Send + Sync {
    /// Return the classification of this parser.
    fn kind(&self) -> ParserKind;

    /// Check if this parser can process the given element.
    fn can_parse(&self, node: Node<'_, '_>) -> bool;

    /// Flatten the element into `results`.
    ///
    /// Implementations must return without side effects when
    /// [`can_parse`](ElementParser::can_parse) is `false`, and must leave
    /// `context` at the depth they found it, whether they succeed or fail.
    ///
    /// # Arguments
    /// * `node` - The XML element to process
    /// * `context` - Ancestor path and diagnostic sink
    /// * `results` - The map being built
    ///
    /// # Errors
    /// Returns an error for conditions that must abort the whole parse.
    fn parse(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext,
        results: &mut ConfigData,
    ) -> Result<()>;
}
