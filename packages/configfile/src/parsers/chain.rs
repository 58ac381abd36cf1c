//! Ordered chain of element parsers.

use std::fmt;
use std::sync::Arc;

use roxmltree::Node;

use super::parser::ElementParser;
use super::types::ParserKind;

/// Ordered list of parsers with first-match dispatch.
///
/// Registration order is precedence: [`find`](ParserChain::find) returns the
/// first parser whose `can_parse` accepts the element, and no later parser
/// sees that subtree. Parsers are reference counted so a chain can be cloned
/// into several providers.
#[derive(Clone, Default)]
pub struct ParserChain {
    parsers: Vec<Arc<dyn ElementParser>>,
}

impl ParserChain {
    /// Create a new empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Append a parser after all registered ones.
    pub fn register(&mut self, parser: impl ElementParser + 'static) {
        self.parsers.push(Arc::new(parser));
    }

    /// Append an already shared parser.
    pub fn register_shared(&mut self, parser: Arc<dyn ElementParser>) {
        self.parsers.push(parser);
    }

    /// Builder-style variant of [`register`](ParserChain::register).
    #[must_use]
    pub fn with(mut self, parser: impl ElementParser + 'static) -> Self {
        self.register(parser);
        self
    }

    /// Get the first parser that accepts the element.
    ///
    /// Returns `None` if no registered parser can handle it.
    #[must_use]
    pub fn find(&self, node: Node<'_, '_>) -> Option<&dyn ElementParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(node))
            .map(|p| p.as_ref())
    }

    /// Number of registered parsers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Check whether no parser is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Kinds of the registered parsers, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<ParserKind> {
        self.parsers.iter().map(|p| p.kind()).collect()
    }
}

impl fmt::Debug for ParserChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserChain")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl Extend<Arc<dyn ElementParser>> for ParserChain {
    fn extend<T: IntoIterator<Item = Arc<dyn ElementParser>>>(&mut self, iter: T) {
        self.parsers.extend(iter);
    }
}
