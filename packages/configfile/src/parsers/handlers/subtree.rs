//! Parser that captures leaf elements as serialized JSON blobs.
//!
//! Used for application sections that are read back as whole objects
//! rather than field by field. For
//!
//! ```xml
//! <alexis>
//!   <app endpoint="https://test.com/" />
//! </alexis>
//! ```
//!
//! the entry `alexis:app` holds `{"app":{"@endpoint":"https://test.com/"}}`.

use std::collections::btree_map::Entry;

use roxmltree::Node;

use crate::config::SUBTREE_UNSUPPORTED_ELEMENTS;
use crate::error::{ConfigFileError, Result};
use crate::parsers::parser::ElementParser;
use crate::parsers::types::{ConfigData, ParseContext, ParserKind};
use crate::xml::{
    element_children, get_tag_name, has_element_children, outer_xml, serialize_element,
    subtree_any,
};

/// Parser serializing each leaf element of a section to JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtreeParser;

impl SubtreeParser {
    /// Create a new subtree parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn is_unsupported(name: &str) -> bool {
        SUBTREE_UNSUPPORTED_ELEMENTS.contains(&name)
    }

    fn parse_children(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext,
        results: &mut ConfigData,
    ) -> Result<()> {
        for child in element_children(node) {
            let has_supported = subtree_any(child, |n| !Self::is_unsupported(get_tag_name(n)));

            if !has_supported {
                context.warn(format!(
                    "Contains an unsupported config element. [{}]",
                    outer_xml(child)
                ));
                continue;
            }

            self.parse(child, context, results)?;
        }
        Ok(())
    }

    fn insert_leaf(
        node: Node<'_, '_>,
        context: &ParseContext,
        results: &mut ConfigData,
    ) -> Result<()> {
        let full_key = context.key(get_tag_name(node));

        match results.entry(full_key) {
            Entry::Occupied(entry) => Err(ConfigFileError::DuplicateKey(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(Some(serialize_element(node)?));
                Ok(())
            }
        }
    }
}

impl ElementParser for SubtreeParser {
    fn kind(&self) -> ParserKind {
        ParserKind::Subtree
    }

    fn can_parse(&self, node: Node<'_, '_>) -> bool {
        !Self::is_unsupported(get_tag_name(node))
    }

    fn parse(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext,
        results: &mut ConfigData,
    ) -> Result<()> {
        if !self.can_parse(node) {
            return Ok(());
        }

        if !has_element_children(node) {
            return Self::insert_leaf(node, context, results);
        }

        context.push(get_tag_name(node));
        let outcome = self.parse_children(node, context, results);
        context.pop();
        outcome
    }
}
