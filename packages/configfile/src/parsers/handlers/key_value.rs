//! Parser for `<add>`/`<remove>` key/value elements.
//!
//! Handles the classic `.config` collection shape:
//!
//! ```xml
//! <configuration>
//!   <nodea>
//!     <add key="TheKey" value="TheValue" />
//!   </nodea>
//!   <nodeb>
//!     <nested>
//!       <add key="NestedKey" value="ValueA" />
//!       <add key="NestedKey2" value="ValueB" />
//!       <remove key="SomeTestKey" />
//!     </nested>
//!   </nodeb>
//! </configuration>
//! ```
//!
//! which flattens to `nodea:TheKey`, `nodeb:nested:NestedKey` and
//! `nodeb:nested:NestedKey2`. The key and value attribute names are
//! configurable, so a second instance can read `<connectionStrings>`
//! entries keyed by `name` with the value in `connectionString`.

use std::collections::btree_map::Entry;

use roxmltree::Node;

use crate::config::{
    validate_attribute_name, CONNECTION_STRING_KEY_ATTRIBUTE, CONNECTION_STRING_VALUE_ATTRIBUTE,
    DEFAULT_KEY_ATTRIBUTE, DEFAULT_VALUE_ATTRIBUTE, KEY_VALUE_UNSUPPORTED_ELEMENTS,
};
use crate::error::Result;
use crate::parsers::parser::ElementParser;
use crate::parsers::types::{ConfigData, ConfigurationAction, ParseContext, ParserKind};
use crate::xml::{
    element_children, get_attribute, get_tag_name, has_element_children, outer_xml, subtree_any,
};

/// Parser for elements whose subtree holds `<add>`/`<remove>` actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueParser {
    key_name: String,
    value_name: String,
}

impl KeyValueParser {
    /// Create a parser reading `key` and `value` attributes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_name: DEFAULT_KEY_ATTRIBUTE.to_string(),
            value_name: DEFAULT_VALUE_ATTRIBUTE.to_string(),
        }
    }

    /// Create a parser reading `<connectionStrings>` style entries.
    #[must_use]
    pub fn connection_strings() -> Self {
        Self {
            key_name: CONNECTION_STRING_KEY_ATTRIBUTE.to_string(),
            value_name: CONNECTION_STRING_VALUE_ATTRIBUTE.to_string(),
        }
    }

    /// Create a parser with custom key and value attribute names.
    ///
    /// # Errors
    /// Returns `InvalidAttributeName` if either name is not a plain XML name.
    pub fn with_attributes(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_name = key.into();
        let value_name = value.into();
        validate_attribute_name(&key_name)?;
        validate_attribute_name(&value_name)?;
        Ok(Self {
            key_name,
            value_name,
        })
    }

    /// Name of the attribute holding the entry key.
    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Name of the attribute holding the entry value.
    #[must_use]
    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    /// Process a child that passed the action filter.
    fn visit(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext,
        results: &mut ConfigData,
    ) -> Result<()> {
        if has_element_children(node) {
            self.parse(node, context, results)
        } else {
            self.record(node, context, results)
        }
    }

    /// Visit every child whose subtree holds an action; warn about the rest.
    fn parse_children(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext,
        results: &mut ConfigData,
    ) -> Result<()> {
        for child in element_children(node) {
            let has_action =
                subtree_any(child, |n| ConfigurationAction::is_keyword(get_tag_name(n)));

            if !has_action {
                context.warn(format!(
                    "Contains an unsupported config element. [{}]",
                    outer_xml(child)
                ));
                continue;
            }

            self.visit(child, context, results)?;
        }
        Ok(())
    }

    /// Apply a leaf `<add>`/`<remove>` element to the result map.
    ///
    /// Leaves named anything else are skipped with an info diagnostic.
    fn record(
        &self,
        node: Node<'_, '_>,
        context: &mut ParseContext,
        results: &mut ConfigData,
    ) -> Result<()> {
        let Ok(action) = get_tag_name(node).parse::<ConfigurationAction>() else {
            context.info(format!(
                "Element with an unsupported action. [{}]",
                outer_xml(node)
            ));
            return Ok(());
        };

        let Some(key) = get_attribute(node, &self.key_name) else {
            context.info(format!(
                "[{}] is not supported because it does not have an attribute with {}",
                outer_xml(node),
                self.key_name
            ));
            return Ok(());
        };

        let full_key = context.key(key);

        match action {
            ConfigurationAction::Add => {
                let value = get_attribute(node, &self.value_name).map(str::to_string);
                if value.is_none() {
                    context.warn(format!(
                        "Could not parse the value attribute [{}] from [{}]. Using null as value...",
                        self.value_name,
                        outer_xml(node)
                    ));
                }

                match results.entry(full_key) {
                    Entry::Occupied(mut entry) => {
                        context.warn(format!(
                            "{} exists. Replacing existing value [{}] with {}",
                            entry.key(),
                            entry.get().as_deref().unwrap_or("null"),
                            value.as_deref().unwrap_or("null")
                        ));
                        entry.insert(value);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(value);
                    }
                }
            }
            ConfigurationAction::Remove => {
                results.remove(&full_key);
            }
        }

        Ok(())
    }
}

impl Default for KeyValueParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementParser for KeyValueParser {
    fn kind(&self) -> ParserKind {
        ParserKind::KeyValue
    }

    fn can_parse(&self, node: Node<'_, '_>) -> bool {
        !KEY_VALUE_UNSUPPORTED_ELEMENTS.contains(&get_tag_name(node))
            && subtree_any(node, |n| n.has_attribute(self.key_name.as_str()))
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

        // Flat documents put the action directly under the root
        if !has_element_children(node) {
            return self.record(node, context, results);
        }

        context.push(get_tag_name(node));
        let outcome = self.parse_children(node, context, results);
        context.pop();
        outcome
    }
}
