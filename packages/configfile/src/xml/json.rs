//! Element to JSON conversion.
//!
//! Elements become `{"name": content}`. Attributes are prefixed with `@`,
//! text next to attributes or child elements is stored under `#text`, and
//! repeated child names collapse into an array. A self-closing element with
//! no attributes is `null`, an empty open/close pair is `""`, and one with
//! only text is that string. Comments are dropped.

use roxmltree::Node;
use serde_json::{Map, Value};

use super::utils::{get_tag_name, outer_xml};
use crate::error::Result;

/// Marker prepended to attribute names in the JSON form.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Member name holding text content alongside attributes or children.
pub const TEXT_MEMBER: &str = "#text";

/// Convert an element (including its name) to a JSON object.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use configfile::xml::element_to_json;
///
/// let doc = Document::parse(r#"<app endpoint="https://test.com/"/>"#).unwrap();
/// let json = element_to_json(doc.root_element());
/// assert_eq!(json["app"]["@endpoint"], "https://test.com/");
/// ```
pub fn element_to_json(node: Node<'_, '_>) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(get_tag_name(node).to_string(), element_content(node));
    Value::Object(wrapper)
}

/// Serialize an element to its compact JSON string form.
pub fn serialize_element(node: Node<'_, '_>) -> Result<String> {
    Ok(serde_json::to_string(&element_to_json(node))?)
}

fn element_content(node: Node<'_, '_>) -> Value {
    let text = collect_text(node);
    let mut members = Map::new();

    for attribute in node.attributes() {
        members.insert(
            format!("{ATTRIBUTE_PREFIX}{}", attribute.name()),
            Value::String(attribute.value().to_string()),
        );
    }

    for child in node.children().filter(|c| c.is_element()) {
        let name = get_tag_name(child).to_string();
        let content = element_content(child);

        match members.get_mut(&name) {
            Some(Value::Array(items)) => items.push(content),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, content]);
            }
            None => {
                members.insert(name, content);
            }
        }
    }

    if members.is_empty() {
        return match text {
            Some(text) => Value::String(text),
            None if is_self_closing(node) => Value::Null,
            None => Value::String(String::new()),
        };
    }

    if let Some(text) = text {
        members.insert(TEXT_MEMBER.to_string(), Value::String(text));
    }

    Value::Object(members)
}

/// `<a/>` as opposed to `<a></a>`.
fn is_self_closing(node: Node<'_, '_>) -> bool {
    outer_xml(node).ends_with("/>")
}

/// Concatenated direct text children, ignoring whitespace-only runs.
fn collect_text(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .filter(|t| !t.trim().is_empty())
        .collect();

    (!text.is_empty()).then_some(text)
}
