//! XML utility functions for navigating and inspecting DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use configfile::xml::get_tag_name;
///
/// let xml = r#"<configuration><appSettings/></configuration>"#;
/// let doc = Document::parse(xml).unwrap();
/// let settings = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(settings), "appSettings");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get an attribute value from a node.
///
/// Returns `None` if the attribute is absent. An attribute that is present
/// but empty yields `Some("")`.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Get all element children of a node.
///
/// Text, comments and processing instructions are excluded.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Check whether a node has at least one element child.
pub fn has_element_children(node: Node<'_, '_>) -> bool {
    element_children(node).next().is_some()
}

/// Check whether the node itself or any descendant element satisfies `predicate`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use configfile::xml::subtree_any;
///
/// let xml = r#"<a><b><add key="k"/></b></a>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert!(subtree_any(doc.root_element(), |n| n.has_attribute("key")));
/// assert!(!subtree_any(doc.root_element(), |n| n.has_attribute("value")));
/// ```
pub fn subtree_any<F>(node: Node<'_, '_>, predicate: F) -> bool
where
    F: FnMut(Node<'_, '_>) -> bool,
{
    node.descendants().filter(|n| n.is_element()).any(predicate)
}

/// The source text of an element, used in diagnostics.
pub fn outer_xml<'a>(node: Node<'a, '_>) -> &'a str {
    let input = node.document().input_text();
    input.get(node.range()).unwrap_or_default()
}
