//! XML helpers shared by the element parsers.

mod json;
mod utils;

pub use json::{element_to_json, serialize_element, ATTRIBUTE_PREFIX, TEXT_MEMBER};
pub use utils::{
    element_children, get_attribute, get_tag_name, has_element_children, outer_xml,
    subtree_any,
};
