//! Built-in element parsers.

mod key_value;
mod subtree;

pub use key_value::KeyValueParser;
pub use subtree::SubtreeParser;
