//! XML reader producing the generic [`Node`](crate::core::Node) tree.
//!
//! Built on `quick-xml`'s event reader. The tree follows the conventions of
//! common XML-to-object converters:
//!
//! - an element with only text becomes [`Node::Text`](crate::core::Node::Text);
//! - an element with attributes or children becomes a map, attributes keyed
//!   `@_name`, text (if any) under `#text`;
//! - repeated sibling elements become a [`Node::Seq`](crate::core::Node::Seq).
//!
//! Numeric-looking text is kept as text so that codes such as `"01"` keep
//! their leading zeros.

mod reader;

pub use crate::core::ParseOptions;
pub use reader::{parse, parse_with};
