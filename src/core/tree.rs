//! Generic nested value tree produced by a markup reader.
//!
//! A [`Node`] is a map, an ordered sequence, or a scalar leaf. Element
//! attributes live in the owning map under keys prefixed with
//! [`ATTR_PREFIX`]; an element that has both attributes and text keeps the
//! text under [`TEXT_KEY`]. Repeated sibling elements collapse into a
//! [`Node::Seq`], so any field may be absent, a single node, or a sequence.
//!
//! All accessors here are total: a missing key, a non-map intermediate, or an
//! absent node yields `None` (or an empty string / empty list), never a panic.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rust_decimal::Decimal;

/// Reserved key holding the text content of an element that also has attributes.
pub const TEXT_KEY: &str = "#text";

/// Prefix distinguishing attribute keys from child-element keys.
pub const ATTR_PREFIX: &str = "@_";

/// A read-only node of the parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Text leaf.
    Text(String),
    /// Numeric leaf (only emitted by producers that type their scalars).
    Number(Decimal),
    /// Element with children and/or attributes.
    Map(NodeMap),
    /// Repeated element, in document order.
    Seq(Vec<Node>),
}

/// Ordered map with unique keys. Keeps document order so that the first
/// top-level element of a document is well defined. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMap {
    entries: IndexMap<String, Node>,
}

impl NodeMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Insert or replace `key`. A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    /// Insert a child element, turning a second occurrence of `key` into a
    /// sequence and appending further occurrences to it.
    pub fn push_repeated(&mut self, key: impl Into<String>, node: Node) {
        match self.entries.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Node::Seq(items) => items.push(node),
                existing => {
                    let first = std::mem::replace(existing, Node::Seq(Vec::with_capacity(2)));
                    if let Node::Seq(items) = existing {
                        items.push(first);
                        items.push(node);
                    }
                }
            },
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Node)> for NodeMap {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        let mut map = NodeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Node {
    /// Shorthand for a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Child element `key`, if this node is a map that has it.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map()?.get(key)
    }

    /// Descend one key at a time; `None` as soon as a step cannot be taken.
    pub fn path(&self, keys: &[&str]) -> Option<&Node> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Attribute `name` (stored as `@_name`).
    pub fn attr(&self, name: &str) -> Option<&Node> {
        self.as_map()?.iter().find_map(|(k, v)| {
            (k.strip_prefix(ATTR_PREFIX) == Some(name)).then_some(v)
        })
    }

    /// Coerced text of the node at `keys` below this one.
    pub fn text_at(&self, keys: &[&str]) -> String {
        text_of(self.path(keys))
    }
}

/// [`Node::path`] starting from a possibly absent node.
pub fn lookup<'a>(node: Option<&'a Node>, keys: &[&str]) -> Option<&'a Node> {
    node?.path(keys)
}

/// Trimmed text of a node, whatever leaf shape the reader produced.
///
/// Absent → `""`; text → trimmed; number → its plain decimal form;
/// map with [`TEXT_KEY`] → that value, trimmed; anything else → `""`.
pub fn text_of(node: Option<&Node>) -> String {
    match node {
        Some(Node::Text(s)) => s.trim().to_string(),
        Some(Node::Number(n)) => n.normalize().to_string(),
        Some(Node::Map(map)) => match map.get(TEXT_KEY) {
            Some(Node::Text(s)) => s.trim().to_string(),
            Some(Node::Number(n)) => n.normalize().to_string(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Normalize a field that may be absent, a single node, or a sequence into
/// an ordered list.
pub fn as_sequence(node: Option<&Node>) -> Vec<&Node> {
    match node {
        None => Vec::new(),
        Some(Node::Seq(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}
