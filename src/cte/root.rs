use tracing::debug;

use crate::core::{CteError, Node};

/// Wrapper shape under which the business root (`infCte`) was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootShape {
    /// `cteProc/CTe/infCte`: authorized document with its protocol.
    Processed,
    /// `CTe/infCte`: bare signed document.
    Plain,
    /// `<first key>/CTe/infCte`: unknown envelope around a `CTe`.
    Enveloped(String),
    /// `<first key>/infCte`: unknown element standing in for `CTe`.
    Renamed(String),
}

const PROCESSED_PATH: &[&str] = &["cteProc", "CTe", "infCte"];
const PLAIN_PATH: &[&str] = &["CTe", "infCte"];

/// Locate `infCte`, trying each known wrapper shape in a fixed order.
///
/// The first top-level key used by the last two shapes skips
/// processing-instruction entries such as `?xml`. JSON converters emit the
/// XML declaration as such a key ahead of the document element; the XML
/// reader never produces one.
pub fn resolve_root(tree: &Node) -> Result<(RootShape, &Node), CteError> {
    let found = found_map(tree.path(PROCESSED_PATH))
        .map(|n| (RootShape::Processed, n))
        .or_else(|| found_map(tree.path(PLAIN_PATH)).map(|n| (RootShape::Plain, n)))
        .or_else(|| {
            let (key, wrapper) = first_element(tree)?;
            found_map(wrapper.path(PLAIN_PATH))
                .map(|n| (RootShape::Enveloped(key.to_string()), n))
                .or_else(|| {
                    found_map(wrapper.get("infCte")).map(|n| (RootShape::Renamed(key.to_string()), n))
                })
        });

    match found {
        Some((shape, node)) => {
            debug!(?shape, "resolved CT-e root");
            Ok((shape, node))
        }
        None => Err(CteError::RootNotFound),
    }
}

fn found_map(node: Option<&Node>) -> Option<&Node> {
    node.filter(|n| n.as_map().is_some())
}

fn first_element(tree: &Node) -> Option<(&str, &Node)> {
    tree.as_map()?.iter().find(|(k, _)| !k.starts_with('?'))
}
