//! Adapter for trees already rendered as JSON by another XML converter.
//!
//! Objects become maps, arrays become sequences, strings become text and
//! numbers become [`Node::Number`], or text when outside the `Decimal`
//! range. `null` means the field is absent and is dropped; booleans become
//! `"true"`/`"false"` text. Object key order is kept, so the first top-level
//! key is the one written first.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::core::{CteError, Node, NodeMap, ParseOptions};

/// Parse a JSON document into a [`Node`] tree with default options.
pub fn parse(json: &str) -> Result<Node, CteError> {
    parse_with(json, &ParseOptions::default())
}

/// Parse a JSON document into a [`Node`] tree.
pub fn parse_with(json: &str, options: &ParseOptions) -> Result<Node, CteError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CteError::Malformed(format!("JSON inválido: {e}")))?;
    from_value(&value, options)
}

/// Convert an already parsed JSON value. A top-level `null` is malformed.
pub fn from_value(value: &Value, options: &ParseOptions) -> Result<Node, CteError> {
    convert(value, 0, options.max_depth)?
        .ok_or_else(|| CteError::Malformed("documento vazio".into()))
}

fn convert(value: &Value, depth: usize, max_depth: usize) -> Result<Option<Node>, CteError> {
    if depth > max_depth {
        return Err(CteError::Malformed(format!(
            "aninhamento excede {max_depth} níveis"
        )));
    }
    let node = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => Node::Text(b.to_string()),
        Value::String(s) => Node::Text(s.clone()),
        Value::Number(n) => {
            let raw = n.to_string();
            match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
                Ok(number) => Node::Number(number),
                // Out of Decimal range; kept as text and read as zero if used.
                Err(_) => Node::Text(raw),
            }
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Some(node) = convert(item, depth + 1, max_depth)? {
                    out.push(node);
                }
            }
            Node::Seq(out)
        }
        Value::Object(fields) => {
            let mut map = NodeMap::new();
            for (key, field) in fields {
                if let Some(node) = convert(field, depth + 1, max_depth)? {
                    map.insert(key.clone(), node);
                }
            }
            Node::Map(map)
        }
    };
    Ok(Some(node))
}
