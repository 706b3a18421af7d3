//! The untyped tree every serializer reads and writes.
//!
//! A [`WireNode`] is a plain `serde_json::Value`: string, number, boolean,
//! null, ordered array, or string-keyed object. Encoding to and from text is
//! left to serde_json; this module only adds a depth bound on decode.

use crate::config::WireConfig;
use crate::error::StoneError;

pub use serde_json::{Number as WireNumberValue, Value as WireNode};

/// Field mapping of a [`WireNode::Object`]
pub type WireMap = serde_json::Map<String, WireNode>;

/// Name of a node's kind, as used in error messages
pub fn kind_name(node: &WireNode) -> &'static str {
    match node {
        WireNode::Null => "null",
        WireNode::Bool(_) => "boolean",
        WireNode::Number(_) => "number",
        WireNode::String(_) => "string",
        WireNode::Array(_) => "list",
        WireNode::Object(_) => "mapping",
    }
}

/// Container nesting depth of a node. Scalars have depth 0, `[]` and `{}` depth 1.
pub fn depth(node: &WireNode) -> usize {
    // Iterative: the tree may come straight off the network.
    let mut max = 0;
    let mut stack = vec![(node, 0usize)];
    while let Some((current, parent)) = stack.pop() {
        let level = parent + 1;
        match current {
            WireNode::Array(items) => {
                max = max.max(level);
                stack.extend(items.iter().map(|item| (item, level)));
            }
            WireNode::Object(fields) => {
                max = max.max(level);
                stack.extend(fields.values().map(|value| (value, level)));
            }
            _ => {}
        }
    }
    max
}

/// Decode wire text with the default [`WireConfig`]
pub fn decode(text: &str) -> Result<WireNode, StoneError> {
    decode_with(text, &WireConfig::default())
}

/// Decode wire text, rejecting documents nested deeper than `config.max_depth`
pub fn decode_with(text: &str, config: &WireConfig) -> Result<WireNode, StoneError> {
    let node: WireNode = serde_json::from_str(text)?;
    let found = depth(&node);
    if found > config.max_depth {
        tracing::debug!("Rejecting wire document of depth {} (limit {})", found, config.max_depth);
        return Err(StoneError::malformed(format!(
            "document depth {} exceeds limit {}",
            found, config.max_depth
        )));
    }
    Ok(node)
}

/// Encode a node to compact wire text
pub fn encode(node: &WireNode) -> String {
    node.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names() {
        assert_eq!(kind_name(&json!(null)), "null");
        assert_eq!(kind_name(&json!(true)), "boolean");
        assert_eq!(kind_name(&json!(1.5)), "number");
        assert_eq!(kind_name(&json!("x")), "string");
        assert_eq!(kind_name(&json!([])), "list");
        assert_eq!(kind_name(&json!({})), "mapping");
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(&json!(1)), 0);
        assert_eq!(depth(&json!([])), 1);
        assert_eq!(depth(&json!([1, [2, [3]]])), 3);
        assert_eq!(depth(&json!({"a": {"b": [null]}, "c": 1})), 3);
    }

    #[test]
    fn test_decode_respects_depth_limit() {
        let config = WireConfig::new().with_max_depth(2);
        assert!(decode_with("[[1]]", &config).is_ok());

        let err = decode_with("[[[1]]]", &config).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_decode_reports_bad_json() {
        let err = decode("{\"a\": ").unwrap_err();
        assert!(matches!(err, StoneError::Json(_)));
    }

    #[test]
    fn test_encode_preserves_list_order() {
        let node = decode(r#"{"items": [3, 1, 2]}"#).unwrap();
        assert_eq!(encode(&node), r#"{"items":[3,1,2]}"#);
    }
}
