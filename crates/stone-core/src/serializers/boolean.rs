use crate::error::StoneError;
use crate::wire::WireNode;

/// Identity serializer over `true` / `false`
pub struct BoolSerializer;

impl BoolSerializer {
    pub fn serialize(value: bool) -> WireNode {
        WireNode::Bool(value)
    }

    /// Only wire booleans are accepted; `"true"`, `1` and `null` are malformed.
    pub fn deserialize(node: &WireNode) -> Result<bool, StoneError> {
        match node {
            WireNode::Bool(value) => Ok(*value),
            other => Err(StoneError::unexpected_kind("boolean", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        for value in [true, false] {
            let node = BoolSerializer::serialize(value);
            assert_eq!(BoolSerializer::deserialize(&node).unwrap(), value);
        }
    }

    #[test]
    fn test_rejects_non_boolean() {
        for node in [json!("notabool"), json!("true"), json!(1), json!(0), json!(null)] {
            let err = BoolSerializer::deserialize(&node).unwrap_err();
            assert!(err.is_malformed(), "{node} should be rejected");
        }
    }
}
