use crate::error::StoneError;
use crate::validators::StringValidator;
use crate::wire::WireNode;

/// Identity serializer for strings. Escaping is the wire encoder's job.
pub struct StringSerializer;

impl StringSerializer {
    pub fn serialize(value: &str) -> WireNode {
        WireNode::String(value.to_owned())
    }

    pub fn deserialize(node: &WireNode) -> Result<String, StoneError> {
        match node {
            WireNode::String(value) => Ok(value.clone()),
            other => Err(StoneError::unexpected_kind("string", other)),
        }
    }

    /// Deserialize, then check the value against `validator`
    pub fn deserialize_with(
        node: &WireNode,
        validator: &StringValidator,
    ) -> Result<String, StoneError> {
        let value = Self::deserialize(node)?;
        validator.validate(&value).map_err(StoneError::into_malformed)?;
        Ok(value)
    }
}
