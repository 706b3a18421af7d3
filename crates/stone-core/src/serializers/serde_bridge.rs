//! Bridge for hand-written types that already derive serde traits.

use crate::error::StoneError;
use crate::wire::WireNode;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Convert a serde value into a wire node
pub fn to_wire<T: Serialize + ?Sized>(value: &T) -> Result<WireNode, StoneError> {
    Ok(serde_json::to_value(value)?)
}

/// Rebuild a serde value from a wire node; any mismatch is malformed wire data
pub fn from_wire<T: DeserializeOwned>(node: &WireNode) -> Result<T, StoneError> {
    serde_json::from_value(node.clone()).map_err(|err| StoneError::malformed(err.to_string()))
}
