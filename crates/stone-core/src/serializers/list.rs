use crate::error::StoneError;
use crate::validators::ListValidator;
use crate::wire::WireNode;

/// Lifts a per-element conversion over ordered sequences.
///
/// The element conversion is passed in on every call, so this one serializer
/// serves every element type.
pub struct ListSerializer;

impl ListSerializer {
    /// Serialize every element in order. An empty slice yields `[]`.
    pub fn serialize<T, F>(values: &[T], element: F) -> WireNode
    where
        F: Fn(&T) -> WireNode,
    {
        WireNode::Array(values.iter().map(element).collect())
    }

    /// Deserialize every element in order.
    ///
    /// A non-list node (`null` included) is malformed. The first failing
    /// element aborts the whole list and its index is recorded in the error path.
    pub fn deserialize<T, F>(node: &WireNode, element: F) -> Result<Vec<T>, StoneError>
    where
        F: Fn(&WireNode) -> Result<T, StoneError>,
    {
        let items = match node {
            WireNode::Array(items) => items,
            other => return Err(StoneError::unexpected_kind("list", other)),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                element(item).map_err(|err| {
                    tracing::debug!("List element {} rejected: {}", index, err);
                    err.at_index(index)
                })
            })
            .collect()
    }

    /// Deserialize, then check the item count against `validator`
    pub fn deserialize_with<T, F>(
        node: &WireNode,
        element: F,
        validator: &ListValidator,
    ) -> Result<Vec<T>, StoneError>
    where
        F: Fn(&WireNode) -> Result<T, StoneError>,
    {
        let values = Self::deserialize(node, element)?;
        validator.validate(&values).map_err(StoneError::into_malformed)?;
        Ok(values)
    }
}
