use crate::error::StoneError;
use crate::serializers::{BoolSerializer, ListSerializer, NumberSerializer, StringSerializer};
use crate::wire::WireNode;

/// Defines the contract every type crossing the wire boundary implements.
///
/// Generated domain types implement this by composing the primitive and list
/// serializers. Implementations must satisfy the round-trip law:
/// `T::deserialize(&value.serialize())` yields a value equal to `value`.
pub trait Serializable: Sized {
    /// Convert a well-formed value into its wire form. Never fails.
    fn serialize(&self) -> WireNode;

    /// Rebuild a value from its wire form.
    ///
    /// Fails with [`StoneError::MalformedWireData`] when the node's shape or
    /// value does not match this type.
    fn deserialize(node: &WireNode) -> Result<Self, StoneError>;

    /// Human-readable rendering for diagnostics
    fn describe(&self) -> String {
        self.serialize().to_string()
    }
}

impl Serializable for String {
    fn serialize(&self) -> WireNode {
        StringSerializer::serialize(self)
    }

    fn deserialize(node: &WireNode) -> Result<Self, StoneError> {
        StringSerializer::deserialize(node)
    }
}

impl Serializable for bool {
    fn serialize(&self) -> WireNode {
        BoolSerializer::serialize(*self)
    }

    fn deserialize(node: &WireNode) -> Result<Self, StoneError> {
        BoolSerializer::deserialize(node)
    }
}

macro_rules! impl_serializable_number {
    ($($ty:ty),*) => {
        $(
            impl Serializable for $ty {
                fn serialize(&self) -> WireNode {
                    NumberSerializer::serialize(*self)
                }

                fn deserialize(node: &WireNode) -> Result<Self, StoneError> {
                    NumberSerializer::deserialize(node)
                }
            }
        )*
    };
}

impl_serializable_number!(i32, u32, i64, u64, f32, f64);

/// Void payload, for routes and union variants that carry no data
impl Serializable for () {
    fn serialize(&self) -> WireNode {
        WireNode::Null
    }

    fn deserialize(node: &WireNode) -> Result<Self, StoneError> {
        match node {
            WireNode::Null => Ok(()),
            WireNode::Object(fields) if fields.is_empty() => Ok(()),
            other => Err(StoneError::unexpected_kind("null", other)),
        }
    }

    fn describe(&self) -> String {
        "void".to_string()
    }
}

/// Nullable wrapper: `None` is `null` on the wire.
///
/// Primitives never accept `null` themselves; optional fields go through this impl.
///
/// Both layers of a nested option share the one `null`, so `Some(None)` reads
/// back as `None`. The round-trip law holds only for a single level of
/// `Option`.
impl<T: Serializable> Serializable for Option<T> {
    fn serialize(&self) -> WireNode {
        match self {
            Some(value) => value.serialize(),
            None => WireNode::Null,
        }
    }

    fn deserialize(node: &WireNode) -> Result<Self, StoneError> {
        match node {
            WireNode::Null => Ok(None),
            other => T::deserialize(other).map(Some),
        }
    }

    fn describe(&self) -> String {
        match self {
            Some(value) => value.describe(),
            None => "null".to_string(),
        }
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    fn serialize(&self) -> WireNode {
        ListSerializer::serialize(self, T::serialize)
    }

    fn deserialize(node: &WireNode) -> Result<Self, StoneError> {
        ListSerializer::deserialize(node, T::deserialize)
    }

    fn describe(&self) -> String {
        let items: Vec<String> = self.iter().map(T::describe).collect();
        format!("[{}]", items.join(", "))
    }
}
