//! Primitive and aggregate serializers.
//!
//! Each serializer is a stateless namespace of associated functions. Generated
//! composite types call into these to build up nested structures.

pub mod boolean;
pub mod date;
pub mod list;
pub mod number;
pub mod serde_bridge;
pub mod string;
pub mod structs;

pub use boolean::BoolSerializer;
pub use date::DateSerializer;
pub use list::ListSerializer;
pub use number::{NumberSerializer, WireNumber};
pub use string::StringSerializer;
pub use structs::{union_tag, StructReader, StructWriter};
