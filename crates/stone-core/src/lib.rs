//! Runtime support for generated API-client SDKs.
//!
//! Every generated domain type implements [`Serializable`], converting to and
//! from a [`WireNode`] tree. The primitive and list serializers in
//! [`serializers`] are the building blocks those implementations call, and
//! [`Route`] describes each remote procedure for the dispatch layer.

pub mod config;
pub mod error;
pub mod route;
pub mod serializers;
pub mod traits;
pub mod validators;
pub mod wire;

pub use config::WireConfig;
pub use error::{PayloadKind, StoneError};
pub use route::{Route, RouteBuilder, RouteHost, RouteInfo, RouteStyle, RouteTable, TypeRef};
pub use serializers::{
    BoolSerializer, DateSerializer, ListSerializer, NumberSerializer, StringSerializer,
    StructReader, StructWriter,
};
pub use traits::Serializable;
pub use wire::WireNode;
