//! Static metadata describing one remote procedure.
//!
//! A [`Route`] is built once, usually into a process-wide static emitted next
//! to the generated API surface, and read by the dispatch layer for every
//! call. It never serializes anything itself: the result and error types are
//! carried as [`TypeRef`] tokens the dispatcher uses once a response arrives.

use crate::config::WireConfig;
use crate::error::{PayloadKind, StoneError};
use crate::traits::Serializable;
use crate::wire::{self, WireNode};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Attribute key holding the request style
pub const STYLE_ATTR: &str = "style";
/// Attribute key holding the target host
pub const HOST_ATTR: &str = "host";

/// Zero-sized reference to a type's [`Serializable`] implementation.
///
/// Lets a route name its payload types before any payload value exists.
pub struct TypeRef<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypeRef<T> {
    pub const fn new() -> Self {
        Self { _marker: PhantomData }
    }

    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: Serializable> TypeRef<T> {
    pub fn serialize(&self, value: &T) -> WireNode {
        value.serialize()
    }

    pub fn deserialize(&self, node: &WireNode) -> Result<T, StoneError> {
        T::deserialize(node)
    }

    pub fn describe(&self, value: &T) -> String {
        value.describe()
    }
}

impl<T> Clone for TypeRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeRef<T> {}

impl<T> Default for TypeRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef<{}>", self.type_name())
    }
}

/// How a route's arguments and payload travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteStyle {
    /// Arguments and result in the body
    #[default]
    Rpc,
    /// Arguments in a header, binary request body
    Upload,
    /// Arguments in a header, binary response body
    Download,
}

impl RouteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStyle::Rpc => "rpc",
            RouteStyle::Upload => "upload",
            RouteStyle::Download => "download",
        }
    }
}

impl FromStr for RouteStyle {
    type Err = StoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rpc" => Ok(RouteStyle::Rpc),
            "upload" => Ok(RouteStyle::Upload),
            "download" => Ok(RouteStyle::Download),
            other => Err(StoneError::InvalidRoute(format!("Unknown route style: {}", other))),
        }
    }
}

/// Which API host serves a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteHost {
    #[default]
    Api,
    Content,
    Notify,
}

impl RouteHost {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteHost::Api => "api",
            RouteHost::Content => "content",
            RouteHost::Notify => "notify",
        }
    }
}

impl FromStr for RouteHost {
    type Err = StoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(RouteHost::Api),
            "content" => Ok(RouteHost::Content),
            "notify" => Ok(RouteHost::Notify),
            other => Err(StoneError::InvalidRoute(format!("Unknown route host: {}", other))),
        }
    }
}

/// Immutable descriptor for one remote procedure
pub struct Route<R = (), E = ()> {
    name: String,
    namespace: String,
    deprecated: bool,
    result_type: Option<TypeRef<R>>,
    error_type: Option<TypeRef<E>>,
    attrs: BTreeMap<String, String>,
}

impl<R, E> Route<R, E> {
    /// Build a route. `name` and `namespace` must be non-empty; both payload
    /// types may be absent for routes with no payload.
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        deprecated: bool,
        result_type: Option<TypeRef<R>>,
        error_type: Option<TypeRef<E>>,
        attrs: BTreeMap<String, String>,
    ) -> Result<Self, StoneError> {
        let name = name.into();
        let namespace = namespace.into();

        if name.trim().is_empty() {
            tracing::debug!("Rejecting route with empty name in namespace '{}'", namespace);
            return Err(StoneError::InvalidRoute("route name must not be empty".to_string()));
        }
        if namespace.trim().is_empty() {
            tracing::debug!("Rejecting route '{}' with empty namespace", name);
            return Err(StoneError::InvalidRoute(format!(
                "namespace of route '{}' must not be empty",
                name
            )));
        }

        Ok(Self {
            name,
            namespace,
            deprecated,
            result_type,
            error_type,
            attrs,
        })
    }

    pub fn builder(name: impl Into<String>, namespace: impl Into<String>) -> RouteBuilder<R, E> {
        RouteBuilder::new(name, namespace)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn result_type(&self) -> Option<TypeRef<R>> {
        self.result_type
    }

    pub fn error_type(&self) -> Option<TypeRef<E>> {
        self.error_type
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// `style` attribute, [`RouteStyle::Rpc`] when unset
    pub fn style(&self) -> Result<RouteStyle, StoneError> {
        self.attr(STYLE_ATTR)
            .map(RouteStyle::from_str)
            .unwrap_or(Ok(RouteStyle::default()))
    }

    /// `host` attribute, [`RouteHost::Api`] when unset
    pub fn host(&self) -> Result<RouteHost, StoneError> {
        self.attr(HOST_ATTR)
            .map(RouteHost::from_str)
            .unwrap_or(Ok(RouteHost::default()))
    }

    /// Endpoint path relative to the API version root
    pub fn path(&self) -> String {
        format!("/{}/{}", self.namespace, self.name)
    }
}

// No `Clone` or `Debug` bound on the payload types.
impl<R, E> Clone for Route<R, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            deprecated: self.deprecated,
            result_type: self.result_type,
            error_type: self.error_type,
            attrs: self.attrs.clone(),
        }
    }
}

impl<R, E> fmt::Debug for Route<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("deprecated", &self.deprecated)
            .field("result_type", &self.result_type)
            .field("error_type", &self.error_type)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<R: Serializable, E: Serializable> Route<R, E> {
    /// Decode a successful response body with the route's result type
    pub fn deserialize_result(&self, node: &WireNode) -> Result<R, StoneError> {
        let result_type = self.result_type.ok_or_else(|| self.missing(PayloadKind::Result))?;
        result_type.deserialize(node)
    }

    /// Decode a structured error body with the route's error type
    pub fn deserialize_error(&self, node: &WireNode) -> Result<E, StoneError> {
        let error_type = self.error_type.ok_or_else(|| self.missing(PayloadKind::Error))?;
        error_type.deserialize(node)
    }

    /// Parse and decode a successful response body
    pub fn decode_result(&self, body: &str, config: &WireConfig) -> Result<R, StoneError> {
        let node = wire::decode_with(body, config)?;
        self.deserialize_result(&node)
    }

    /// Parse and decode a structured error body
    pub fn decode_error(&self, body: &str, config: &WireConfig) -> Result<E, StoneError> {
        let node = wire::decode_with(body, config)?;
        self.deserialize_error(&node)
    }

    fn missing(&self, kind: PayloadKind) -> StoneError {
        StoneError::MissingPayloadType {
            route: format!("{}/{}", self.namespace, self.name),
            kind,
        }
    }
}

/// Builder for [`Route`]
pub struct RouteBuilder<R = (), E = ()> {
    name: String,
    namespace: String,
    deprecated: bool,
    result_type: Option<TypeRef<R>>,
    error_type: Option<TypeRef<E>>,
    attrs: BTreeMap<String, String>,
}

impl<R, E> RouteBuilder<R, E> {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            deprecated: false,
            result_type: None,
            error_type: None,
            attrs: BTreeMap::new(),
        }
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn result_type(mut self, result_type: TypeRef<R>) -> Self {
        self.result_type = Some(result_type);
        self
    }

    pub fn error_type(mut self, error_type: TypeRef<E>) -> Self {
        self.error_type = Some(error_type);
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn style(self, style: RouteStyle) -> Self {
        self.attr(STYLE_ATTR, style.as_str())
    }

    pub fn host(self, host: RouteHost) -> Self {
        self.attr(HOST_ATTR, host.as_str())
    }

    pub fn build(self) -> Result<Route<R, E>, StoneError> {
        Route::new(
            self.name,
            self.namespace,
            self.deprecated,
            self.result_type,
            self.error_type,
            self.attrs,
        )
    }
}

impl<R, E> fmt::Debug for RouteBuilder<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBuilder")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("deprecated", &self.deprecated)
            .field("result_type", &self.result_type)
            .field("error_type", &self.error_type)
            .field("attrs", &self.attrs)
            .finish()
    }
}

/// Payload-independent view of a route, for tables and tooling
pub trait RouteInfo: Send + Sync {
    fn name(&self) -> &str;

    fn namespace(&self) -> &str;

    fn deprecated(&self) -> bool;

    fn attrs(&self) -> &BTreeMap<String, String>;

    /// Name of the result type, `None` for routes with no result payload
    fn result_type_name(&self) -> Option<&'static str>;

    /// Name of the error type, `None` for routes with no structured error
    fn error_type_name(&self) -> Option<&'static str>;
}

impl<R, E> RouteInfo for Route<R, E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn deprecated(&self) -> bool {
        self.deprecated
    }

    fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    fn result_type_name(&self) -> Option<&'static str> {
        self.result_type.map(|t| t.type_name())
    }

    fn error_type_name(&self) -> Option<&'static str> {
        self.error_type.map(|t| t.type_name())
    }
}

/// Lookup of statically declared routes by namespace and name
#[derive(Default)]
pub struct RouteTable {
    routes: BTreeMap<(String, String), &'static dyn RouteInfo>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Each namespace/name pair may be registered once.
    pub fn register(&mut self, route: &'static dyn RouteInfo) -> Result<(), StoneError> {
        let key = (route.namespace().to_string(), route.name().to_string());
        if self.routes.contains_key(&key) {
            return Err(StoneError::InvalidRoute(format!(
                "route '{}/{}' is already registered",
                key.0, key.1
            )));
        }
        tracing::trace!("Registered route {}/{}", key.0, key.1);
        self.routes.insert(key, route);
        Ok(())
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&'static dyn RouteInfo> {
        self.routes
            .get(&(namespace.to_string(), name.to_string()))
            .copied()
    }

    /// Routes of one namespace, ordered by name
    pub fn namespace<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'static dyn RouteInfo> + 'a {
        self.routes
            .iter()
            .filter(move |((ns, _), _)| ns == namespace)
            .map(|(_, route)| *route)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static dyn RouteInfo> + '_ {
        self.routes.values().copied()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.keys().map(|(ns, name)| format!("{}/{}", ns, name)))
            .finish()
    }
}
