use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoneError {
    #[error("Malformed wire data at '{path}': {reason}")]
    MalformedWireData { path: String, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Route '{route}' has no {kind} type")]
    MissingPayloadType { route: String, kind: PayloadKind },

    #[error("Wire decoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which side of a route's response a payload type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Result,
    Error,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadKind::Result => f.write_str("result"),
            PayloadKind::Error => f.write_str("error"),
        }
    }
}

impl StoneError {
    /// Malformed data at the node currently being decoded.
    pub fn malformed(reason: impl Into<String>) -> Self {
        StoneError::MalformedWireData {
            path: String::new(),
            reason: reason.into(),
        }
    }

    /// Malformed data where the node kind differs from the expected one.
    pub fn unexpected_kind(expected: &str, node: &crate::wire::WireNode) -> Self {
        Self::malformed(format!(
            "expected {}, got {}",
            expected,
            crate::wire::kind_name(node)
        ))
    }

    /// Prefix the error path with a list index. Other variants pass through.
    pub fn at_index(self, index: usize) -> Self {
        self.prefix_path(format!("[{}]", index))
    }

    /// Prefix the error path with a struct field name.
    pub fn in_field(self, field: &str) -> Self {
        self.prefix_path(format!(".{}", field))
    }

    fn prefix_path(self, segment: String) -> Self {
        match self {
            StoneError::MalformedWireData { path, reason } => StoneError::MalformedWireData {
                path: segment + &path,
                reason,
            },
            other => other,
        }
    }

    /// Convert a constraint violation into malformed wire data, for use on the decoding side.
    pub fn into_malformed(self) -> Self {
        match self {
            StoneError::Validation(reason) => Self::malformed(reason),
            other => other,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StoneError::MalformedWireData { .. })
    }

    /// Path of a malformed-data error, `None` for every other variant
    pub fn path(&self) -> Option<&str> {
        match self {
            StoneError::MalformedWireData { path, .. } => Some(path),
            _ => None,
        }
    }
}
