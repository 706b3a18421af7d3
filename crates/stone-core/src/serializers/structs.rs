//! Field access helpers for generated struct and union serializers.

use crate::config::WireConfig;
use crate::error::StoneError;
use crate::wire::{WireMap, WireNode};
use std::collections::HashSet;

/// Key carrying the variant name of a union encoded as a mapping
pub const TAG_KEY: &str = ".tag";

/// Reads named fields out of a wire mapping
pub struct StructReader<'a> {
    type_name: &'static str,
    fields: &'a WireMap,
    strict: bool,
    consumed: HashSet<&'a str>,
}

impl<'a> StructReader<'a> {
    pub fn new(
        node: &'a WireNode,
        type_name: &'static str,
        config: &WireConfig,
    ) -> Result<Self, StoneError> {
        match node {
            WireNode::Object(fields) => Ok(Self {
                type_name,
                fields,
                strict: config.strict,
                consumed: HashSet::new(),
            }),
            other => Err(StoneError::unexpected_kind(type_name, other)),
        }
    }

    /// Read a field that must be present and non-null
    pub fn required<T, F>(&mut self, key: &'a str, decode: F) -> Result<T, StoneError>
    where
        F: FnOnce(&WireNode) -> Result<T, StoneError>,
    {
        match self.take(key) {
            Some(node) => decode(node).map_err(|err| err.in_field(key)),
            None => Err(StoneError::malformed(format!(
                "missing required field '{}' of {}",
                key, self.type_name
            ))
            .in_field(key)),
        }
    }

    /// Read a field that may be absent or null
    pub fn optional<T, F>(&mut self, key: &'a str, decode: F) -> Result<Option<T>, StoneError>
    where
        F: FnOnce(&WireNode) -> Result<T, StoneError>,
    {
        match self.take(key) {
            Some(node) => decode(node).map(Some).map_err(|err| err.in_field(key)),
            None => Ok(None),
        }
    }

    /// Finish reading. In strict mode any key that was not read is malformed.
    pub fn finish(self) -> Result<(), StoneError> {
        if !self.strict {
            return Ok(());
        }
        match self
            .fields
            .keys()
            .find(|key| key.as_str() != TAG_KEY && !self.consumed.contains(key.as_str()))
        {
            Some(unknown) => Err(StoneError::malformed(format!(
                "unknown field '{}' for {}",
                unknown, self.type_name
            ))
            .in_field(unknown)),
            None => Ok(()),
        }
    }

    fn take(&mut self, key: &'a str) -> Option<&'a WireNode> {
        self.consumed.insert(key);
        self.fields.get(key).filter(|node| !node.is_null())
    }
}

/// Builds a wire mapping field by field
#[derive(Debug, Default)]
pub struct StructWriter {
    fields: WireMap,
}

impl StructWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a union variant mapping, `{".tag": tag, ...}`
    pub fn tagged(tag: &str) -> Self {
        Self::new().field(TAG_KEY, WireNode::String(tag.to_string()))
    }

    pub fn field(mut self, key: &str, node: WireNode) -> Self {
        self.fields.insert(key.to_string(), node);
        self
    }

    /// Add the field only when a value is present
    pub fn optional_field(self, key: &str, node: Option<WireNode>) -> Self {
        match node {
            Some(node) => self.field(key, node),
            None => self,
        }
    }

    pub fn finish(self) -> WireNode {
        WireNode::Object(self.fields)
    }
}

/// Variant name of a union node: either a bare string or a mapping with `.tag`
pub fn union_tag(node: &WireNode) -> Result<&str, StoneError> {
    match node {
        WireNode::String(tag) => Ok(tag.as_str()),
        WireNode::Object(fields) => match fields.get(TAG_KEY) {
            Some(WireNode::String(tag)) => Ok(tag.as_str()),
            Some(other) => Err(StoneError::unexpected_kind("string", other).in_field(TAG_KEY)),
            None => Err(StoneError::malformed("union mapping has no '.tag'")),
        },
        other => Err(StoneError::unexpected_kind("union tag", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializers::{NumberSerializer, StringSerializer};
    use serde_json::json;

    #[test]
    fn test_required_and_optional() {
        let node = json!({"name": "a.txt", "size": 12, "rev": null});
        let mut reader = StructReader::new(&node, "FileMetadata", &WireConfig::default()).unwrap();

        let name = reader.required("name", StringSerializer::deserialize).unwrap();
        let size: u64 = reader.required("size", NumberSerializer::deserialize).unwrap();
        let rev = reader.optional("rev", StringSerializer::deserialize).unwrap();
        let missing = reader.optional("client_modified", StringSerializer::deserialize).unwrap();
        reader.finish().unwrap();

        assert_eq!(name, "a.txt");
        assert_eq!(size, 12);
        assert_eq!(rev, None);
        assert_eq!(missing, None);
    }

    #[test]
    fn test_missing_required_field() {
        let node = json!({"name": null});
        let mut reader = StructReader::new(&node, "FileMetadata", &WireConfig::default()).unwrap();
        let err = reader.required("name", StringSerializer::deserialize).unwrap_err();
        assert_eq!(err.path(), Some(".name"));
    }

    #[test]
    fn test_field_error_carries_path() {
        let node = json!({"size": "big"});
        let mut reader = StructReader::new(&node, "FileMetadata", &WireConfig::default()).unwrap();
        let err = reader.required("size", NumberSerializer::deserialize::<u64>).unwrap_err();
        assert_eq!(err.path(), Some(".size"));
    }

    #[test]
    fn test_rejects_non_mapping() {
        let node = json!(["name"]);
        assert!(StructReader::new(&node, "FileMetadata", &WireConfig::default()).is_err());
    }

    #[test]
    fn test_strict_rejects_unknown_fields() {
        let node = json!({".tag": "file", "name": "a", "extra": 1});

        let mut lenient = StructReader::new(&node, "FileMetadata", &WireConfig::default()).unwrap();
        lenient.required("name", StringSerializer::deserialize).unwrap();
        assert!(lenient.finish().is_ok());

        let strict_config = WireConfig::new().with_strict(true);
        let mut strict = StructReader::new(&node, "FileMetadata", &strict_config).unwrap();
        strict.required("name", StringSerializer::deserialize).unwrap();
        let err = strict.finish().unwrap_err();
        assert_eq!(err.path(), Some(".extra"));
    }

    #[test]
    fn test_writer() {
        let node = StructWriter::new()
            .field("name", json!("a.txt"))
            .optional_field("rev", None)
            .optional_field("size", Some(json!(3)))
            .finish();
        assert_eq!(node, json!({"name": "a.txt", "size": 3}));
    }

    #[test]
    fn test_union_tag() {
        assert_eq!(union_tag(&json!("other")).unwrap(), "other");

        let node = StructWriter::tagged("path").field("path", json!("/a")).finish();
        assert_eq!(union_tag(&node).unwrap(), "path");

        assert!(union_tag(&json!({"path": "/a"})).is_err());
        assert!(union_tag(&json!({".tag": 1})).is_err());
        assert!(union_tag(&json!(3)).is_err());
    }
}
