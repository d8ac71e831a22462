//! JSON serialization helpers.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes a value to pretty JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`to_json_stable`], as bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    to_json_stable(value).map(String::into_bytes)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold the expected type.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, SerializationError> {
    let bytes = std::fs::read(path)?;
    from_json_bytes(&bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use applymail_domain::{DataMap, DesignConfig};
    use std::collections::BTreeMap;

    #[test]
    fn test_stable_output_shape() {
        let mut map = BTreeMap::new();
        map.insert("variableFavorites", "[]");

        let json = to_json_stable(&map).expect("serialization should work");
        assert_eq!(json, "{\n  \"variableFavorites\": \"[]\"\n}\n");
    }

    #[test]
    fn test_data_map_keeps_insertion_order() {
        let map: DataMap = from_json(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let json = to_json_stable(&map).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
    }

    #[test]
    fn test_partial_design_file_fills_defaults() {
        let design: DesignConfig = from_json_bytes(br##"{"primaryColor": "#111111"}"##).unwrap();
        assert_eq!(design.primary_color, "#111111");
        assert_eq!(design.font_size, DesignConfig::default().font_size);
    }

    #[test]
    fn test_invalid_json_is_deserialize_error() {
        let result: Result<DataMap, _> = from_json("{\"a\": }");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<DataMap, _> = read_json_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(SerializationError::Io(_))));
    }
}
