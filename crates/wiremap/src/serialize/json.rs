use crate::serialize::SerializeError;
use wiremap_core::value::Value;

/// Serialize a generic value into JSON bytes.
pub(super) fn serialize(value: &Value) -> Result<Vec<u8>, SerializeError> {
    serde_json::to_vec(value).map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Deserialize JSON bytes into a generic value.
///
/// Map entry order follows the document; duplicate object keys are rejected
/// by the value tree's own decode invariants.
pub(super) fn deserialize(bytes: &[u8]) -> Result<Value, SerializeError> {
    serde_json::from_slice(bytes).map_err(|e| SerializeError::Deserialize(e.to_string()))
}
