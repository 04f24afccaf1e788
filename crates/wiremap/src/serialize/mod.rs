mod json;

use std::fmt;
use thiserror::Error as ThisError;
use wiremap_core::value::Value;

/// Generic JSON serialization infrastructure.
///
/// This module is format-level only:
/// - No mapping-layer policy is defined here.
/// - Callers that need bounded decode must pass explicit limits.
/// - Pipeline-specific decode policy belongs in codec wrappers.

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("deserialize error: {0}")]
    Deserialize(String),

    #[error("deserialize size limit exceeded: {len} bytes (limit {max_bytes})")]
    DeserializeSizeLimitExceeded { len: usize, max_bytes: usize },
}

///
/// SerializeErrorKind
///
/// Stable error-kind taxonomy for serializer failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerializeErrorKind {
    Serialize,
    Deserialize,
    DeserializeSizeLimitExceeded,
}

impl SerializeErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serialize => "serialize",
            Self::Deserialize => "deserialize",
            Self::DeserializeSizeLimitExceeded => "deserialize_size_limit_exceeded",
        }
    }
}

impl fmt::Display for SerializeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SerializeError {
    /// Return a stable error kind independent of backend error-message text.
    #[must_use]
    pub const fn kind(&self) -> SerializeErrorKind {
        match self {
            Self::Serialize(_) => SerializeErrorKind::Serialize,
            Self::Deserialize(_) => SerializeErrorKind::Deserialize,
            Self::DeserializeSizeLimitExceeded { .. } => {
                SerializeErrorKind::DeserializeSizeLimitExceeded
            }
        }
    }
}

/// Serialize a generic value into JSON bytes.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>, SerializeError> {
    json::serialize(value)
}

/// Deserialize JSON bytes produced by [`to_bytes`] (or any JSON document)
/// into a generic value.
pub fn from_bytes(bytes: &[u8]) -> Result<Value, SerializeError> {
    json::deserialize(bytes)
}

/// Deserialize JSON bytes with an explicit size limit.
///
/// Size limits are caller policy, not serialization-format policy.
pub fn from_bytes_bounded(bytes: &[u8], max_bytes: usize) -> Result<Value, SerializeError> {
    if bytes.len() > max_bytes {
        return Err(SerializeError::DeserializeSizeLimitExceeded {
            len: bytes.len(),
            max_bytes,
        });
    }

    json::deserialize(bytes)
}
