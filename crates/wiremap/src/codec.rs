//! Body-codec boundary.
//!
//! The request/response pipeline converts model instances to generic values
//! through the reflector, then hands them here for byte-level framing. This
//! module is the seam transport layers plug into; nothing behind it is
//! implemented in this workspace.

use crate::serialize::{self, SerializeError};
use wiremap_core::value::Value;

///
/// BodyCodec
///
/// Byte-level framing for one wire format. Implementations are stateless and
/// reusable across requests.
///

pub trait BodyCodec {
    /// Content-type header value for bodies produced by this codec.
    fn content_type(&self) -> &'static str;

    /// Frame a generic value as request-body bytes.
    fn encode_body(&self, value: &Value) -> Result<Vec<u8>, SerializeError>;

    /// Parse response-body bytes into a generic value.
    fn decode_body(&self, bytes: &[u8]) -> Result<Value, SerializeError>;
}

///
/// JsonCodec
///

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec {
    /// Optional decode size limit; `None` accepts any body length.
    max_body_bytes: Option<usize>,
}

impl JsonCodec {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_body_bytes: None,
        }
    }

    /// Enforce a maximum body length on decode.
    #[must_use]
    pub const fn with_max_body_bytes(max_body_bytes: usize) -> Self {
        Self {
            max_body_bytes: Some(max_body_bytes),
        }
    }
}

impl BodyCodec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode_body(&self, value: &Value) -> Result<Vec<u8>, SerializeError> {
        serialize::to_bytes(value)
    }

    fn decode_body(&self, bytes: &[u8]) -> Result<Value, SerializeError> {
        match self.max_body_bytes {
            Some(max_bytes) => serialize::from_bytes_bounded(bytes, max_bytes),
            None => serialize::from_bytes(bytes),
        }
    }
}
