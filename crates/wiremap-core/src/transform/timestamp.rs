use crate::{
    error::MapError,
    model::FieldKind,
    reflect::Reflector,
    transform::{FieldCtx, Transform},
    types::Timestamp,
    value::{Number, Value},
};

///
/// TimestampTransform
///
/// Native seconds-since-epoch ⇄ wire RFC 3339 string.
///

pub struct TimestampTransform;

impl Transform for TimestampTransform {
    fn kind_id(&self) -> &'static str {
        "timestamp"
    }

    fn supports(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::Timestamp)
    }

    fn encode(
        &self,
        _reflector: &Reflector,
        ctx: &FieldCtx,
        native: &Value,
    ) -> Result<Value, MapError> {
        let secs = native
            .as_number()
            .and_then(|n| n.as_u64())
            .ok_or_else(|| ctx.malformed("timestamp field did not read as seconds"))?;

        Timestamp::from_seconds(secs)
            .to_rfc3339()
            .map(Value::Text)
            .ok_or_else(|| ctx.malformed(format!("timestamp {secs}s is out of calendar range")))
    }

    fn decode(
        &self,
        _reflector: &Reflector,
        ctx: &FieldCtx,
        wire: &Value,
    ) -> Result<Value, MapError> {
        let text = wire
            .as_text()
            .ok_or_else(|| ctx.malformed(format!("expected an RFC 3339 string, found {}", wire.shape())))?;

        Timestamp::parse_rfc3339(text)
            .map(|ts| Value::Number(Number::Uint(ts.get())))
            .ok_or_else(|| ctx.malformed(format!("`{text}` is not a valid RFC 3339 instant")))
    }
}
