use crate::{
    error::MapError,
    model::FieldKind,
    reflect::Reflector,
    transform::{FieldCtx, Transform},
    value::Value,
};
use url::Url;

///
/// UrlTransform
///
/// Absolute URL text, parsed and normalized in both directions so a field
/// never holds a string the `url` crate would reject.
///

pub struct UrlTransform;

impl UrlTransform {
    fn normalize(ctx: &FieldCtx, value: &Value) -> Result<Value, MapError> {
        let text = value
            .as_text()
            .ok_or_else(|| ctx.malformed(format!("expected a URL string, found {}", value.shape())))?;

        Url::parse(text)
            .map(|url| Value::Text(url.as_str().to_string()))
            .map_err(|e| ctx.malformed(format!("`{text}` is not a valid URL: {e}")))
    }
}

impl Transform for UrlTransform {
    fn kind_id(&self) -> &'static str {
        "url"
    }

    fn supports(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::Url)
    }

    fn encode(
        &self,
        _reflector: &Reflector,
        ctx: &FieldCtx,
        native: &Value,
    ) -> Result<Value, MapError> {
        Self::normalize(ctx, native)
    }

    fn decode(
        &self,
        _reflector: &Reflector,
        ctx: &FieldCtx,
        wire: &Value,
    ) -> Result<Value, MapError> {
        Self::normalize(ctx, wire)
    }
}
