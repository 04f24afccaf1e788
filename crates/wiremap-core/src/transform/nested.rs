use crate::{
    error::{DataError, MapError},
    model::{FieldKind, ModelRef},
    reflect::Reflector,
    transform::{FieldCtx, Transform, decode_object, encode_object},
    value::Value,
};

///
/// NestedTransform
///
/// The generic object-graph transformer: converts between a wire object and a
/// nested model's field-keyed native map by re-entering the reflector with
/// the inner model's property list. Lists and maps of models compose for free
/// because the walk recurses through containers before reaching this leaf.
///

pub struct NestedTransform {
    model: ModelRef,
}

impl NestedTransform {
    #[must_use]
    pub const fn new(model: ModelRef) -> Self {
        Self { model }
    }
}

impl Transform for NestedTransform {
    fn kind_id(&self) -> &'static str {
        "nested"
    }

    fn supports(&self, kind: &FieldKind) -> bool {
        matches!(kind, FieldKind::Model(_))
    }

    fn encode(
        &self,
        reflector: &Reflector,
        ctx: &FieldCtx,
        native: &Value,
    ) -> Result<Value, MapError> {
        let map = native.as_map().ok_or_else(|| {
            ctx.malformed(format!(
                "nested `{}` field did not read as a field map",
                self.model.path
            ))
        })?;

        let properties = self.model.properties(reflector)?;
        let read = |name: &str| {
            map.iter()
                .find_map(|(key, value)| (key == name).then(|| value.clone()))
        };

        let entries = encode_object(reflector, self.model.path, &properties, &read)?;

        Ok(Value::Map(entries))
    }

    fn decode(
        &self,
        reflector: &Reflector,
        _ctx: &FieldCtx,
        wire: &Value,
    ) -> Result<Value, MapError> {
        let map = wire.as_map().ok_or_else(|| {
            MapError::from(DataError::NotAnObject {
                model: self.model.path,
                found: wire.shape(),
            })
        })?;

        let properties = self.model.properties(reflector)?;
        let entries = decode_object(reflector, self.model.path, &properties, map)?;

        Ok(Value::Map(entries))
    }
}
