use crate::{
    config::PropertyConfig,
    error::{DataError, SchemaError},
    model::ModelSchema,
    types::Timestamp,
    value::{Number, Value},
};
use std::collections::BTreeMap;
use url::Url;

// ============================================================================
// MODEL CONTRACT
// ============================================================================
//
// These traits describe what a consumer must implement for a type to be
// reflectable; everything else in the crate is derived from them.
//

///
/// Reflectable
///
/// The model declaration contract: a default constructor, a static ordered
/// schema, named field access in generic-value space, and optional
/// configuration/lifecycle hooks.
///
/// `field`/`set_field` speak *native-shaped* values: scalars in their declared
/// numeric kind, nested models as field-keyed maps. Wire-side renames and
/// transformer formats never appear at this boundary; the reflector applies
/// those during conversion.
///

pub trait Reflectable: Default + Send + Sync + Sized + 'static {
    /// Fully-qualified model path, for diagnostics and dispatch.
    const PATH: &'static str;

    /// Ordered field declaration. Base-model fields come first when a schema
    /// is composed via [`ModelSchema::extending`].
    fn schema() -> &'static ModelSchema;

    /// Declarative per-property options (ignored/nullable/renamed/transformed).
    fn configure(_config: &mut PropertyConfig) -> Result<(), SchemaError> {
        Ok(())
    }

    /// Read one field as a native-shaped value. `None` for unknown names.
    fn field(&self, name: &str) -> Option<Value>;

    /// Write one decoded native-shaped value. Returns false for unknown names
    /// or values the field cannot hold.
    fn set_field(&mut self, name: &str, value: Value) -> bool;

    /// Runs after `to_generic`, before the value is handed to the codec.
    fn after_serialize(&self, _raw: &mut Value) {}

    /// Runs after `from_generic` has assigned every field.
    fn after_deserialize(&mut self, _raw: &Value) {}

    /// Domain validation hook; runs last during `from_generic`.
    fn validate(&self) -> Result<(), DataError> {
        Ok(())
    }

    /// Render the instance as a field-keyed native map.
    ///
    /// This is the encode-side bridge nested composition is built on.
    fn to_native(&self) -> Value {
        let entries = Self::schema()
            .fields
            .iter()
            .map(|f| {
                (
                    f.name.to_string(),
                    self.field(f.name).unwrap_or(Value::Null),
                )
            })
            .collect();

        Value::Map(entries)
    }

    /// Rebuild an instance from a field-keyed native map whose values were
    /// already decoded. Unlisted fields keep their defaults.
    fn from_native(value: &Value) -> Option<Self> {
        let map = value.as_map()?;
        let mut instance = Self::default();

        for (name, field_value) in map {
            if field_value.is_null() {
                continue;
            }
            if !instance.set_field(name, field_value.clone()) {
                return None;
            }
        }

        Some(instance)
    }
}

// ============================================================================
// FIELD VALUES
// ============================================================================

///
/// FieldValue
///
/// Conversion boundary between a concrete field type and the generic value
/// tree. Model accessors are written in terms of these impls.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(ToString::to_string)
    }
}

macro_rules! impl_field_value_for_signed {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::Number(Number::Int(i64::from(*self)))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    <$type>::try_from(value.as_number()?.as_i64()?).ok()
                }
            }
        )*
    };
}

macro_rules! impl_field_value_for_unsigned {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::Number(Number::Uint(u64::from(*self)))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    <$type>::try_from(value.as_number()?.as_u64()?).ok()
                }
            }
        )*
    };
}

impl_field_value_for_signed!(i8, i16, i32, i64);
impl_field_value_for_unsigned!(u8, u16, u32, u64);

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Number(Number::Float(*self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.as_number()?.as_f64())
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Number(Number::Float(f64::from(*self)))
    }

    #[expect(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.as_number()?.as_f64() as Self)
    }
}

impl FieldValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::Number(Number::Uint(self.get()))
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number()?.as_u64().map(Self::from_seconds)
    }
}

impl FieldValue for Url {
    fn to_value(&self) -> Value {
        Value::Text(self.as_str().to_string())
    }

    fn from_value(value: &Value) -> Option<Self> {
        Self::parse(value.as_text()?).ok()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_list()?.iter().map(T::from_value).collect()
    }
}

impl<T: FieldValue> FieldValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_map()?
            .iter()
            .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
            .collect()
    }
}
