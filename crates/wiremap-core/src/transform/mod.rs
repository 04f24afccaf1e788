//! Transformer capability and the shared recursive conversion walk.
//!
//! Every conversion in the crate funnels through [`convert`]: one algorithm,
//! parameterized by direction, with transformers plugged in at the leaves.
//! Nested models, lists of models, and maps of models need no special cases
//! here; the nested transformer re-enters the walk with the inner model's
//! property list.

mod nested;
mod timestamp;
mod url;

pub use nested::NestedTransform;
pub use timestamp::TimestampTransform;
pub use url::UrlTransform;

use crate::{
    error::{DataError, MapError},
    model::FieldKind,
    property::{NumberCoerceError, Property, PropertyType},
    reflect::Reflector,
    value::{Value, ValueShape},
};

///
/// FieldCtx
///
/// Location of the value being converted, for error attribution. Nested
/// conversion replaces the context with the inner model's, so a failure three
/// levels deep names the innermost property.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldCtx {
    pub model: &'static str,
    pub property: &'static str,
}

impl FieldCtx {
    fn mismatch(&self, expected: impl Into<String>, found: ValueShape) -> MapError {
        DataError::TypeMismatch {
            model: self.model,
            property: self.property.to_string(),
            expected: expected.into(),
            found,
        }
        .into()
    }

    pub(crate) fn malformed(&self, detail: impl Into<String>) -> MapError {
        DataError::MalformedValue {
            model: self.model,
            property: self.property.to_string(),
            detail: detail.into(),
        }
        .into()
    }
}

///
/// Transform
///
/// Capability converting between a wire representation and a property's
/// native representation. Implementations are stateless and reentrant;
/// one instance may be shared by many properties across many models.
///

pub trait Transform: Send + Sync {
    /// Stable identity of the concrete transformer kind.
    /// Two `transformable` property types are equal only if this matches.
    fn kind_id(&self) -> &'static str;

    /// Whether this transformer claims the declared kind (forward direction).
    fn supports(&self, kind: &FieldKind) -> bool;

    /// Native-shaped value → wire-shaped value.
    fn encode(
        &self,
        reflector: &Reflector,
        ctx: &FieldCtx,
        native: &Value,
    ) -> Result<Value, MapError>;

    /// Wire-shaped value → native-shaped value.
    fn decode(
        &self,
        reflector: &Reflector,
        ctx: &FieldCtx,
        wire: &Value,
    ) -> Result<Value, MapError>;
}

///
/// Direction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Decode,
    Encode,
}

/// Shared recursive conversion walk.
///
/// Null for a non-optional type is a mismatch here; nullable handling happens
/// at the per-property layer before the walk is entered.
pub(crate) fn convert(
    reflector: &Reflector,
    ctx: &FieldCtx,
    ty: &PropertyType,
    value: &Value,
    direction: Direction,
) -> Result<Value, MapError> {
    match ty {
        PropertyType::Optional(wrapped) => {
            if value.is_null() {
                Ok(Value::Null)
            } else {
                convert(reflector, ctx, wrapped, value, direction)
            }
        }
        PropertyType::List(element) => {
            let items = value
                .as_list()
                .ok_or_else(|| ctx.mismatch(ty.label(), value.shape()))?;
            let items = items
                .iter()
                .map(|item| convert(reflector, ctx, element, item, direction))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Value::List(items))
        }
        PropertyType::Map(inner) => {
            let entries = value
                .as_map()
                .ok_or_else(|| ctx.mismatch(ty.label(), value.shape()))?;
            let entries = entries
                .iter()
                .map(|(key, item)| {
                    Ok((key.clone(), convert(reflector, ctx, inner, item, direction)?))
                })
                .collect::<Result<Vec<_>, MapError>>()?;

            Ok(Value::Map(entries))
        }
        PropertyType::Bool => value
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| ctx.mismatch("bool", value.shape())),
        PropertyType::Text => value
            .as_text()
            .map(|s| Value::Text(s.to_string()))
            .ok_or_else(|| ctx.mismatch("string", value.shape())),
        PropertyType::AnyValue => Ok(value.clone()),
        PropertyType::Number(kind) => {
            let number = value
                .as_number()
                .ok_or_else(|| ctx.mismatch(format!("number ({kind})"), value.shape()))?;

            kind.coerce(number).map(Value::Number).map_err(|e| match e {
                NumberCoerceError::NonIntegralFloat => {
                    ctx.mismatch(format!("integral number ({kind})"), ValueShape::Number)
                }
                NumberCoerceError::OutOfRange => DataError::NumberOutOfRange {
                    model: ctx.model,
                    property: ctx.property.to_string(),
                    kind: *kind,
                    found: number.to_string(),
                }
                .into(),
            })
        }
        PropertyType::Transformable { transformer, .. } => match direction {
            Direction::Decode => transformer.decode(reflector, ctx, value),
            Direction::Encode => transformer.encode(reflector, ctx, value),
        },
        PropertyType::Unknown(name) => Err(ctx.malformed(format!("unclassified type `{name}`"))),
    }
}

/// Encode one object's properties from a native field reader, in declaration
/// order, keyed by wire name. Absent optional values become wire-null.
pub(crate) fn encode_object(
    reflector: &Reflector,
    model: &'static str,
    properties: &[Property],
    read: &dyn Fn(&str) -> Option<Value>,
) -> Result<Vec<(String, Value)>, MapError> {
    let mut entries = Vec::with_capacity(properties.len());

    for property in properties {
        let ctx = FieldCtx {
            model,
            property: property.name,
        };

        let native = read(property.name).unwrap_or(Value::Null);
        let wire = if native.is_null() && property.accepts_null() {
            Value::Null
        } else {
            convert(reflector, &ctx, &property.ty, &native, Direction::Encode)?
        };

        entries.push((property.wire_name.clone(), wire));
    }

    Ok(entries)
}

/// Decode one object's properties from a wire map into native field entries,
/// applying the missing-key / wire-null policy per property.
pub(crate) fn decode_object(
    reflector: &Reflector,
    model: &'static str,
    properties: &[Property],
    wire_map: &[(String, Value)],
) -> Result<Vec<(String, Value)>, MapError> {
    let mut entries = Vec::with_capacity(properties.len());

    for property in properties {
        let ctx = FieldCtx {
            model,
            property: property.name,
        };

        let wire = wire_map
            .iter()
            .find_map(|(key, value)| (*key == property.wire_name).then_some(value));

        match wire {
            None => {
                if !property.accepts_null() {
                    return Err(DataError::MissingRequiredKey {
                        model,
                        property: property.name.to_string(),
                        wire_name: property.wire_name.clone(),
                    }
                    .into());
                }
                // Absent and permitted: the field keeps its default.
            }
            Some(Value::Null) => {
                if !property.accepts_null() {
                    return Err(DataError::NullNotAllowed {
                        model,
                        property: property.name.to_string(),
                    }
                    .into());
                }
            }
            Some(value) => {
                let native = convert(reflector, &ctx, &property.ty, value, Direction::Decode)?;
                entries.push((property.name.to_string(), native));
            }
        }
    }

    Ok(entries)
}
