//! Runtime property descriptors.
//!
//! [`Property`] and [`PropertyType`] are the classified projection of a
//! declared [`FieldModel`](crate::model::FieldModel): immutable, freely
//! shareable across threads, and cached per concrete model type by the
//! reflector.

use crate::{
    model::FieldKind,
    transform::{NestedTransform, TimestampTransform, Transform, UrlTransform},
    value::Number,
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

///
/// NumberKind
///
/// Exact numeric kind of a property, preserved for round-trip fidelity.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NumberKind {
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl NumberKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
        }
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        !matches!(self, Self::Float32 | Self::Float64)
    }

    /// Coerce a wire number into this kind.
    ///
    /// Integer targets accept integers in range and integral floats only;
    /// float targets widen from any integer. Non-integral floats never land
    /// in an integer kind.
    pub(crate) fn coerce(self, number: Number) -> Result<Number, NumberCoerceError> {
        match self {
            Self::Float64 => Ok(Number::Float(number.as_f64())),
            Self::Float32 => {
                #[expect(clippy::cast_possible_truncation)]
                let narrowed = number.as_f64() as f32;
                if number.as_f64().is_finite() && !narrowed.is_finite() {
                    return Err(NumberCoerceError::OutOfRange);
                }

                Ok(Number::Float(f64::from(narrowed)))
            }
            _ => {
                let candidate = integral_value(number)?;
                self.check_integer_range(candidate)?;

                Ok(self.integer_number(candidate))
            }
        }
    }

    /// Normalize an in-range integral candidate to this kind's wire variant.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    const fn integer_number(self, candidate: i128) -> Number {
        if matches!(self, Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64) {
            Number::Uint(candidate as u64)
        } else {
            Number::Int(candidate as i64)
        }
    }

    fn check_integer_range(self, candidate: i128) -> Result<(), NumberCoerceError> {
        let (min, max) = match self {
            Self::Int8 => (i128::from(i8::MIN), i128::from(i8::MAX)),
            Self::Int16 => (i128::from(i16::MIN), i128::from(i16::MAX)),
            Self::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
            Self::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
            Self::Uint8 => (0, i128::from(u8::MAX)),
            Self::Uint16 => (0, i128::from(u16::MAX)),
            Self::Uint32 => (0, i128::from(u32::MAX)),
            Self::Uint64 => (0, i128::from(u64::MAX)),
            Self::Float32 | Self::Float64 => return Ok(()),
        };

        if (min..=max).contains(&candidate) {
            Ok(())
        } else {
            Err(NumberCoerceError::OutOfRange)
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract an exact integral value from a wire number.
fn integral_value(number: Number) -> Result<i128, NumberCoerceError> {
    match number {
        Number::Int(i) => Ok(i128::from(i)),
        Number::Uint(u) => Ok(i128::from(u)),
        Number::Float(f) => {
            if !number.is_integral_float() {
                return Err(NumberCoerceError::NonIntegralFloat);
            }
            // Integral, finite floats are exactly representable well inside
            // the i128 range the kinds can reach.
            #[expect(clippy::cast_possible_truncation)]
            let candidate = f as i128;

            Ok(candidate)
        }
    }
}

///
/// NumberCoerceError
/// Internal coercion failure; the walk attaches model/property context.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NumberCoerceError {
    NonIntegralFloat,
    OutOfRange,
}

///
/// PropertyType
///
/// Closed recursive classification of a property's shape.
///
/// `Unknown` is an illegal terminal state: derivation rejects it unless a
/// transformer claimed the declared kind first.
///

#[derive(Clone)]
pub enum PropertyType {
    AnyValue,
    Bool,
    List(Box<Self>),
    Map(Box<Self>),
    Number(NumberKind),
    Optional(Box<Self>),
    Text,
    Transformable {
        transformer: Arc<dyn Transform>,
        target: String,
    },
    Unknown(&'static str),
}

impl PropertyType {
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns true if any nested position is an unresolved `Unknown`.
    #[must_use]
    pub fn contains_unknown(&self) -> bool {
        match self {
            Self::Unknown(_) => true,
            Self::List(inner) | Self::Map(inner) | Self::Optional(inner) => {
                inner.contains_unknown()
            }
            _ => false,
        }
    }

    /// Human-readable label used in mismatch diagnostics.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::AnyValue => "any".to_string(),
            Self::Bool => "bool".to_string(),
            Self::List(e) => format!("list<{}>", e.label()),
            Self::Map(v) => format!("map<{}>", v.label()),
            Self::Number(kind) => format!("number ({kind})"),
            Self::Optional(w) => format!("optional<{}>", w.label()),
            Self::Text => "string".to_string(),
            Self::Transformable { transformer, target } => {
                format!("{target} (via {})", transformer.kind_id())
            }
            Self::Unknown(name) => format!("unknown<{name}>"),
        }
    }
}

impl PartialEq for PropertyType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AnyValue, Self::AnyValue)
            | (Self::Bool, Self::Bool)
            | (Self::Text, Self::Text) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::List(a), Self::List(b))
            | (Self::Map(a), Self::Map(b))
            | (Self::Optional(a), Self::Optional(b)) => a == b,
            // Transformable variants are equal only when the transformer is
            // the same concrete kind over the same target.
            (
                Self::Transformable {
                    transformer: ta,
                    target: a,
                },
                Self::Transformable {
                    transformer: tb,
                    target: b,
                },
            ) => ta.kind_id() == tb.kind_id() && a == b,
            (Self::Unknown(a), Self::Unknown(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

///
/// Property
///
/// Immutable descriptor for one reflectable field. Constructed once per
/// (model, field) pair during derivation and held in the reflector cache for
/// the process lifetime. Equality is by `name` (lookup identity).
///

#[derive(Clone)]
pub struct Property {
    /// Native field name.
    pub name: &'static str,
    /// Key used in the generic wire representation.
    pub wire_name: String,
    /// Classified shape.
    pub ty: PropertyType,
    /// Wire-null maps to the field default instead of raising.
    pub nullable: bool,
    /// Top-level transformer, when classification matched one.
    pub transformer: Option<Arc<dyn Transform>>,
}

impl Property {
    /// Returns true when an absent or null wire value is acceptable.
    #[must_use]
    pub const fn accepts_null(&self) -> bool {
        self.nullable || self.ty.is_optional()
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("wire_name", &self.wire_name)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

///
/// Classification
///
/// Ordered, first-match-wins mapping from a declared kind to a runtime
/// property type. A supplied transformer is consulted *before* structural
/// classification so a custom transformer can override a kind that would
/// otherwise classify as a plain scalar. Containers push the candidate
/// transformer inward so element/value positions get the same chance.
///

pub(crate) fn classify(kind: &FieldKind, candidate: Option<&Arc<dyn Transform>>) -> PropertyType {
    if let Some(transformer) = candidate {
        if transformer.supports(kind) {
            return PropertyType::Transformable {
                transformer: Arc::clone(transformer),
                target: kind.label(),
            };
        }
    }

    match kind {
        FieldKind::Bool => PropertyType::Bool,
        FieldKind::Any => PropertyType::AnyValue,
        FieldKind::Text => PropertyType::Text,
        FieldKind::Float32 => PropertyType::Number(NumberKind::Float32),
        FieldKind::Float64 => PropertyType::Number(NumberKind::Float64),
        FieldKind::Int8 => PropertyType::Number(NumberKind::Int8),
        FieldKind::Int16 => PropertyType::Number(NumberKind::Int16),
        FieldKind::Int32 => PropertyType::Number(NumberKind::Int32),
        FieldKind::Int64 => PropertyType::Number(NumberKind::Int64),
        FieldKind::Uint8 => PropertyType::Number(NumberKind::Uint8),
        FieldKind::Uint16 => PropertyType::Number(NumberKind::Uint16),
        FieldKind::Uint32 => PropertyType::Number(NumberKind::Uint32),
        FieldKind::Uint64 => PropertyType::Number(NumberKind::Uint64),
        FieldKind::List(element) => {
            PropertyType::List(Box::new(classify(element, candidate)))
        }
        FieldKind::Optional(wrapped) => {
            PropertyType::Optional(Box::new(classify(wrapped, candidate)))
        }
        FieldKind::Map(value) => PropertyType::Map(Box::new(classify(value, candidate))),
        FieldKind::Timestamp => PropertyType::Transformable {
            transformer: Arc::new(TimestampTransform),
            target: kind.label(),
        },
        FieldKind::Url => PropertyType::Transformable {
            transformer: Arc::new(UrlTransform),
            target: kind.label(),
        },
        FieldKind::Model(model) => PropertyType::Transformable {
            transformer: Arc::new(NestedTransform::new(*model)),
            target: model.path.to_string(),
        },
        FieldKind::Opaque(name) => PropertyType::Unknown(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::MapError,
        model::ModelRef,
        reflect::Reflector,
        test_fixtures::Engine,
        transform::FieldCtx,
        value::Value,
    };

    struct ShoutTransform;

    impl Transform for ShoutTransform {
        fn kind_id(&self) -> &'static str {
            "shout"
        }

        fn supports(&self, kind: &FieldKind) -> bool {
            matches!(kind, FieldKind::Text)
        }

        fn encode(
            &self,
            _reflector: &Reflector,
            _ctx: &FieldCtx,
            native: &Value,
        ) -> Result<Value, MapError> {
            Ok(native.clone())
        }

        fn decode(
            &self,
            _reflector: &Reflector,
            _ctx: &FieldCtx,
            wire: &Value,
        ) -> Result<Value, MapError> {
            Ok(wire.clone())
        }
    }

    #[test]
    fn transformer_match_precedes_structural_classification() {
        let shout: Arc<dyn Transform> = Arc::new(ShoutTransform);
        let ty = classify(&FieldKind::Text, Some(&shout));

        assert!(matches!(ty, PropertyType::Transformable { .. }));
        // Without the candidate, Text classifies structurally.
        assert_eq!(classify(&FieldKind::Text, None), PropertyType::Text);
    }

    #[test]
    fn containers_push_the_candidate_inward() {
        let shout: Arc<dyn Transform> = Arc::new(ShoutTransform);
        let kind = FieldKind::List(Box::new(FieldKind::Text));
        let ty = classify(&kind, Some(&shout));

        match ty {
            PropertyType::List(element) => {
                assert!(matches!(*element, PropertyType::Transformable { .. }));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn nested_model_gets_the_default_transformer() {
        let kind = FieldKind::List(Box::new(FieldKind::Map(Box::new(FieldKind::Model(
            ModelRef::of::<Engine>(),
        )))));
        let ty = classify(&kind, None);

        let PropertyType::List(inner) = ty else {
            panic!("expected list");
        };
        let PropertyType::Map(leaf) = *inner else {
            panic!("expected map");
        };
        match *leaf {
            PropertyType::Transformable { transformer, target } => {
                assert_eq!(transformer.kind_id(), "nested");
                assert_eq!(target, "test_fixtures::Engine");
            }
            other => panic!("expected transformable, got {other:?}"),
        }
    }

    #[test]
    fn unclaimed_opaque_stays_unknown() {
        let ty = classify(&FieldKind::Opaque("Blob"), None);
        assert!(ty.contains_unknown());

        let wrapped = classify(&FieldKind::Optional(Box::new(FieldKind::Opaque("Blob"))), None);
        assert!(wrapped.contains_unknown());
    }

    #[test]
    fn transformable_equality_follows_transformer_kind() {
        let shout: Arc<dyn Transform> = Arc::new(ShoutTransform);
        let a = classify(&FieldKind::Text, Some(&shout));
        let b = classify(&FieldKind::Text, Some(&shout));
        assert_eq!(a, b);

        let structural = classify(&FieldKind::Text, None);
        assert_ne!(a, structural);

        // Same target, different transformer kind: not equal.
        let ts = classify(&FieldKind::Timestamp, None);
        let url = classify(&FieldKind::Url, None);
        assert_ne!(ts, url);
    }

    #[test]
    fn property_equality_is_name_identity() {
        let a = Property {
            name: "year",
            wire_name: "year".to_string(),
            ty: PropertyType::Number(NumberKind::Int64),
            nullable: false,
            transformer: None,
        };
        let b = Property {
            name: "year",
            wire_name: "built".to_string(),
            ty: PropertyType::Text,
            nullable: true,
            transformer: None,
        };

        assert_eq!(a, b);
    }

    #[test]
    fn integer_kinds_reject_non_integral_floats() {
        assert_eq!(
            NumberKind::Int64.coerce(Number::Float(1988.5)),
            Err(NumberCoerceError::NonIntegralFloat)
        );
        assert_eq!(
            NumberKind::Int64.coerce(Number::Float(1988.0)),
            Ok(Number::Int(1988))
        );
    }

    #[test]
    fn integer_kinds_enforce_width() {
        assert_eq!(
            NumberKind::Int8.coerce(Number::Int(127)),
            Ok(Number::Int(127))
        );
        assert_eq!(
            NumberKind::Int8.coerce(Number::Int(128)),
            Err(NumberCoerceError::OutOfRange)
        );
        assert_eq!(
            NumberKind::Uint16.coerce(Number::Int(-1)),
            Err(NumberCoerceError::OutOfRange)
        );
        assert_eq!(
            NumberKind::Uint64.coerce(Number::Uint(u64::MAX)),
            Ok(Number::Uint(u64::MAX))
        );
    }

    #[test]
    fn float_kinds_widen_from_integers() {
        assert_eq!(
            NumberKind::Float64.coerce(Number::Int(3)),
            Ok(Number::Float(3.0))
        );
        assert_eq!(
            NumberKind::Float32.coerce(Number::Float(1.5)),
            Ok(Number::Float(1.5))
        );
        assert_eq!(
            NumberKind::Float32.coerce(Number::Float(f64::MAX)),
            Err(NumberCoerceError::OutOfRange)
        );
    }
}
