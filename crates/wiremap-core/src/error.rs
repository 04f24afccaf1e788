use crate::{property::NumberKind, value::ValueShape};
use std::fmt;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Model-declaration failures, raised while deriving a type's property list.
/// Deterministic per type: every subsequent reflect/convert call for the same
/// model fails identically until the declaration is fixed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("model `{model}` has no property `{property}` (declared via {option})")]
    UnknownProperty {
        model: &'static str,
        property: String,
        option: ConfigOptionKind,
    },

    #[error("property `{property}` on `{model}` cannot combine {first} with {second}")]
    ExclusiveOptions {
        model: &'static str,
        property: String,
        first: ConfigOptionKind,
        second: ConfigOptionKind,
    },

    #[error(
        "properties [{}] on `{model}` all map to wire name `{wire_name}`",
        .properties.join(", ")
    )]
    WireNameConflict {
        model: &'static str,
        wire_name: String,
        properties: Vec<String>,
    },

    #[error("property `{property}` on `{model}` has unsupported kind {kind}")]
    UnsupportedPropertyType {
        model: &'static str,
        property: String,
        kind: String,
    },
}

///
/// ConfigOptionKind
///
/// Which declared option an invalid configuration entry came from.
/// Carried for diagnostics only.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigOptionKind {
    Ignored,
    Nullable,
    Renamed,
    Transformed,
}

impl ConfigOptionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Nullable => "nullable",
            Self::Renamed => "renamed",
            Self::Transformed => "transformed",
        }
    }
}

impl fmt::Display for ConfigOptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// DataError
///
/// Payload-shape failures, raised while converting one specific generic value.
/// A different payload for the same model may succeed; never conflated with
/// [`SchemaError`] so callers can route "fix the model" vs "bad payload".
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum DataError {
    #[error("`{model}` expects a wire object, found {found}")]
    NotAnObject {
        model: &'static str,
        found: ValueShape,
    },

    #[error("required key `{wire_name}` for property `{property}` on `{model}` is missing")]
    MissingRequiredKey {
        model: &'static str,
        property: String,
        wire_name: String,
    },

    #[error("property `{property}` on `{model}` is not nullable but received null")]
    NullNotAllowed {
        model: &'static str,
        property: String,
    },

    #[error("property `{property}` on `{model}` expects {expected}, found {found}")]
    TypeMismatch {
        model: &'static str,
        property: String,
        expected: String,
        found: ValueShape,
    },

    #[error("property `{property}` on `{model}` cannot hold {found} as {kind}")]
    NumberOutOfRange {
        model: &'static str,
        property: String,
        kind: NumberKind,
        found: String,
    },

    #[error("property `{property}` on `{model}` is malformed: {detail}")]
    MalformedValue {
        model: &'static str,
        property: String,
        detail: String,
    },

    #[error("`{model}` failed validation: {detail}")]
    Validation {
        model: &'static str,
        detail: String,
    },
}

///
/// MapError
///
/// Conversion surface error: either tier, never both. The two taxonomies stay
/// distinct end to end.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum MapError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl MapError {
    /// Returns true when the failure is a model-declaration bug rather than a
    /// payload problem.
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}
