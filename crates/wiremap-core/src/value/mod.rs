mod wire;

#[cfg(test)]
mod tests;

use std::fmt;
use thiserror::Error as ThisError;

///
/// MapValueError
///
/// Invariant violations for `Value::Map` construction.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MapValueError {
    #[error("map contains duplicate key `{key}` at positions {left_index} and {right_index}")]
    DuplicateKey {
        key: String,
        left_index: usize,
        right_index: usize,
    },
}

///
/// Value
///
/// Generic wire tree exchanged between typed models and serialized bytes.
///
/// Null  → absent/explicit-null wire value.
/// Map   → string-keyed object; entry order is insertion order and is
///         preserved end to end so encode output is reproducible.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    /// Ordered list of values.
    List(Vec<Self>),
    /// String-keyed object representation.
    ///
    /// - Entry order is insertion order; encoding never reorders keys.
    /// - Keys are unique; duplicate-key construction is rejected.
    Map(Vec<(String, Self)>),
    Null,
    Number(Number),
    Text(String),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from a list literal.
    ///
    /// Intended for tests and inline construction.
    /// Requires `Clone` because items are borrowed.
    pub fn from_slice<T>(items: &[T]) -> Self
    where
        T: Into<Self> + Clone,
    {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::Map` from owned entries, preserving entry order.
    ///
    /// Duplicate keys are rejected; order is never normalized.
    pub fn from_map(entries: Vec<(String, Self)>) -> Result<Self, MapValueError> {
        Self::validate_map_entries(&entries)?;
        Ok(Self::Map(entries))
    }

    /// Validate map entry invariants without changing order.
    pub fn validate_map_entries(entries: &[(String, Self)]) -> Result<(), MapValueError> {
        for (right_index, (key, _)) in entries.iter().enumerate() {
            if let Some(left_index) = entries[..right_index].iter().position(|(k, _)| k == key) {
                return Err(MapValueError::DuplicateKey {
                    key: key.clone(),
                    left_index,
                    right_index,
                });
            }
        }

        Ok(())
    }

    ///
    /// TYPES
    ///

    /// Structural shape of this value, for diagnostics and mismatch errors.
    #[must_use]
    pub const fn shape(&self) -> ValueShape {
        match self {
            Self::Bool(_) => ValueShape::Bool,
            Self::List(_) => ValueShape::List,
            Self::Map(_) => ValueShape::Map,
            Self::Null => ValueShape::Null,
            Self::Number(_) => ValueShape::Number,
            Self::Text(_) => ValueShape::Text,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self { Some(*b) } else { None }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&[(String, Self)]> {
        if let Self::Map(entries) = self {
            Some(entries.as_slice())
        } else {
            None
        }
    }

    /// Look up a map entry by key; `None` for non-map values too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map()?
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl TryFrom<Vec<(String, Self)>> for Value {
    type Error = MapValueError;

    fn try_from(entries: Vec<(String, Self)>) -> Result<Self, Self::Error> {
        Self::from_map(entries)
    }
}

macro_rules! impl_value_from_number {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::Number(Number::$variant(v.into()))
                }
            }
        )*
    };
}

impl_value_from_number! {
    i8  => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8  => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    f32 => Float,
    f64 => Float,
}

///
/// Number
///
/// Wire-side numeric value, preserving the representation the payload used.
/// Equality is numeric across the two integer variants so a wire `1988`
/// compares equal whether it arrived signed or unsigned.
///

#[derive(Clone, Copy, Debug)]
pub enum Number {
    Float(f64),
    Int(i64),
    Uint(u64),
}

impl Number {
    /// Exact signed view; `None` when the value does not fit.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Uint(u) if *u <= i64::MAX as u64 => Some(*u as i64),
            _ => None,
        }
    }

    /// Exact unsigned view; `None` for negatives and floats.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(u) => Some(*u),
            Self::Int(i) if *i >= 0 => Some(*i as u64),
            _ => None,
        }
    }

    /// Widening float view; always available.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::Float(f) => *f,
            Self::Int(i) => *i as f64,
            Self::Uint(u) => *u as f64,
        }
    }

    /// Returns true for a float with no fractional part that fits an integer
    /// round trip.
    #[must_use]
    pub fn is_integral_float(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite() && f.fract() == 0.0,
            Self::Int(_) | Self::Uint(_) => false,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Int(a), Self::Uint(b)) | (Self::Uint(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

///
/// ValueShape
///
/// Stable shape taxonomy for mismatch diagnostics.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueShape {
    Bool,
    List,
    Map,
    Null,
    Number,
    Text,
}

impl ValueShape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::List => "list",
            Self::Map => "object",
            Self::Null => "null",
            Self::Number => "number",
            Self::Text => "string",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
