//! Declared model schemas.
//!
//! This module contains the *declaration-side* representation of a model:
//! what fields exist, in what order, and what shape each one claims. The
//! runtime projection (classified [`Property`](crate::property::Property)
//! lists) is derived from these descriptors by the reflector.
//!
//! In general:
//! - `model` defines *what the author declared*
//! - `property` defines *what runs*

use crate::{
    error::SchemaError,
    property::Property,
    reflect::Reflector,
    traits::Reflectable,
};
use std::{fmt, sync::Arc};

///
/// FieldModel
/// One declared stored field: name plus declared shape.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldModel {
    /// Field name as used by accessors and configuration.
    pub name: &'static str,
    /// Declared shape (no runtime classification).
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

///
/// FieldKind
///
/// Declaration-side type surface. Closed; a kind the classifier cannot place
/// is only legal when a transformer claims it.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    // Scalar primitives
    Bool,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Text,
    Uint8,
    Uint16,
    Uint32,
    Uint64,

    // Transformed scalars
    Timestamp,
    Url,

    // Untyped passthrough
    Any,

    // Structure
    List(Box<Self>),
    Map(Box<Self>),
    Optional(Box<Self>),

    /// Nested reflectable model.
    Model(ModelRef),

    /// Marker for declared types the core cannot classify.
    /// Only legal when a configured transformer claims the field.
    Opaque(&'static str),
}

impl FieldKind {
    /// Human-readable label used in diagnostics.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Bool => "bool".to_string(),
            Self::Float32 => "float32".to_string(),
            Self::Float64 => "float64".to_string(),
            Self::Int8 => "int8".to_string(),
            Self::Int16 => "int16".to_string(),
            Self::Int32 => "int32".to_string(),
            Self::Int64 => "int64".to_string(),
            Self::Text => "text".to_string(),
            Self::Uint8 => "uint8".to_string(),
            Self::Uint16 => "uint16".to_string(),
            Self::Uint32 => "uint32".to_string(),
            Self::Uint64 => "uint64".to_string(),
            Self::Timestamp => "timestamp".to_string(),
            Self::Url => "url".to_string(),
            Self::Any => "any".to_string(),
            Self::List(e) => format!("list<{}>", e.label()),
            Self::Map(v) => format!("map<{}>", v.label()),
            Self::Optional(w) => format!("optional<{}>", w.label()),
            Self::Model(m) => format!("model<{}>", m.path),
            Self::Opaque(name) => format!("opaque<{name}>"),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

///
/// ModelRef
///
/// Type-erased handle to a nested reflectable model. Carries the concrete
/// type's derivation entry point so classification stays non-generic while
/// nested conversion still reaches the right property list.
///

#[derive(Clone, Copy)]
pub struct ModelRef {
    /// Fully-qualified model path (for dispatch and diagnostics).
    pub path: &'static str,
    properties: fn(&Reflector) -> Result<Arc<[Property]>, SchemaError>,
}

impl ModelRef {
    #[must_use]
    pub fn of<T: Reflectable>() -> Self {
        Self {
            path: T::PATH,
            properties: derive_entry::<T>,
        }
    }

    /// Derive (or fetch cached) properties for the referenced model.
    pub fn properties(&self, reflector: &Reflector) -> Result<Arc<[Property]>, SchemaError> {
        (self.properties)(reflector)
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRef").field("path", &self.path).finish()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

fn derive_entry<T: Reflectable>(reflector: &Reflector) -> Result<Arc<[Property]>, SchemaError> {
    reflector.reflect::<T>()
}

///
/// ModelSchema
/// Ordered field declaration for one model.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ModelSchema {
    /// Fully-qualified model path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Ordered field list (authoritative for derivation and wire key order).
    pub fields: Vec<FieldModel>,
}

impl ModelSchema {
    #[must_use]
    pub const fn new(path: &'static str, fields: Vec<FieldModel>) -> Self {
        Self { path, fields }
    }

    /// Compose a derived model's schema: base fields first, own fields after.
    ///
    /// This is the whole inheritance story; there is no chain to walk at
    /// runtime, so base/derived field ordering is fixed at declaration time.
    #[must_use]
    pub fn extending(path: &'static str, base: &Self, own: Vec<FieldModel>) -> Self {
        let mut fields = base.fields.clone();
        fields.extend(own);

        Self { path, fields }
    }

    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }
}
