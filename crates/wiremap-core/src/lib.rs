//! Core mapping engine for Wiremap: model schemas, property derivation, the
//! reflector cache, transformers, and the generic value tree exchanged with
//! wire codecs.
#![warn(unreachable_pub)]

pub mod macros;

// public exports are one module level down
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod property;
pub mod reflect;
pub mod traits;
pub mod transform;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, codecs, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::{PropertyConfig, PropertyOptions},
        model::{FieldKind, FieldModel, ModelRef, ModelSchema},
        property::{NumberKind, Property, PropertyType},
        reflect::Reflector,
        traits::{FieldValue, Reflectable},
        value::{Number, Value},
    };
}
