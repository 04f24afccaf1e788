//! ## Crate layout
//! - `core`: model schemas, property derivation, the reflector, transformers,
//!   and the generic value tree.
//! - `codec`: the body-codec boundary consumed by request/response pipelines.
//! - `serialize`: JSON byte-level adapter for the generic value tree.
//!
//! The `prelude` module mirrors the surface used by model-declaring code.

pub use wiremap_core as core;

pub mod codec;
pub mod serialize;

// re-export the model definition macro at the facade root
pub use wiremap_core::reflect_model;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::codec::{BodyCodec, JsonCodec};
    pub use wiremap_core::{
        config::{PropertyConfig, PropertyOptions},
        model::{FieldKind, FieldModel, ModelRef, ModelSchema},
        reflect::Reflector,
        traits::{FieldValue as _, Reflectable as _},
        types::{Timestamp, Url},
        value::{Number, Value},
    };
}
