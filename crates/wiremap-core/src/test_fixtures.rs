//! Shared test-only models.
//!
//! Integration tests under `tests/` define their own models through the
//! public macro; these fixtures exist for in-crate unit tests.

use crate::model::FieldKind;

crate::reflect_model! {
    path = "test_fixtures::Engine",
    pub(crate) struct Engine {
        name: String => FieldKind::Text,
        displacement: u32 => FieldKind::Uint32,
    }
}
