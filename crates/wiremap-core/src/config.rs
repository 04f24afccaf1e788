//! Per-model property configuration.
//!
//! A model's `configure` hook writes declarative options into a
//! [`PropertyConfig`]; mutual-exclusion invariants are enforced at write
//! time, and cross-field checks (existence, wire-name conflicts against
//! unconfigured fields) run during derivation where the full schema is
//! visible.

use crate::{
    error::{ConfigOptionKind, SchemaError},
    transform::Transform,
};
use std::{fmt, sync::Arc};

///
/// PropertyOptions
///
/// Declared option set for one property. Built fluently; a default instance
/// declares nothing.
///

#[derive(Clone, Default)]
pub struct PropertyOptions {
    pub ignored: bool,
    pub nullable: bool,
    pub wire_name: Option<String>,
    pub transformer: Option<Arc<dyn Transform>>,
}

impl PropertyOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude the property from mapping entirely.
    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Permit wire-null to map to the field default instead of raising.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Use a different key in the wire representation.
    #[must_use]
    pub fn renamed(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    /// Delegate conversion to a custom transformer.
    #[must_use]
    pub fn transformed(mut self, transformer: Arc<dyn Transform>) -> Self {
        self.transformer = Some(transformer);
        self
    }
}

impl fmt::Debug for PropertyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyOptions")
            .field("ignored", &self.ignored)
            .field("nullable", &self.nullable)
            .field("wire_name", &self.wire_name)
            .field("transformed", &self.transformer.is_some())
            .finish()
    }
}

///
/// PropertyConfig
///
/// Mutable, validated option table for one model. Entries keep insertion
/// order so derivation-time validation reports failures deterministically.
///

pub struct PropertyConfig {
    model: &'static str,
    entries: Vec<(String, PropertyOptions)>,
}

impl PropertyConfig {
    #[must_use]
    pub const fn new(model: &'static str) -> Self {
        Self {
            model,
            entries: Vec::new(),
        }
    }

    /// Model path this configuration belongs to.
    #[must_use]
    pub const fn model(&self) -> &'static str {
        self.model
    }

    /// Declare options for one property.
    ///
    /// Validates mutual-exclusion invariants against the live snapshot.
    /// A repeated `set` for the same property replaces the earlier entry.
    pub fn set(
        &mut self,
        property: impl Into<String>,
        options: PropertyOptions,
    ) -> Result<(), SchemaError> {
        let property = property.into();

        if options.ignored && options.transformer.is_some() {
            return Err(SchemaError::ExclusiveOptions {
                model: self.model,
                property,
                first: ConfigOptionKind::Ignored,
                second: ConfigOptionKind::Transformed,
            });
        }

        if options.ignored && options.wire_name.is_some() {
            return Err(SchemaError::ExclusiveOptions {
                model: self.model,
                property,
                first: ConfigOptionKind::Ignored,
                second: ConfigOptionKind::Renamed,
            });
        }

        if let Some(wire_name) = &options.wire_name {
            if let Some((claimed_by, _)) = self
                .entries
                .iter()
                .find(|(name, o)| *name != property && o.wire_name.as_ref() == Some(wire_name))
            {
                return Err(SchemaError::WireNameConflict {
                    model: self.model,
                    wire_name: wire_name.clone(),
                    properties: vec![claimed_by.clone(), property],
                });
            }
        }

        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == property) {
            entry.1 = options;
        } else {
            self.entries.push((property, options));
        }

        Ok(())
    }

    /// Declared options for one property, or `None` if nothing was declared.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&PropertyOptions> {
        self.entries
            .iter()
            .find_map(|(name, options)| (name == property).then_some(options))
    }

    /// All declared entries, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PropertyOptions)> {
        self.entries
            .iter()
            .map(|(name, options)| (name.as_str(), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigOptionKind, SchemaError};

    #[test]
    fn ignored_and_transformed_are_exclusive() {
        let mut cfg = PropertyConfig::new("tests::Widget");
        let err = cfg
            .set(
                "serial",
                PropertyOptions::new()
                    .ignored()
                    .transformed(std::sync::Arc::new(crate::transform::TimestampTransform)),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            SchemaError::ExclusiveOptions {
                first: ConfigOptionKind::Ignored,
                second: ConfigOptionKind::Transformed,
                ..
            }
        ));
    }

    #[test]
    fn ignored_and_renamed_are_exclusive() {
        let mut cfg = PropertyConfig::new("tests::Widget");
        let err = cfg
            .set("serial", PropertyOptions::new().ignored().renamed("sn"))
            .unwrap_err();

        assert!(matches!(
            err,
            SchemaError::ExclusiveOptions {
                first: ConfigOptionKind::Ignored,
                second: ConfigOptionKind::Renamed,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_wire_name_is_rejected_at_write_time() {
        let mut cfg = PropertyConfig::new("tests::Widget");
        cfg.set("a", PropertyOptions::new().renamed("key")).unwrap();

        let err = cfg
            .set("b", PropertyOptions::new().renamed("key"))
            .unwrap_err();

        match err {
            SchemaError::WireNameConflict {
                wire_name,
                properties,
                ..
            } => {
                assert_eq!(wire_name, "key");
                assert_eq!(properties, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn repeated_set_replaces() {
        let mut cfg = PropertyConfig::new("tests::Widget");
        cfg.set("a", PropertyOptions::new().renamed("one")).unwrap();
        cfg.set("a", PropertyOptions::new().nullable()).unwrap();

        let options = cfg.get("a").unwrap();
        assert!(options.nullable);
        assert!(options.wire_name.is_none());
    }
}
