//! The reflector: schema derivation, the per-type property cache, and the
//! bidirectional conversion entry points.

use crate::{
    config::PropertyConfig,
    error::{ConfigOptionKind, DataError, MapError, SchemaError},
    obs::{MapEvent, sink},
    property::{Property, PropertyType, classify},
    traits::Reflectable,
    transform::{decode_object, encode_object},
    value::Value,
};
use parking_lot::Mutex;
use std::{any::TypeId, collections::HashMap, sync::Arc};

///
/// Reflector
///
/// Owns the process-lifetime `type → [Property]` cache. Derivation is pure
/// and idempotent, so the lock only exists to keep check-derive-insert atomic
/// when multiple threads reflect the same type before the cache is warm.
/// Callers hold and share a `Reflector` explicitly; there is no implicit
/// global instance.
///

#[derive(Default)]
pub struct Reflector {
    cache: Mutex<HashMap<TypeId, Arc<[Property]>>>,
}

impl Reflector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive (or fetch cached) the ordered property list for `T`.
    ///
    /// The first call for a type runs the full derivation pipeline; every
    /// later call returns the same shared list.
    pub fn reflect<T: Reflectable>(&self) -> Result<Arc<[Property]>, SchemaError> {
        let key = TypeId::of::<T>();

        let mut cache = self.cache.lock();
        if let Some(properties) = cache.get(&key) {
            return Ok(Arc::clone(properties));
        }

        let properties: Arc<[Property]> = derive::<T>()?.into();
        cache.insert(key, Arc::clone(&properties));
        drop(cache);

        sink::record(MapEvent::SchemaDerived { model: T::PATH });

        Ok(properties)
    }

    /// Convert a model instance into its generic wire value.
    ///
    /// Output keys follow declaration order; absent optional values become
    /// wire-null.
    pub fn to_generic<T: Reflectable>(&self, instance: &T) -> Result<Value, MapError> {
        let properties = self.reflect::<T>()?;

        let read = |name: &str| instance.field(name);
        let entries = encode_object(self, T::PATH, &properties, &read)?;

        let mut raw = Value::Map(entries);
        instance.after_serialize(&mut raw);

        sink::record(MapEvent::Encode { model: T::PATH });

        Ok(raw)
    }

    /// Construct a model instance from a generic wire value.
    pub fn from_generic<T: Reflectable>(&self, value: &Value) -> Result<T, MapError> {
        let properties = self.reflect::<T>()?;
        let result = build_instance::<T>(self, &properties, value);

        sink::record(match &result {
            Ok(_) => MapEvent::Decode { model: T::PATH },
            Err(_) => MapEvent::DecodeFailed { model: T::PATH },
        });

        result
    }
}

fn build_instance<T: Reflectable>(
    reflector: &Reflector,
    properties: &[Property],
    value: &Value,
) -> Result<T, MapError> {
    let wire_map = value.as_map().ok_or(DataError::NotAnObject {
        model: T::PATH,
        found: value.shape(),
    })?;

    let mut instance = T::default();

    for (name, native) in decode_object(reflector, T::PATH, properties, wire_map)? {
        if !instance.set_field(&name, native) {
            return Err(DataError::MalformedValue {
                model: T::PATH,
                property: name,
                detail: "field accessor rejected the decoded value".to_string(),
            }
            .into());
        }
    }

    instance.after_deserialize(value);
    instance.validate()?;

    Ok(instance)
}

///
/// Derivation
///
/// Cross-validation runs in a fixed order so a broken declaration always
/// reports the same failure: unknown configured names first, then wire-name
/// conflicts over the full field list, then per-field classification.
/// Exclusive option combinations were already rejected when the
/// configuration was written.
///

fn derive<T: Reflectable>() -> Result<Vec<Property>, SchemaError> {
    let schema = T::schema();

    let mut config = PropertyConfig::new(T::PATH);
    T::configure(&mut config)?;

    for (name, options) in config.entries() {
        if schema.field(name).is_none() {
            return Err(SchemaError::UnknownProperty {
                model: T::PATH,
                property: name.to_string(),
                option: leading_option(options),
            });
        }
    }

    let wire_names: Vec<(String, &'static str)> = schema
        .fields
        .iter()
        .filter(|field| !config.get(field.name).is_some_and(|o| o.ignored))
        .map(|field| (resolve_wire_name(&config, field.name), field.name))
        .collect();

    for (wire_name, _) in &wire_names {
        let colliding: Vec<String> = wire_names
            .iter()
            .filter(|(w, _)| w == wire_name)
            .map(|(_, name)| (*name).to_string())
            .collect();

        if colliding.len() > 1 {
            return Err(SchemaError::WireNameConflict {
                model: T::PATH,
                wire_name: wire_name.clone(),
                properties: colliding,
            });
        }
    }

    let mut properties = Vec::with_capacity(wire_names.len());

    for field in &schema.fields {
        let options = config.get(field.name);
        if options.is_some_and(|o| o.ignored) {
            continue;
        }

        let declared = options.and_then(|o| o.transformer.as_ref());
        let ty = classify(&field.kind, declared);

        if ty.contains_unknown() {
            return Err(SchemaError::UnsupportedPropertyType {
                model: T::PATH,
                property: field.name.to_string(),
                kind: field.kind.label(),
            });
        }

        let transformer = match &ty {
            PropertyType::Transformable { transformer, .. } => Some(Arc::clone(transformer)),
            _ => None,
        };

        properties.push(Property {
            name: field.name,
            wire_name: resolve_wire_name(&config, field.name),
            ty,
            nullable: options.is_some_and(|o| o.nullable),
            transformer,
        });
    }

    Ok(properties)
}

fn resolve_wire_name(config: &PropertyConfig, field: &str) -> String {
    config
        .get(field)
        .and_then(|o| o.wire_name.clone())
        .unwrap_or_else(|| field.to_string())
}

const fn leading_option(options: &crate::config::PropertyOptions) -> ConfigOptionKind {
    if options.ignored {
        ConfigOptionKind::Ignored
    } else if options.transformer.is_some() {
        ConfigOptionKind::Transformed
    } else if options.wire_name.is_some() {
        ConfigOptionKind::Renamed
    } else {
        ConfigOptionKind::Nullable
    }
}
