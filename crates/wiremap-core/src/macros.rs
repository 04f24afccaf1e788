//! Declarative model definition.

///
/// reflect_model
///
/// Define a reflectable model in one place: the struct, its ordered schema,
/// and name-based field accessors, for the common all-stored-fields case.
/// Models that need lifecycle hooks or a hand-rolled `Default` implement
/// [`Reflectable`](crate::traits::Reflectable) directly instead.
///
/// ```ignore
/// reflect_model! {
///     path = "demo::Car",
///     pub struct Car {
///         make: String => FieldKind::Text,
///         year: i64 => FieldKind::Int64,
///     },
///     config = |config| {
///         config.set("make", PropertyOptions::new().renamed("Make"))?;
///         Ok(())
///     }
/// }
/// ```
#[macro_export]
macro_rules! reflect_model {
    (
        path = $path:expr,
        $vis:vis struct $name:ident {
            $( $field:ident : $ftype:ty => $kind:expr ),+ $(,)?
        } $(,)?
    ) => {
        $crate::reflect_model! {
            path = $path,
            $vis struct $name {
                $( $field : $ftype => $kind ),+
            },
            config = |_config| { Ok(()) }
        }
    };

    (
        path = $path:expr,
        $vis:vis struct $name:ident {
            $( $field:ident : $ftype:ty => $kind:expr ),+ $(,)?
        },
        config = $config:expr $(,)?
    ) => {
        #[derive(Clone, Debug, Default, PartialEq)]
        $vis struct $name {
            $( pub $field : $ftype, )+
        }

        impl $crate::traits::Reflectable for $name {
            const PATH: &'static str = $path;

            fn schema() -> &'static $crate::model::ModelSchema {
                static SCHEMA: std::sync::LazyLock<$crate::model::ModelSchema> =
                    std::sync::LazyLock::new(|| {
                        $crate::model::ModelSchema::new(
                            $path,
                            vec![
                                $(
                                    $crate::model::FieldModel::new(stringify!($field), $kind),
                                )+
                            ],
                        )
                    });

                &SCHEMA
            }

            fn configure(
                config: &mut $crate::config::PropertyConfig,
            ) -> Result<(), $crate::error::SchemaError> {
                let configure = $config;
                configure(config)
            }

            fn field(&self, name: &str) -> Option<$crate::value::Value> {
                match name {
                    $(
                        stringify!($field) => {
                            Some($crate::traits::FieldValue::to_value(&self.$field))
                        }
                    )+
                    _ => None,
                }
            }

            fn set_field(&mut self, name: &str, value: $crate::value::Value) -> bool {
                match name {
                    $(
                        stringify!($field) => {
                            match $crate::traits::FieldValue::from_value(&value) {
                                Some(v) => {
                                    self.$field = v;
                                    true
                                }
                                None => false,
                            }
                        }
                    )+
                    _ => false,
                }
            }
        }

        impl $crate::traits::FieldValue for $name {
            fn to_value(&self) -> $crate::value::Value {
                $crate::traits::Reflectable::to_native(self)
            }

            fn from_value(value: &$crate::value::Value) -> Option<Self> {
                $crate::traits::Reflectable::from_native(value)
            }
        }
    };
}
