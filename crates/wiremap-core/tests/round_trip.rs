//! Property-based round-trip law: for any reflectable instance with no lossy
//! fields, decode(encode(x)) is field-wise equal to x.

use proptest::prelude::*;
use std::collections::BTreeMap;
use wiremap_core::{model::FieldKind, reflect::Reflector, reflect_model};

reflect_model! {
    path = "round_trip::Part",
    pub struct Part {
        name: String => FieldKind::Text,
        count: u32 => FieldKind::Uint32,
    }
}

reflect_model! {
    path = "round_trip::Bin",
    pub struct Bin {
        label: String => FieldKind::Text,
        weight: f64 => FieldKind::Float64,
        parts: Vec<BTreeMap<String, Part>> => FieldKind::List(Box::new(FieldKind::Map(
            Box::new(FieldKind::Model(wiremap_core::model::ModelRef::of::<Part>())),
        ))),
        spare: Option<i64> => FieldKind::Optional(Box::new(FieldKind::Int64)),
    }
}

fn part_strategy() -> impl Strategy<Value = Part> {
    ("[a-z]{1,8}", any::<u32>()).prop_map(|(name, count)| Part { name, count })
}

fn bin_strategy() -> impl Strategy<Value = Bin> {
    (
        "[a-z ]{0,12}",
        -1.0e9_f64..1.0e9_f64,
        proptest::collection::vec(
            proptest::collection::btree_map("[a-z]{1,4}", part_strategy(), 0..3),
            0..3,
        ),
        proptest::option::of(any::<i64>()),
    )
        .prop_map(|(label, weight, parts, spare)| Bin {
            label,
            weight,
            parts,
            spare,
        })
}

proptest! {
    #[test]
    fn generic_value_round_trip(bin in bin_strategy()) {
        let reflector = Reflector::new();

        let wire = reflector.to_generic(&bin).unwrap();
        let back: Bin = reflector.from_generic(&wire).unwrap();

        prop_assert_eq!(back, bin);
    }

    #[test]
    fn json_bytes_round_trip(bin in bin_strategy()) {
        let reflector = Reflector::new();

        let wire = reflector.to_generic(&bin).unwrap();
        let bytes = serde_json::to_vec(&wire).unwrap();
        let parsed: wiremap_core::value::Value = serde_json::from_slice(&bytes).unwrap();
        let back: Bin = reflector.from_generic(&parsed).unwrap();

        prop_assert_eq!(back, bin);
    }
}
