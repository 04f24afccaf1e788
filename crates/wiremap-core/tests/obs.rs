//! Sink routing for conversion telemetry.

use std::{cell::RefCell, rc::Rc};
use wiremap_core::{
    model::FieldKind,
    obs::{MapEvent, MetricsSink, metrics_report, with_sink},
    reflect::Reflector,
    reflect_model,
    value::Value,
};

reflect_model! {
    path = "obs::Ping",
    pub struct Ping {
        name: String => FieldKind::Text,
    }
}

#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<&'static str>>,
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MapEvent) {
        let label = match event {
            MapEvent::SchemaDerived { .. } => "derive",
            MapEvent::Encode { .. } => "encode",
            MapEvent::Decode { .. } => "decode",
            MapEvent::DecodeFailed { .. } => "decode_failed",
        };
        self.events.borrow_mut().push(label);
    }
}

#[test]
fn conversions_flow_through_the_scoped_sink() {
    let sink = Rc::new(RecordingSink::default());
    let reflector = Reflector::new();

    with_sink(sink.clone(), || {
        let ping = Ping {
            name: "x".to_string(),
        };
        let wire = reflector.to_generic(&ping).unwrap();
        let _: Ping = reflector.from_generic(&wire).unwrap();
        assert!(reflector.from_generic::<Ping>(&Value::Null).is_err());
    });

    assert_eq!(
        sink.events.borrow().as_slice(),
        &["derive", "encode", "decode", "decode_failed"]
    );
}

#[test]
fn global_counters_accumulate_per_model() {
    let reflector = Reflector::new();
    let ping = Ping {
        name: "y".to_string(),
    };
    let _ = reflector.to_generic(&ping).unwrap();

    let report = metrics_report();
    let counters = report.models.get("obs::Ping").copied().unwrap_or_default();
    assert!(counters.encodes >= 1);
}
