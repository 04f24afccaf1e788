//! Metrics sink boundary.
//!
//! Reflector logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MapEvent and MetricsSink.

use crate::obs::metrics::{self, MapReport};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MapEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MapEvent {
    SchemaDerived { model: &'static str },
    Encode { model: &'static str },
    Decode { model: &'static str },
    DecodeFailed { model: &'static str },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MapEvent);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into global counter state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MapEvent) {
        match event {
            MapEvent::SchemaDerived { model } => metrics::with_state_mut(|m| {
                let entry = m.entry(model.to_string()).or_default();
                entry.schema_derivations = entry.schema_derivations.saturating_add(1);
            }),
            MapEvent::Encode { model } => metrics::with_state_mut(|m| {
                let entry = m.entry(model.to_string()).or_default();
                entry.encodes = entry.encodes.saturating_add(1);
            }),
            MapEvent::Decode { model } => metrics::with_state_mut(|m| {
                let entry = m.entry(model.to_string()).or_default();
                entry.decodes = entry.decodes.saturating_add(1);
            }),
            MapEvent::DecodeFailed { model } => metrics::with_state_mut(|m| {
                let entry = m.entry(model.to_string()).or_default();
                entry.decode_failures = entry.decode_failures.saturating_add(1);
            }),
        }
    }
}

/// Route one event to the active sink for this thread.
pub(crate) fn record(event: MapEvent) {
    let handled = SINK_OVERRIDE.with(|cell| {
        if let Some(sink) = cell.borrow().as_ref() {
            sink.record(event);
            true
        } else {
            false
        }
    });

    if !handled {
        GlobalMetricsSink.record(event);
    }
}

/// Run `f` with a scoped sink override on this thread.
///
/// Intended for tests and embedders that want to capture events without
/// touching the global counters.
pub fn with_sink<R>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> R) -> R {
    SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = Some(sink));
    let result = f();
    SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = None);

    result
}

/// Snapshot the global per-model counters.
#[must_use]
pub fn metrics_report() -> MapReport {
    metrics::snapshot()
}

/// Clear all global counters.
pub fn metrics_reset_all() {
    metrics::reset();
}
