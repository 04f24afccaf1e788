//! Process-local counter state behind the default sink.

use parking_lot::Mutex;
use std::collections::BTreeMap;

static STATE: Mutex<BTreeMap<String, ModelCounters>> = Mutex::new(BTreeMap::new());

///
/// ModelCounters
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ModelCounters {
    pub schema_derivations: u64,
    pub encodes: u64,
    pub decodes: u64,
    pub decode_failures: u64,
}

///
/// MapReport
/// Point-in-time snapshot of all per-model counters.
///

#[derive(Clone, Debug, Default)]
pub struct MapReport {
    pub models: BTreeMap<String, ModelCounters>,
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut BTreeMap<String, ModelCounters>) -> R) -> R {
    f(&mut STATE.lock())
}

pub(crate) fn snapshot() -> MapReport {
    MapReport {
        models: STATE.lock().clone(),
    }
}

pub(crate) fn reset() {
    STATE.lock().clear();
}
