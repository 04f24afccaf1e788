//! Observability: conversion telemetry and sink abstractions.
//!
//! This module does not reach into the reflector's cache directly; all
//! instrumentation flows through [`MapEvent`] and [`MetricsSink`].

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{MapReport, ModelCounters};
pub use sink::{MapEvent, MetricsSink, metrics_report, metrics_reset_all, with_sink};
