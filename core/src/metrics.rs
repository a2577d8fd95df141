use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    pub registry: Registry,
    pub optimizer_runs: IntCounterVec,
    pub generator_runs: IntCounterVec,
    pub backup_events: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let optimizer_runs = IntCounterVec::new(
            Opts::new("flock_optimizer_runs_total", "Uniformity optimizer runs by outcome"),
            &["outcome"],
        )?;
        let generator_runs = IntCounterVec::new(
            Opts::new("flock_generator_runs_total", "Synthetic weight generator runs by outcome"),
            &["outcome"],
        )?;
        let backup_events = IntCounterVec::new(
            Opts::new("flock_backup_events_total", "Backup snapshot/restore/discard events"),
            &["event"],
        )?;

        registry.register(Box::new(optimizer_runs.clone()))?;
        registry.register(Box::new(generator_runs.clone()))?;
        registry.register(Box::new(backup_events.clone()))?;

        Ok(Self {
            registry,
            optimizer_runs,
            generator_runs,
            backup_events,
        })
    }
}

// Navn og labels er konstanter, så registreringen kan ikke feile i praksis.
static METRICS: Lazy<Metrics> =
    Lazy::new(|| Metrics::new().expect("static flock metrics must register"));

pub fn metrics() -> &'static Metrics {
    &METRICS
}

pub fn optimizer_run(outcome: &str) {
    METRICS.optimizer_runs.with_label_values(&[outcome]).inc();
}

pub fn generator_run(outcome: &str) {
    METRICS.generator_runs.with_label_values(&[outcome]).inc();
}

pub fn backup_event(event: &str) {
    METRICS.backup_events.with_label_values(&[event]).inc();
}

/// Registeret i Prometheus tekstformat.
pub fn gather_text() -> String {
    let mut buf = Vec::new();
    let families = METRICS.registry.gather();
    if let Err(e) = TextEncoder::new().encode(&families, &mut buf) {
        log::warn!("metrics encode failed: {e}");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
