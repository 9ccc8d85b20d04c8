use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub const OUTCOME_FORWARDED: &str = "forwarded";
pub const OUTCOME_REJECTED: &str = "rejected";
pub const OUTCOME_FAILED: &str = "failed";

pub const FETCH_OK: &str = "ok";
pub const FETCH_ERROR: &str = "error";

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Submission metrics
    /// outcome: forwarded (downstream 2xx), rejected (downstream non-2xx), failed (generic 500)
    pub submissions: IntCounterVec,
    pub lead_forward_duration: Histogram,

    // Token metrics
    pub token_fetches: IntCounterVec,
    pub token_fetch_duration: Histogram,
    pub token_cache_hits: IntCounter,

    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("leadrelay".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            submissions: IntCounterVec::new(Opts::new("submissions_total", "Submissions by outcome"),&["outcome"],).unwrap(),
            lead_forward_duration: Histogram::with_opts(HistogramOpts::new("lead_forward_duration_seconds", "Lead creation call duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).unwrap(),

            token_fetches: IntCounterVec::new(Opts::new("token_fetch_total", "Token endpoint calls by result"),&["result"],).unwrap(),
            token_fetch_duration: Histogram::with_opts(HistogramOpts::new("token_fetch_duration_seconds", "Token endpoint call duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).unwrap(),
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Submissions served with a cached token").unwrap(),

            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.submissions.clone())).unwrap();
        reg.register(Box::new(metrics.lead_forward_duration.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetches.clone())).unwrap();
        reg.register(Box::new(metrics.token_fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
