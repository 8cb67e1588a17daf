use prometheus::{HistogramOpts, Histogram, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_FAILURE: &str = "failure";

pub const REASON_STATUS: &str = "status";
pub const REASON_TRANSPORT: &str = "transport";
pub const REASON_DECODE: &str = "decode";

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

    // Session endpoint
    pub session_requests: IntCounterVec,

    // Vendor calls
    pub vendor_request_duration: Histogram,
    pub vendor_failures: IntCounterVec,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("chatkit".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            session_requests: IntCounterVec::new(Opts::new("session_requests_total", "Session create requests by outcome"), &["outcome"]).unwrap(),

            vendor_request_duration: Histogram::with_opts(HistogramOpts::new("vendor_request_duration_seconds", "Vendor session create duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0])).unwrap(),
            vendor_failures: IntCounterVec::new(Opts::new("vendor_failures_total", "Vendor call failures by reason"), &["reason"]).unwrap(),

            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").unwrap(),
            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.session_requests.clone())).unwrap();
        reg.register(Box::new(metrics.vendor_request_duration.clone())).unwrap();
        reg.register(Box::new(metrics.vendor_failures.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
