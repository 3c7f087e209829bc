use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use coverage_advisor::config::parse_current_year;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_year(raw: &str) -> Result<i32, String> {
    parse_current_year(raw).map_err(|err| err.to_string())
}
