use lrs_scoring::profile::ProfileEngine;
use lrs_scoring::tables::QuestionTable;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Shared, read-only handles available to every request handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<ProfileEngine>,
    pub(crate) questions: Option<Arc<QuestionTable>>,
}
