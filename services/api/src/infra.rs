use envhealth::config::AppConfig;
use envhealth::error::AppError;
use envhealth::workflows::assessment::{FederalDataSources, ReferenceTables, ReportAssembler};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the live federal adapters into a report assembler.
pub(crate) fn federal_assembler(
    config: &AppConfig,
) -> Result<Arc<ReportAssembler<FederalDataSources>>, AppError> {
    let tables = Arc::new(ReferenceTables::standard());
    let sources = FederalDataSources::new(&config.sources, Arc::clone(&tables))?;
    Ok(Arc::new(ReportAssembler::new(
        Arc::new(sources),
        tables,
        config.scoring.clone(),
    )))
}
