use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::Location;
use super::service::{ReportAssembler, ReportError};
use super::sources::EnvironmentalSources;

/// Router builder exposing the report endpoint.
pub fn report_router<S>(assembler: Arc<ReportAssembler<S>>) -> Router
where
    S: EnvironmentalSources + 'static,
{
    Router::new()
        .route("/api/v1/health-report", post(report_handler::<S>))
        .with_state(assembler)
}

pub(crate) async fn report_handler<S>(
    State(assembler): State<Arc<ReportAssembler<S>>>,
    axum::Json(location): axum::Json<Location>,
) -> Response
where
    S: EnvironmentalSources + 'static,
{
    match assembler.generate(location).await {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error.into_response(),
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = match self {
            ReportError::MissingZip => StatusCode::BAD_REQUEST,
            ReportError::AllSourcesFailed => {
                error!("report generation failed for every source");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let payload = json!({
            "error": self.to_string(),
        });
        (status, axum::Json(payload)).into_response()
    }
}
