use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Forecast error: {0}")]
    Forecast(#[from] forecaster::ForecastError),
    #[error("Optimizer error: {0}")]
    Optimizer(#[from] optimizer::OptimizerError),
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] analyzer::AnalyzerError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Invalid records are the caller's fault (422); anything else is ours (500).
/// The body shape is always `{"error", "message"}`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Forecast(forecaster::ForecastError::InvalidRecord(cause)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input", cause.to_string())
            }
            AppError::Optimizer(optimizer::OptimizerError::InvalidRecord(cause)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input", cause.to_string())
            }
            AppError::Analyzer(analyzer::AnalyzerError::InvalidRecord(cause)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input", cause.to_string())
            }
            other => {
                tracing::error!(error = ?other, "engine failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal calculation error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error, "message": message }));
        (status, body).into_response()
    }
}
