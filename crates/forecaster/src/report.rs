use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `ModelInfo.model_type` when a trend was actually fitted.
pub const MODEL_LINEAR_REGRESSION: &str = "linear_regression";
/// `ModelInfo.model_type` when there was too little history to fit anything.
/// Consumers must check for this before trusting the numeric fields.
pub const MODEL_INSUFFICIENT_DATA: &str = "insufficient_data";

/// Total revenue for one calendar day present in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// A ±2σ band around a point prediction. Not a formal statistical
/// confidence level, but the band the dashboard charts shade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: Decimal,
    pub upper: Decimal,
}

/// One projected day of revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted_value: Decimal,
    pub confidence_interval: ConfidenceInterval,
}

/// Diagnostics describing the fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(rename = "type")]
    pub model_type: String,
    /// Number of input sale records.
    pub data_points: usize,
    /// Number of distinct calendar days those records covered.
    pub days_analyzed: usize,
    pub slope: Decimal,
    pub intercept: Decimal,
    /// 100 − RMSE as a share of the mean daily revenue, clamped to [0, 100].
    pub accuracy_percentage: Decimal,
    pub rmse: Decimal,
}

/// The final output of the `ForecastEngine`: the projection, the model
/// diagnostics, and the daily history the model was fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub predictions: Vec<PredictionPoint>,
    pub model_info: ModelInfo,
    pub historical_data: Vec<DailyAggregate>,
}

impl ForecastReport {
    /// The well-formed sentinel returned when there is not enough history to
    /// fit a trend. A reported condition, never an error.
    pub fn insufficient_data() -> Self {
        Self {
            predictions: Vec::new(),
            model_info: ModelInfo {
                model_type: MODEL_INSUFFICIENT_DATA.to_string(),
                data_points: 0,
                days_analyzed: 0,
                slope: Decimal::ZERO,
                intercept: Decimal::ZERO,
                accuracy_percentage: Decimal::ZERO,
                rmse: Decimal::ZERO,
            },
            historical_data: Vec::new(),
        }
    }
}
