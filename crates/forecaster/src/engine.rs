use crate::error::ForecastError;
use crate::report::{
    ConfidenceInterval, DailyAggregate, ForecastReport, ModelInfo, PredictionPoint,
    MODEL_LINEAR_REGRESSION,
};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use configuration::ForecastSettings;
use core_types::SaleRecord;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::debug;

/// A stateless calculator that fits a daily revenue trend and projects it
/// forward.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    settings: ForecastSettings,
}

impl ForecastEngine {
    pub fn new(settings: ForecastSettings) -> Self {
        Self { settings }
    }

    /// The main entry point for producing a sales forecast.
    ///
    /// Records are bucketed by **UTC** calendar day (the engine's fixed
    /// convention; callers in other timezones must convert before calling),
    /// summed per day, and fitted with an ordinary least-squares trend over
    /// the zero-based day index. Missing days are absent data points, not
    /// zero-filled, and the projection continues the same sequential-day
    /// model.
    ///
    /// # Arguments
    ///
    /// * `sales` - Historical sale records, in any order.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `ForecastReport` or a `ForecastError`.
    /// Fewer records than the configured minimum is not an error: it yields
    /// the `insufficient_data` sentinel report.
    pub fn forecast(&self, sales: &[SaleRecord]) -> Result<ForecastReport, ForecastError> {
        for sale in sales {
            sale.validate()?;
        }

        if sales.is_empty() || sales.len() < self.settings.min_data_points {
            return Ok(ForecastReport::insufficient_data());
        }

        // --- 1. Bucket by UTC calendar day, ascending ---
        let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for sale in sales {
            *days
                .entry(sale.created_at.date_naive())
                .or_insert(Decimal::ZERO) += sale.total;
        }
        // Daily totals stay unrounded: they feed the fit, and their sum must
        // reproduce the input revenue exactly.
        let historical_data: Vec<DailyAggregate> = days
            .into_iter()
            .map(|(date, total)| DailyAggregate { date, total })
            .collect();

        // --- 2. Ordinary least squares over the day index ---
        let n = Decimal::from(historical_data.len());
        let mut sum_x = Decimal::ZERO;
        let mut sum_y = Decimal::ZERO;
        let mut sum_xx = Decimal::ZERO;
        let mut sum_xy = Decimal::ZERO;
        for (i, day) in historical_data.iter().enumerate() {
            let x = Decimal::from(i);
            sum_x += x;
            sum_y += day.total;
            sum_xx += x * x;
            sum_xy += x * day.total;
        }

        // All records on a single calendar day gives the closed form a zero
        // denominator; fall back to a flat line at the mean.
        let denominator = n * sum_xx - sum_x * sum_x;
        let slope = if denominator.is_zero() {
            Decimal::ZERO
        } else {
            (n * sum_xy - sum_x * sum_y) / denominator
        };
        let intercept = (sum_y - slope * sum_x) / n;

        // --- 3. Residual spread (population std-dev) and RMSE ---
        let residuals: Vec<Decimal> = historical_data
            .iter()
            .enumerate()
            .map(|(i, day)| day.total - (slope * Decimal::from(i) + intercept))
            .collect();
        let mean_residual = residuals.iter().sum::<Decimal>() / n;
        let variance = residuals
            .iter()
            .map(|r| (*r - mean_residual) * (*r - mean_residual))
            .sum::<Decimal>()
            / n;
        let std_dev = sqrt(variance)?;
        let rmse = sqrt(residuals.iter().map(|r| *r * *r).sum::<Decimal>() / n)?;

        // --- 4. Project the horizon ---
        let first_date = historical_data[0].date;
        let last_index = historical_data.len() as i64 - 1;
        let band = dec!(2) * std_dev;
        let mut predictions = Vec::with_capacity(self.settings.horizon_days.max(0) as usize);
        for i in 1..=self.settings.horizon_days {
            let x = last_index + i;
            let date = first_date + Duration::days(x);
            let mut predicted = slope * Decimal::from(x) + intercept;
            if is_weekend(date) {
                predicted *= self.settings.weekend_multiplier;
            }
            let predicted = predicted.max(Decimal::ZERO);
            predictions.push(PredictionPoint {
                date,
                predicted_value: predicted.round_dp(2),
                confidence_interval: ConfidenceInterval {
                    lower: (predicted - band).max(Decimal::ZERO).round_dp(2),
                    upper: (predicted + band).round_dp(2),
                },
            });
        }

        // --- 5. Model accuracy relative to the mean daily revenue ---
        let mean_daily = sum_y / n;
        let accuracy = if mean_daily > Decimal::ZERO {
            (dec!(100) - rmse / mean_daily * dec!(100)).clamp(Decimal::ZERO, dec!(100))
        } else {
            Decimal::ZERO
        };

        debug!(
            data_points = sales.len(),
            days_analyzed = historical_data.len(),
            %slope,
            %intercept,
            "fitted daily revenue trend"
        );

        Ok(ForecastReport {
            predictions,
            model_info: ModelInfo {
                model_type: MODEL_LINEAR_REGRESSION.to_string(),
                data_points: sales.len(),
                days_analyzed: historical_data.len(),
                slope: slope.round_dp(2),
                intercept: intercept.round_dp(2),
                accuracy_percentage: accuracy.round_dp(2),
                rmse: rmse.round_dp(2),
            },
            historical_data,
        })
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn sqrt(value: Decimal) -> Result<Decimal, ForecastError> {
    value
        .sqrt()
        .ok_or_else(|| ForecastError::Calculation("square root of negative variance".to_string()))
}
