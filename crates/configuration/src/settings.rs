use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root settings structure for all three analytics engines.
///
/// Every section may be omitted from `meridian.toml`; the defaults below are
/// the contract the dashboard and API consumers were built against, so only
/// change them deliberately.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub forecast: ForecastSettings,
    #[serde(default)]
    pub inventory: InventorySettings,
    #[serde(default)]
    pub financial: FinancialSettings,
}

/// Parameters for the sales forecasting engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSettings {
    /// Minimum number of sale records required to fit a trend. Below this
    /// the engine reports `insufficient_data` instead of guessing.
    pub min_data_points: usize,
    /// How many future days to project.
    pub horizon_days: i64,
    /// Multiplier applied to predictions that land on a Saturday or Sunday.
    pub weekend_multiplier: Decimal,
}

/// Parameters for the inventory reorder engine.
#[derive(Debug, Clone, Deserialize)]
pub struct InventorySettings {
    /// Length of the caller-supplied recent-sales window, in days. Average
    /// daily demand divides by this fixed length, not by days-with-sales.
    pub demand_window_days: i64,
    /// Stock-out horizon that makes a product an urgent (high) reorder.
    pub urgent_stockout_days: i64,
    /// Stock-out horizon that makes a product a warning (medium) reorder.
    pub warning_stockout_days: i64,
    /// Days of demand a recommended order should cover.
    pub reorder_cover_days: i64,
    /// Stock at or below `min_stock * near_minimum_factor` is flagged as
    /// approaching its minimum.
    pub near_minimum_factor: Decimal,
    /// Recommendations are truncated to this many entries after sorting.
    pub max_recommendations: usize,
}

/// Parameters for the financial period analyzer.
#[derive(Debug, Clone, Deserialize)]
pub struct FinancialSettings {
    /// Length of each comparison period, in days. Daily averages divide by
    /// this fixed length.
    pub period_days: i64,
    /// Qualitative insights are capped at this many, in generation order.
    pub max_insights: usize,
}

// --- Default Implementations ---
// These pin the engine constants so that a deployment without a
// `meridian.toml` behaves identically to the reference dashboard.

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            min_data_points: 7,
            horizon_days: 30,
            weekend_multiplier: dec!(1.10),
        }
    }
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            demand_window_days: 30,
            urgent_stockout_days: 7,
            warning_stockout_days: 14,
            reorder_cover_days: 14,
            near_minimum_factor: dec!(1.5),
            max_recommendations: 10,
        }
    }
}

impl Default for FinancialSettings {
    fn default() -> Self {
        Self {
            period_days: 30,
            max_insights: 5,
        }
    }
}
