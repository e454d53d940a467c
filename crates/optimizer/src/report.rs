use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `days_until_stockout` value meaning "no foreseeable stock-out" (the
/// product had zero recent demand). Kept as a plain number, not an Option,
/// so existing consumers' largest-value sort semantics are preserved.
pub const NO_STOCKOUT_SENTINEL: i64 = 999;

/// Urgency of a reorder recommendation. Declaration order is sort order:
/// `High` entries surface before `Medium` ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(label)
    }
}

/// One product the tenant should reorder, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    pub product_id: String,
    pub product_name: String,
    pub current_stock: i64,
    pub min_stock: i64,
    /// Recent demand averaged over the full window length, rounded to 2 dp.
    pub avg_daily_sales: Decimal,
    /// Whole days of stock left at the average demand rate, or
    /// `NO_STOCKOUT_SENTINEL` when demand is zero.
    pub days_until_stockout: i64,
    /// Units to order now.
    pub recommended_order: i64,
    pub priority: Priority,
    pub reason: String,
}

/// The final output of the `InventoryOptimizer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_products: usize,
    /// Products currently below their configured minimum.
    pub products_below_min: usize,
    /// Products heading for a stock-out inside the warning horizon.
    pub products_at_risk: usize,
    /// Percentage of products that are neither below minimum nor at
    /// near-term stock-out risk. Always an integer in [0, 100].
    pub optimization_score: i64,
    /// Replacement cost of the urgent recommendations.
    pub total_value_at_risk: Decimal,
    /// Sorted (high first, soonest stock-out first) and truncated.
    pub recommendations: Vec<ReorderRecommendation>,
}

impl InventorySummary {
    /// The neutral "everything healthy" summary for an empty catalog.
    pub fn empty() -> Self {
        Self {
            total_products: 0,
            products_below_min: 0,
            products_at_risk: 0,
            optimization_score: 100,
            total_value_at_risk: Decimal::ZERO,
            recommendations: Vec::new(),
        }
    }
}
