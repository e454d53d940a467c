use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Severity/flavor of a qualitative insight, mapped straight onto the
/// dashboard's card styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Danger,
    Info,
}

/// One threshold-rule finding, in generation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Naive next-period projection: current figures scaled by their own growth
/// rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPeriod {
    pub revenue: Decimal,
    pub expenses: Decimal,
    /// Grows with the amount of data behind the projection, clamped to
    /// [60, 95].
    pub confidence: Decimal,
}

/// The final output of the `FinancialAnalyzer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub revenue: Decimal,
    pub expenses: Decimal,
    /// May be negative; the only monetary field allowed to be.
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
    /// Percent change vs the previous period; 0 on a zero base.
    pub revenue_growth: Decimal,
    pub expense_growth: Decimal,
    /// Daily expenses over daily revenue (a ratio, not a date); 0 when there
    /// is no revenue.
    pub break_even_point: Decimal,
    /// Whole days current net profit could sustain the expense burn; 0
    /// unless both are positive.
    pub cash_runway_days: i64,
    /// 50 baseline plus fixed bonuses, clamped to 100.
    pub health_score: i64,
    pub insights: Vec<FinancialInsight>,
    pub projection: ProjectedPeriod,
}
