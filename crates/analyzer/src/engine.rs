use crate::error::AnalyzerError;
use crate::report::{FinancialInsight, FinancialSummary, InsightKind, ProjectedPeriod};
use configuration::FinancialSettings;
use core_types::{CoreError, PurchaseRecord, SaleRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One caller-filtered trailing period of activity (30 days by default).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodData {
    pub sales: Vec<SaleRecord>,
    pub purchases: Vec<PurchaseRecord>,
}

impl PeriodData {
    fn validate(&self) -> Result<(), CoreError> {
        for sale in &self.sales {
            sale.validate()?;
        }
        for purchase in &self.purchases {
            purchase.validate()?;
        }
        Ok(())
    }

    fn revenue(&self) -> Decimal {
        self.sales.iter().map(|s| s.total).sum()
    }

    fn expenses(&self) -> Decimal {
        self.purchases.iter().map(|p| p.total).sum()
    }

    fn record_count(&self) -> usize {
        self.sales.len() + self.purchases.len()
    }
}

/// A stateless calculator that compares two adjacent trailing periods.
#[derive(Debug, Clone, Default)]
pub struct FinancialAnalyzer {
    settings: FinancialSettings,
}

impl FinancialAnalyzer {
    pub fn new(settings: FinancialSettings) -> Self {
        Self { settings }
    }

    /// The main entry point for the financial comparison.
    ///
    /// # Arguments
    ///
    /// * `current` - The trailing period (most recent 30 days by default).
    /// * `previous` - The period immediately before it, same length.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `FinancialSummary` or an `AnalyzerError`.
    /// Empty periods are not errors; every ratio with a zero denominator is
    /// guarded and reported as 0.
    pub fn analyze(
        &self,
        current: &PeriodData,
        previous: &PeriodData,
    ) -> Result<FinancialSummary, AnalyzerError> {
        current.validate()?;
        previous.validate()?;

        // --- 1. Period sums ---
        let revenue = current.revenue();
        let expenses = current.expenses();
        let net_profit = revenue - expenses;
        let profit_margin = if revenue > Decimal::ZERO {
            net_profit / revenue * dec!(100)
        } else {
            Decimal::ZERO
        };

        // --- 2. Growth vs the previous period ---
        let revenue_growth = growth(revenue, previous.revenue());
        let expense_growth = growth(expenses, previous.expenses());

        // --- 3. Daily averages, break-even ratio, cash runway ---
        let period = Decimal::from(self.settings.period_days);
        let avg_daily_revenue = revenue / period;
        let avg_daily_expenses = expenses / period;
        let break_even_point = if avg_daily_revenue > Decimal::ZERO {
            avg_daily_expenses / avg_daily_revenue
        } else {
            Decimal::ZERO
        };
        let cash_runway_days = if avg_daily_expenses > Decimal::ZERO && net_profit > Decimal::ZERO
        {
            (net_profit / avg_daily_expenses)
                .floor()
                .to_i64()
                .unwrap_or(0)
        } else {
            0
        };

        // --- 4. Qualitative insights, fixed generation order ---
        let mut insights = self.build_insights(
            profit_margin,
            revenue_growth,
            expense_growth,
            avg_daily_expenses,
            net_profit,
            cash_runway_days,
        );
        insights.truncate(self.settings.max_insights);

        // --- 5. Health score: 50 baseline plus fixed bonuses ---
        let mut health_score = 50i64;
        if net_profit > Decimal::ZERO {
            health_score += 20;
        }
        if profit_margin > dec!(15) {
            health_score += 15;
        }
        if revenue_growth > dec!(10) {
            health_score += 15;
        }
        if expense_growth < revenue_growth {
            health_score += 10;
        }
        if cash_runway_days > 60 {
            health_score += 10;
        }
        let health_score = health_score.min(100);

        // --- 6. Naive next-period projection ---
        let data_points = Decimal::from(current.record_count() as u64);
        let projection = ProjectedPeriod {
            revenue: (revenue * (dec!(1) + revenue_growth / dec!(100))).round_dp(2),
            expenses: (expenses * (dec!(1) + expense_growth / dec!(100))).round_dp(2),
            confidence: (dec!(60) + dec!(0.5) * data_points).clamp(dec!(60), dec!(95)),
        };

        debug!(%revenue, %expenses, health_score, "financial comparison complete");

        Ok(FinancialSummary {
            revenue: revenue.round_dp(2),
            expenses: expenses.round_dp(2),
            net_profit: net_profit.round_dp(2),
            profit_margin: profit_margin.round_dp(2),
            revenue_growth: revenue_growth.round_dp(2),
            expense_growth: expense_growth.round_dp(2),
            break_even_point: break_even_point.round_dp(2),
            cash_runway_days,
            health_score,
            insights,
            projection,
        })
    }

    /// Applies the threshold rules, one insight each, in their published
    /// order: profit margin first, then growth, then expense pressure, then
    /// runway.
    fn build_insights(
        &self,
        profit_margin: Decimal,
        revenue_growth: Decimal,
        expense_growth: Decimal,
        avg_daily_expenses: Decimal,
        net_profit: Decimal,
        cash_runway_days: i64,
    ) -> Vec<FinancialInsight> {
        let mut insights = Vec::new();

        let margin = profit_margin.round_dp(2);
        if profit_margin >= dec!(20) {
            insights.push(FinancialInsight {
                kind: InsightKind::Success,
                title: "Excellent profit margin".to_string(),
                description: format!("Profit margin of {margin}% is comfortably above the 20% benchmark."),
                metric: Some(margin),
                recommendation: None,
            });
        } else if profit_margin >= dec!(10) {
            insights.push(FinancialInsight {
                kind: InsightKind::Info,
                title: "Healthy profit margin".to_string(),
                description: format!("Profit margin of {margin}% is within the typical 10-20% range."),
                metric: Some(margin),
                recommendation: None,
            });
        } else if profit_margin >= Decimal::ZERO {
            insights.push(FinancialInsight {
                kind: InsightKind::Warning,
                title: "Thin profit margin".to_string(),
                description: format!("Profit margin of {margin}% leaves little room for surprises."),
                metric: Some(margin),
                recommendation: Some(
                    "Review pricing and supplier costs to rebuild margin.".to_string(),
                ),
            });
        } else {
            insights.push(FinancialInsight {
                kind: InsightKind::Danger,
                title: "Operating at a loss".to_string(),
                description: "Expenses exceeded revenue this period.".to_string(),
                metric: Some(margin),
                recommendation: Some(
                    "Cut discretionary spending or raise prices to return to profit.".to_string(),
                ),
            });
        }

        let rev_growth = revenue_growth.round_dp(2);
        if revenue_growth > dec!(15) {
            insights.push(FinancialInsight {
                kind: InsightKind::Success,
                title: "Strong revenue growth".to_string(),
                description: format!("Revenue grew {rev_growth}% versus the previous period."),
                metric: Some(rev_growth),
                recommendation: None,
            });
        } else if revenue_growth < Decimal::ZERO {
            insights.push(FinancialInsight {
                kind: InsightKind::Warning,
                title: "Revenue declining".to_string(),
                description: format!("Revenue fell {rev_growth}% versus the previous period."),
                metric: Some(rev_growth),
                recommendation: Some(
                    "Investigate the drop: seasonality, lost customers, or stock-outs.".to_string(),
                ),
            });
        }

        if expense_growth > revenue_growth {
            let exp_growth = expense_growth.round_dp(2);
            insights.push(FinancialInsight {
                kind: InsightKind::Warning,
                title: "Expenses outpacing revenue".to_string(),
                description: format!(
                    "Expense growth of {exp_growth}% is running ahead of revenue growth."
                ),
                metric: Some(exp_growth),
                recommendation: Some("Audit the fastest-growing expense lines.".to_string()),
            });
        }

        if avg_daily_expenses > Decimal::ZERO && net_profit > Decimal::ZERO && cash_runway_days < 30
        {
            insights.push(FinancialInsight {
                kind: InsightKind::Danger,
                title: "Short cash runway".to_string(),
                description: format!(
                    "Current profit covers only {cash_runway_days} days of expenses."
                ),
                metric: Some(Decimal::from(cash_runway_days)),
                recommendation: Some("Build a cash buffer before committing to new spend.".to_string()),
            });
        } else if cash_runway_days > 60 {
            insights.push(FinancialInsight {
                kind: InsightKind::Success,
                title: "Comfortable cash runway".to_string(),
                description: format!(
                    "Current profit covers {cash_runway_days} days of expenses."
                ),
                metric: Some(Decimal::from(cash_runway_days)),
                recommendation: None,
            });
        }

        insights
    }
}

/// Percent change vs the previous period; 0 on a zero base (never
/// NaN/Infinity).
fn growth(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        (current - previous) / previous * dec!(100)
    } else {
        Decimal::ZERO
    }
}
