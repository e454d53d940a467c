use crate::error::OptimizerError;
use crate::report::{InventorySummary, Priority, ReorderRecommendation, NO_STOCKOUT_SENTINEL};
use configuration::InventorySettings;
use core_types::{ProductRecord, SaleRecord};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use tracing::debug;

/// A stateless calculator that flags products for reordering.
#[derive(Debug, Clone, Default)]
pub struct InventoryOptimizer {
    settings: InventorySettings,
}

impl InventoryOptimizer {
    pub fn new(settings: InventorySettings) -> Self {
        Self { settings }
    }

    /// The main entry point for the inventory pass.
    ///
    /// # Arguments
    ///
    /// * `products` - Current stock snapshot, one record per product.
    /// * `recent_sales` - Sales restricted by the caller to the trailing
    ///   demand window (30 days by default). The engine trusts this
    ///   pre-filtering and never consults the clock itself.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `InventorySummary` or an `OptimizerError`.
    /// An empty catalog is not an error: it yields the neutral summary.
    pub fn optimize(
        &self,
        products: &[ProductRecord],
        recent_sales: &[SaleRecord],
    ) -> Result<InventorySummary, OptimizerError> {
        for product in products {
            product.validate()?;
        }
        for sale in recent_sales {
            sale.validate()?;
        }

        if products.is_empty() {
            return Ok(InventorySummary::empty());
        }

        // --- 1. Recent demand per product ---
        let mut units_sold: HashMap<&str, i64> = HashMap::new();
        for sale in recent_sales {
            *units_sold.entry(sale.product_id.as_str()).or_insert(0) += sale.quantity;
        }

        let window = Decimal::from(self.settings.demand_window_days);
        let cover = Decimal::from(self.settings.reorder_cover_days);

        let mut recommendations = Vec::new();
        let mut products_below_min = 0usize;
        let mut products_at_risk = 0usize;
        let mut total_value_at_risk = Decimal::ZERO;

        for product in products {
            let sold = units_sold.get(product.id.as_str()).copied().unwrap_or(0);
            // Demand averages over the whole window, not days-with-sales, so
            // low-frequency products are not overstated.
            let avg_daily_sales = Decimal::from(sold) / window;
            let days_until_stockout = if avg_daily_sales > Decimal::ZERO {
                (Decimal::from(product.stock) / avg_daily_sales)
                    .floor()
                    .to_i64()
                    .unwrap_or(NO_STOCKOUT_SENTINEL)
            } else {
                NO_STOCKOUT_SENTINEL
            };

            // First match wins. The branch order *is* the business rule:
            // reordering these changes which products get flagged.
            let decision = if product.stock < product.min_stock {
                products_below_min += 1;
                let order = product.min_stock * 2 - product.stock;
                total_value_at_risk += product.price * Decimal::from(order);
                Some((
                    Priority::High,
                    "Stock below minimum threshold".to_string(),
                    order,
                ))
            } else if days_until_stockout < self.settings.urgent_stockout_days
                && avg_daily_sales > Decimal::ZERO
            {
                products_at_risk += 1;
                let order = ceil_units(avg_daily_sales * cover);
                total_value_at_risk += product.price * Decimal::from(order);
                Some((
                    Priority::High,
                    format!("Stock-out expected in {days_until_stockout} days"),
                    order,
                ))
            } else if days_until_stockout < self.settings.warning_stockout_days
                && avg_daily_sales > Decimal::ZERO
            {
                products_at_risk += 1;
                let order = ceil_units(avg_daily_sales * cover);
                Some((
                    Priority::Medium,
                    format!("Stock-out expected in {days_until_stockout} days"),
                    order,
                ))
            } else if Decimal::from(product.stock)
                <= Decimal::from(product.min_stock) * self.settings.near_minimum_factor
            {
                let order = ceil_units(avg_daily_sales * cover);
                Some((
                    Priority::Medium,
                    "Stock approaching minimum threshold".to_string(),
                    order,
                ))
            } else {
                None
            };

            if let Some((priority, reason, recommended_order)) = decision {
                recommendations.push(ReorderRecommendation {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    current_stock: product.stock,
                    min_stock: product.min_stock,
                    avg_daily_sales: avg_daily_sales
                        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                    days_until_stockout,
                    recommended_order,
                    priority,
                    reason,
                });
            }
        }

        // --- 2. Rank and truncate ---
        // High before medium; within equal priority the soonest stock-out
        // first (the 999 sentinel naturally sinks to the back).
        recommendations.sort_by_key(|r| (r.priority, r.days_until_stockout));
        recommendations.truncate(self.settings.max_recommendations);

        // --- 3. Fleet score ---
        // Half-scores round away from zero (62.5 -> 63), matching the
        // dashboards that consume this summary.
        let healthy = products.len() - products_below_min - products_at_risk;
        let optimization_score = (Decimal::from(healthy * 100) / Decimal::from(products.len()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0);

        debug!(
            total_products = products.len(),
            products_below_min,
            products_at_risk,
            optimization_score,
            "inventory pass complete"
        );

        Ok(InventorySummary {
            total_products: products.len(),
            products_below_min,
            products_at_risk,
            optimization_score,
            total_value_at_risk: total_value_at_risk
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            recommendations,
        })
    }
}

fn ceil_units(quantity: Decimal) -> i64 {
    quantity.ceil().to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::SaleRecord;
    use rust_decimal_macros::dec;

    fn product(id: &str, stock: i64, min_stock: i64, price: Decimal) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Product {id}"),
            stock,
            min_stock,
            price,
        }
    }

    /// One sale record carrying the whole window's demand for a product.
    fn demand(id: &str, quantity: i64) -> SaleRecord {
        SaleRecord {
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            total: dec!(10) * Decimal::from(quantity),
            quantity,
            product_id: id.to_string(),
        }
    }

    #[test]
    fn empty_catalog_yields_neutral_summary() {
        let summary = InventoryOptimizer::default().optimize(&[], &[]).unwrap();
        assert_eq!(summary.optimization_score, 100);
        assert_eq!(summary.total_value_at_risk, Decimal::ZERO);
        assert!(summary.recommendations.is_empty());
        assert_eq!(summary.total_products, 0);
    }

    #[test]
    fn below_minimum_beats_every_other_rule() {
        // No sales history at all: the first product is below its minimum,
        // the second sits far above 1.5x its minimum and must stay silent.
        let products = vec![
            product("low", 5, 20, dec!(8)),
            product("fine", 50, 10, dec!(8)),
        ];

        let summary = InventoryOptimizer::default()
            .optimize(&products, &[])
            .unwrap();

        assert_eq!(summary.recommendations.len(), 1);
        let rec = &summary.recommendations[0];
        assert_eq!(rec.product_id, "low");
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.recommended_order, 35); // ceil(20 * 2 - 5)
        assert_eq!(rec.days_until_stockout, NO_STOCKOUT_SENTINEL);
        assert_eq!(summary.products_below_min, 1);
        assert_eq!(summary.products_at_risk, 0);
        assert_eq!(summary.total_value_at_risk, dec!(280)); // 8 * 35
    }

    #[test]
    fn urgent_stockout_is_high_priority_and_counts_value_at_risk() {
        // 60 units over the 30-day window: 2/day against 10 in stock.
        let products = vec![product("hot", 10, 2, dec!(5))];
        let sales = vec![demand("hot", 60)];

        let summary = InventoryOptimizer::default()
            .optimize(&products, &sales)
            .unwrap();

        let rec = &summary.recommendations[0];
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.avg_daily_sales, dec!(2));
        assert_eq!(rec.days_until_stockout, 5);
        assert_eq!(rec.recommended_order, 28); // ceil(2 * 14)
        assert!(rec.reason.contains("5 days"));
        assert_eq!(summary.products_at_risk, 1);
        assert_eq!(summary.total_value_at_risk, dec!(140)); // 5 * 28
    }

    #[test]
    fn warning_band_is_medium_priority_without_value_at_risk() {
        // 1/day against 10 in stock: inside the 14-day warning band.
        let products = vec![product("warm", 10, 1, dec!(5))];
        let sales = vec![demand("warm", 30)];

        let summary = InventoryOptimizer::default()
            .optimize(&products, &sales)
            .unwrap();

        let rec = &summary.recommendations[0];
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.days_until_stockout, 10);
        assert_eq!(rec.recommended_order, 14);
        assert_eq!(summary.products_at_risk, 1);
        assert_eq!(summary.total_value_at_risk, Decimal::ZERO);
    }

    #[test]
    fn near_minimum_is_flagged_without_demand() {
        let products = vec![product("near", 12, 10, dec!(5))];
        let summary = InventoryOptimizer::default()
            .optimize(&products, &[])
            .unwrap();

        let rec = &summary.recommendations[0];
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.reason, "Stock approaching minimum threshold");
        assert_eq!(rec.days_until_stockout, NO_STOCKOUT_SENTINEL);
        // No demand, so nothing concrete to order yet.
        assert_eq!(rec.recommended_order, 0);
        assert_eq!(summary.products_at_risk, 0);
        assert_eq!(summary.products_below_min, 0);
    }

    #[test]
    fn recommendations_sort_high_first_then_soonest_stockout() {
        let products = vec![
            product("below", 5, 20, dec!(1)), // High, sentinel days
            product("urgent", 10, 1, dec!(1)), // High, 5 days
            product("warning", 10, 1, dec!(1)), // Medium, 10 days
        ];
        let sales = vec![demand("urgent", 60), demand("warning", 30)];

        let summary = InventoryOptimizer::default()
            .optimize(&products, &sales)
            .unwrap();

        let order: Vec<&str> = summary
            .recommendations
            .iter()
            .map(|r| r.product_id.as_str())
            .collect();
        assert_eq!(order, vec!["urgent", "below", "warning"]);
    }

    #[test]
    fn recommendations_truncate_to_the_configured_cap() {
        let products: Vec<ProductRecord> = (0..15)
            .map(|i| product(&format!("p{i}"), 0, 10, dec!(1)))
            .collect();

        let summary = InventoryOptimizer::default()
            .optimize(&products, &[])
            .unwrap();

        assert_eq!(summary.products_below_min, 15);
        assert_eq!(summary.recommendations.len(), 10);
        // The score still reflects every product, not just the listed ones.
        assert_eq!(summary.optimization_score, 0);
    }

    #[test]
    fn optimization_score_stays_within_bounds() {
        // One troubled product out of four: score = round(300 / 4) = 75.
        let products = vec![
            product("a", 0, 10, dec!(1)),
            product("b", 100, 1, dec!(1)),
            product("c", 100, 1, dec!(1)),
            product("d", 100, 1, dec!(1)),
        ];

        let summary = InventoryOptimizer::default()
            .optimize(&products, &[])
            .unwrap();

        assert_eq!(summary.optimization_score, 75);
        assert!((0..=100).contains(&summary.optimization_score));
    }

    #[test]
    fn half_scores_round_away_from_zero() {
        // Three troubled products out of eight: 500 / 8 = 62.5 -> 63.
        let mut products: Vec<ProductRecord> = (0..3)
            .map(|i| product(&format!("low{i}"), 0, 10, dec!(1)))
            .collect();
        products.extend((0..5).map(|i| product(&format!("ok{i}"), 100, 1, dec!(1))));

        let summary = InventoryOptimizer::default()
            .optimize(&products, &[])
            .unwrap();

        assert_eq!(summary.products_below_min, 3);
        assert_eq!(summary.optimization_score, 63);
    }

    #[test]
    fn negative_stock_fails_the_whole_call() {
        let products = vec![product("bad", -1, 10, dec!(1))];
        let err = InventoryOptimizer::default()
            .optimize(&products, &[])
            .unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidRecord(_)));
    }
}
