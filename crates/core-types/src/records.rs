use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One completed transaction line from the sales ledger.
///
/// Immutable once constructed; the engines only ever read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// When the sale completed. Day bucketing downstream uses the UTC date.
    pub created_at: DateTime<Utc>,
    /// Revenue of the line, in the tenant's currency.
    pub total: Decimal,
    /// Units sold.
    pub quantity: i64,
    /// The product this line belongs to.
    pub product_id: String,
}

/// One inbound stock purchase / expense event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub created_at: DateTime<Utc>,
    pub total: Decimal,
}

/// Current snapshot of a product's inventory level. No history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    /// Units on hand.
    pub stock: i64,
    /// Reorder threshold configured by the tenant.
    pub min_stock: i64,
    /// Unit sale price.
    pub price: Decimal,
}

impl SaleRecord {
    /// Rejects records that would corrupt downstream aggregates.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.total < Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "SaleRecord".to_string(),
                format!("total must be non-negative, got {}", self.total),
            ));
        }
        if self.quantity < 0 {
            return Err(CoreError::InvalidInput(
                "SaleRecord".to_string(),
                format!("quantity must be non-negative, got {}", self.quantity),
            ));
        }
        Ok(())
    }
}

impl PurchaseRecord {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.total < Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "PurchaseRecord".to_string(),
                format!("total must be non-negative, got {}", self.total),
            ));
        }
        Ok(())
    }
}

impl ProductRecord {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.stock < 0 || self.min_stock < 0 {
            return Err(CoreError::InvalidInput(
                "ProductRecord".to_string(),
                format!(
                    "stock levels must be non-negative, got stock={} min_stock={}",
                    self.stock, self.min_stock
                ),
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "ProductRecord".to_string(),
                format!("price must be non-negative, got {}", self.price),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sale(total: Decimal, quantity: i64) -> SaleRecord {
        SaleRecord {
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            total,
            quantity,
            product_id: "p-1".to_string(),
        }
    }

    #[test]
    fn valid_sale_passes() {
        assert!(sale(dec!(19.99), 2).validate().is_ok());
    }

    #[test]
    fn negative_total_is_rejected() {
        let err = sale(dec!(-1), 1).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_, _)));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let product = ProductRecord {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            stock: -3,
            min_stock: 5,
            price: dec!(10),
        };
        assert!(product.validate().is_err());
    }

    #[test]
    fn unparseable_timestamp_fails_deserialization() {
        // The serde boundary is where malformed timestamps must die, before
        // any engine sees the record.
        let raw = r#"{"created_at":"not-a-date","total":"10","quantity":1,"product_id":"p"}"#;
        assert!(serde_json::from_str::<SaleRecord>(raw).is_err());
    }
}
