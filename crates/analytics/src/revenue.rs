//! Line-item arithmetic.
//!
//! Missing or non-numeric fields fall back to neutral values: price 0,
//! quantity 1, discount 0.

use serde::Deserialize;
use serde_json::Value;

use salesrank_core::{AnalyticsError, AnalyticsResult};

use crate::model::LineItem;

pub const DEFAULT_SALE_PRICE: f64 = 0.0;
pub const DEFAULT_QUANTITY: f64 = 1.0;
pub const DEFAULT_DISCOUNT: f64 = 0.0;

impl LineItem {
    pub fn effective_sale_price(&self) -> f64 {
        self.sale_price.unwrap_or(DEFAULT_SALE_PRICE)
    }

    pub fn effective_quantity(&self) -> f64 {
        self.quantity.unwrap_or(DEFAULT_QUANTITY)
    }

    pub fn effective_discount(&self) -> f64 {
        self.discount.unwrap_or(DEFAULT_DISCOUNT)
    }

    fn discount_factor(&self) -> f64 {
        1.0 - self.effective_discount() / 100.0
    }

    /// price × quantity × (1 − discount/100)
    pub fn revenue(&self) -> f64 {
        self.effective_sale_price() * self.effective_quantity() * self.discount_factor()
    }

    /// (price − unit cost) × quantity × (1 − discount/100)
    pub fn profit(&self, unit_cost: f64) -> f64 {
        (self.effective_sale_price() - unit_cost)
            * self.effective_quantity()
            * self.discount_factor()
    }
}

/// Revenue of a single untyped line item.
///
/// Fails only when `item` is not a JSON object.
pub fn calculate_line_revenue(item: &Value) -> AnalyticsResult<f64> {
    if !item.is_object() {
        return Err(AnalyticsError::invalid_input("line item must be an object"));
    }
    let item = LineItem::deserialize(item)
        .map_err(|e| AnalyticsError::invalid_input(format!("line item: {e}")))?;
    Ok(item.revenue())
}
