//! Input records and derived per-seller results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use salesrank_core::{AnalyticsError, AnalyticsResult, Entity, SellerId, Sku};

use crate::lenient;

/// Seller reference data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<SellerId>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Seller {
    pub fn new(id: impl Into<SellerId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_name(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// "First Last", or `Seller {id}` when neither part is present.
    pub fn display_name(&self, id: &SellerId) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        let full = format!("{first} {last}");
        let full = full.trim();
        if full.is_empty() {
            format!("Seller {id}")
        } else {
            full.to_string()
        }
    }
}

impl Entity for Seller {
    type Id = SellerId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }
}

/// Product reference data, keyed by SKU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit cost.
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
}

impl Product {
    pub fn new(sku: impl Into<Sku>) -> Self {
        Self {
            sku: Some(sku.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_purchase_price(mut self, purchase_price: f64) -> Self {
        self.purchase_price = Some(purchase_price);
        self
    }

    /// Unit cost; zero when the catalog has no cost for this product.
    pub fn unit_cost(&self) -> f64 {
        self.purchase_price.unwrap_or(0.0)
    }
}

impl Entity for Product {
    type Id = Sku;

    fn id(&self) -> Option<&Self::Id> {
        self.sku.as_ref()
    }
}

/// One product entry within a receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Discount percent, 0-100.
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl LineItem {
    pub fn new(sku: impl Into<Sku>, sale_price: f64, quantity: f64) -> Self {
        Self {
            sku: Some(sku.into()),
            sale_price: Some(sale_price),
            quantity: Some(quantity),
            discount: None,
        }
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }
}

/// A receipt: line items sold by one seller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    #[serde(default, deserialize_with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub items: Vec<LineItem>,
}

impl PurchaseRecord {
    pub fn new(seller_id: impl Into<SellerId>) -> Self {
        Self {
            seller_id: Some(seller_id.into()),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }
}

/// The three input collections of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesDataset {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesDataset {
    pub fn new(
        sellers: Vec<Seller>,
        products: Vec<Product>,
        purchase_records: Vec<PurchaseRecord>,
    ) -> Self {
        Self {
            sellers,
            products,
            purchase_records,
        }
    }

    /// All three collections are required and must be non-empty.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let collections = [
            ("sellers", self.sellers.is_empty()),
            ("products", self.products.is_empty()),
            ("purchase_records", self.purchase_records.is_empty()),
        ];
        for (name, empty) in collections {
            if empty {
                return Err(AnalyticsError::validation(format!("{name} array is empty")));
            }
        }
        Ok(())
    }
}

/// Accumulated quantity of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub sku: Sku,
    pub quantity: f64,
}

/// Finalized per-seller aggregate.
///
/// `revenue` and `profit` are rounded to cents; `products` keeps first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerStat {
    pub seller_id: SellerId,
    pub name: String,
    pub sales_count: u64,
    pub revenue: f64,
    pub profit: f64,
    pub products: Vec<ProductQuantity>,
}

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSeller {
    pub seller_id: SellerId,
    pub name: String,
    pub sales_count: u64,
    pub revenue: f64,
    pub profit: f64,
    pub bonus: f64,
    pub top_products: Vec<ProductQuantity>,
}
