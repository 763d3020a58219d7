//! Sales analytics domain module.
//!
//! Turns raw sellers, products and purchase receipts into a profit-ranked,
//! bonus-annotated seller report. Everything here is deterministic domain logic
//! (no IO, no global state); front ends decide where the data comes from.

pub mod aggregate;
pub mod analyze;
pub mod bonus;
mod lenient;
pub mod model;
pub mod options;
pub mod rank;
pub mod revenue;
pub mod schema;

pub use aggregate::aggregate;
pub use analyze::{analyze, analyze_json};
pub use bonus::{BonusRates, calculate_bonus};
pub use model::{
    LineItem, Product, ProductQuantity, PurchaseRecord, RankedSeller, SalesDataset, Seller,
    SellerStat,
};
pub use options::AnalyzeOptions;
pub use rank::{TOP_PRODUCTS_LIMIT, rank};
pub use revenue::calculate_line_revenue;
pub use schema::{decode_dataset, decode_options};

pub use salesrank_core::{AnalyticsError, AnalyticsResult, SellerId, Sku};
