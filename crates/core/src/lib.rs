//! `salesrank-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the analytics
//! pipeline and its front ends (no IO, no logging setup).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;

pub use entity::{Entity, index_first_wins};
pub use error::{AnalyticsError, AnalyticsResult};
pub use id::{SellerId, Sku};
pub use money::round2;
