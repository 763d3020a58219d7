//! End-to-end analysis: validate, aggregate, rank.

use serde_json::Value;
use tracing::{debug, instrument};

use salesrank_core::AnalyticsResult;

use crate::aggregate::aggregate;
use crate::model::{RankedSeller, SalesDataset};
use crate::options::AnalyzeOptions;
use crate::rank::rank;
use crate::schema::{decode_dataset, decode_options};

/// Rank sellers by profit and attach bonuses and top products.
///
/// Fails only on malformed top-level input; dirty individual records are
/// defaulted or skipped. The call is pure: equal inputs give equal outputs.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        sellers = dataset.sellers.len(),
        products = dataset.products.len(),
        receipts = dataset.purchase_records.len()
    )
)]
pub fn analyze(
    dataset: &SalesDataset,
    options: &AnalyzeOptions,
) -> AnalyticsResult<Vec<RankedSeller>> {
    options.validate()?;
    dataset.validate()?;

    let stats = aggregate(dataset, options);
    let aggregated = stats.len();
    let ranked = rank(stats, options);

    debug!(aggregated, ranked = ranked.len(), "sales analysis complete");
    Ok(ranked)
}

/// [`analyze`] over untyped JSON: `data` must hold `sellers`, `products` and
/// `purchase_records`; `options` must be an object (possibly empty).
pub fn analyze_json(data: &Value, options: &Value) -> AnalyticsResult<Vec<RankedSeller>> {
    let options = decode_options(options)?;
    let dataset = decode_dataset(data)?;
    analyze(&dataset, &options)
}
