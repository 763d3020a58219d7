//! Profit ranking, bonus assignment and top-product truncation.

use std::cmp::Ordering;

use salesrank_core::round2;

use crate::bonus::calculate_bonus;
use crate::model::{ProductQuantity, RankedSeller, SellerStat};
use crate::options::AnalyzeOptions;

/// Number of products reported per seller.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Highest first; NaN sorts after every number, including -inf.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Filter by `min_profit`, sort by profit (highest first), then attach bonuses
/// and top products.
///
/// Sorting is stable: sellers with equal profit keep their aggregation order.
/// A NaN profit ranks last and earns no bonus.
pub fn rank(stats: Vec<SellerStat>, options: &AnalyzeOptions) -> Vec<RankedSeller> {
    let mut kept: Vec<SellerStat> = stats
        .into_iter()
        .filter(|s| options.keeps_profit(s.profit))
        .collect();
    kept.sort_by(|a, b| descending(a.profit, b.profit));

    let total = kept.len();
    kept.into_iter()
        .enumerate()
        .map(|(index, stat)| {
            let bonus = round2(calculate_bonus(index, total, &stat, &options.bonus_rates));
            RankedSeller {
                top_products: top_products(stat.products),
                seller_id: stat.seller_id,
                name: stat.name,
                sales_count: stat.sales_count,
                revenue: stat.revenue,
                profit: stat.profit,
                bonus,
            }
        })
        .collect()
}

/// Highest quantities first (stable over first-seen order), at most [`TOP_PRODUCTS_LIMIT`].
fn top_products(mut products: Vec<ProductQuantity>) -> Vec<ProductQuantity> {
    products.sort_by(|a, b| descending(a.quantity, b.quantity));
    products.truncate(TOP_PRODUCTS_LIMIT);
    products
}
