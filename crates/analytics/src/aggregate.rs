//! Single-pass reduction of receipts into per-seller statistics.

use std::collections::HashMap;

use tracing::{debug, warn};

use salesrank_core::{SellerId, Sku, index_first_wins, round2};

use crate::model::{ProductQuantity, SalesDataset, Seller, SellerStat};
use crate::options::AnalyzeOptions;

/// Running totals for one seller. Rounding happens only in [`Self::finalize`].
#[derive(Debug)]
struct SellerAccumulator {
    seller_id: SellerId,
    name: String,
    sales_count: u64,
    revenue: f64,
    profit: f64,
    products: Vec<ProductQuantity>,
    product_slots: HashMap<Sku, usize>,
}

impl SellerAccumulator {
    fn new(seller_id: SellerId, seller: &Seller) -> Self {
        let name = seller.display_name(&seller_id);
        Self {
            seller_id,
            name,
            sales_count: 0,
            revenue: 0.0,
            profit: 0.0,
            products: Vec::new(),
            product_slots: HashMap::new(),
        }
    }

    fn record_item(&mut self, sku: &Sku, revenue: f64, profit: f64, quantity: f64) {
        self.revenue += revenue;
        self.profit += profit;

        let slot = match self.product_slots.get(sku) {
            Some(&slot) => slot,
            None => {
                self.products.push(ProductQuantity {
                    sku: sku.clone(),
                    quantity: 0.0,
                });
                let slot = self.products.len() - 1;
                self.product_slots.insert(sku.clone(), slot);
                slot
            }
        };
        self.products[slot].quantity += quantity;
    }

    /// Rounds the totals. A total that overflowed or went NaN finalizes to 0.
    fn finalize(self) -> SellerStat {
        if !(self.revenue.is_finite() && self.profit.is_finite()) {
            warn!(
                seller_id = %self.seller_id,
                "non-finite sales totals reset to zero"
            );
        }
        let products = self
            .products
            .into_iter()
            .map(|p| ProductQuantity {
                quantity: finite_or_zero(p.quantity),
                sku: p.sku,
            })
            .collect();

        SellerStat {
            seller_id: self.seller_id,
            name: self.name,
            sales_count: self.sales_count,
            revenue: round2(finite_or_zero(self.revenue)),
            profit: round2(finite_or_zero(self.profit)),
            products,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Accumulate revenue, profit, receipt count and per-product quantities per seller.
///
/// Receipts without a known seller, or outside the options' date window, are
/// skipped. Items without a SKU are skipped; items whose SKU is not in the
/// catalog count with a unit cost of 0. Sellers come out in the order they
/// first appear in the receipts.
pub fn aggregate(dataset: &SalesDataset, options: &AnalyzeOptions) -> Vec<SellerStat> {
    let (sellers, duplicate_sellers) = index_first_wins(&dataset.sellers);
    let (products, duplicate_products) = index_first_wins(&dataset.products);
    if duplicate_sellers > 0 || duplicate_products > 0 {
        debug!(
            duplicate_sellers,
            duplicate_products, "ignored duplicate reference records (first occurrence wins)"
        );
    }

    let mut stats: Vec<SellerAccumulator> = Vec::new();
    let mut slots: HashMap<SellerId, usize> = HashMap::new();
    let mut skipped_receipts = 0usize;
    let mut skipped_items = 0usize;

    for receipt in &dataset.purchase_records {
        let Some(seller_id) = receipt.seller_id.as_ref() else {
            skipped_receipts += 1;
            continue;
        };
        let Some(seller) = sellers.get(seller_id) else {
            debug!(%seller_id, "skipping receipt for unknown seller");
            skipped_receipts += 1;
            continue;
        };
        if !options.admits(receipt.date) {
            skipped_receipts += 1;
            continue;
        }

        let slot = match slots.get(seller_id) {
            Some(&slot) => slot,
            None => {
                stats.push(SellerAccumulator::new(seller_id.clone(), seller));
                slots.insert(seller_id.clone(), stats.len() - 1);
                stats.len() - 1
            }
        };
        let stat = &mut stats[slot];
        stat.sales_count += 1;

        for item in &receipt.items {
            let Some(sku) = item.sku.as_ref() else {
                skipped_items += 1;
                continue;
            };
            let unit_cost = products.get(sku).map_or(0.0, |p| p.unit_cost());
            stat.record_item(
                sku,
                item.revenue(),
                item.profit(unit_cost),
                item.effective_quantity(),
            );
        }
    }

    debug!(
        sellers = stats.len(),
        skipped_receipts, skipped_items, "aggregated purchase records"
    );

    stats.into_iter().map(SellerAccumulator::finalize).collect()
}
