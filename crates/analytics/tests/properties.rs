use std::collections::HashSet;

use proptest::prelude::*;
use salesrank_analytics::{
    AnalyzeOptions, LineItem, Product, PurchaseRecord, SalesDataset, Seller, TOP_PRODUCTS_LIMIT,
    analyze,
};
use salesrank_core::round2;
use serde_json::Value;

const KNOWN_SELLERS: usize = 5;

fn line_item() -> impl Strategy<Value = LineItem> {
    (0usize..25, 0u32..100_000, 1u32..20, 0u32..=100).prop_map(|(p, cents, qty, discount)| {
        LineItem::new(format!("p{p}"), cents as f64 / 100.0, qty as f64)
            .with_discount(discount as f64)
    })
}

fn receipt() -> impl Strategy<Value = PurchaseRecord> {
    // Seller indexes past KNOWN_SELLERS are not in the catalog.
    (0usize..KNOWN_SELLERS + 2, prop::collection::vec(line_item(), 0..6)).prop_map(
        |(s, items)| {
            items
                .into_iter()
                .fold(PurchaseRecord::new(format!("s{s}")), PurchaseRecord::with_item)
        },
    )
}

fn dataset() -> impl Strategy<Value = SalesDataset> {
    (
        prop::collection::vec(0u32..50_000, 20),
        prop::collection::vec(receipt(), 1..40),
    )
        .prop_map(|(costs, receipts)| {
            let sellers = (0..KNOWN_SELLERS)
                .map(|i| Seller::new(format!("s{i}")))
                .collect();
            let products = costs
                .into_iter()
                .enumerate()
                .map(|(i, cents)| {
                    Product::new(format!("p{i}")).with_purchase_price(cents as f64 / 100.0)
                })
                .collect();
            SalesDataset::new(sellers, products, receipts)
        })
}

/// Prices and costs near `f64::MAX`, mixed with full discounts, so line
/// arithmetic overflows to infinity and `inf * 0` yields NaN.
fn extreme_line_item() -> impl Strategy<Value = LineItem> {
    let price = prop_oneof![
        Just(f64::MAX),
        Just(1e308),
        Just(-1e308),
        (0u32..100_000).prop_map(|cents| cents as f64 / 100.0),
    ];
    let discount = prop_oneof![Just(100.0), Just(0.0), (0u32..=100).prop_map(f64::from)];
    (0usize..20, price, 1u32..20, discount).prop_map(|(p, price, qty, discount)| {
        LineItem::new(format!("p{p}"), price, qty as f64).with_discount(discount)
    })
}

fn extreme_dataset() -> impl Strategy<Value = SalesDataset> {
    let cost = prop_oneof![Just(f64::MAX), Just(0.0), (0u32..50_000).prop_map(f64::from)];
    let receipt = (0usize..KNOWN_SELLERS, prop::collection::vec(extreme_line_item(), 1..6))
        .prop_map(|(s, items)| {
            items
                .into_iter()
                .fold(PurchaseRecord::new(format!("s{s}")), PurchaseRecord::with_item)
        });
    (
        prop::collection::vec(cost, 20),
        prop::collection::vec(receipt, 1..30),
    )
        .prop_map(|(costs, receipts)| {
            let sellers = (0..KNOWN_SELLERS)
                .map(|i| Seller::new(format!("s{i}")))
                .collect();
            let products = costs
                .into_iter()
                .enumerate()
                .map(|(i, cost)| Product::new(format!("p{i}")).with_purchase_price(cost))
                .collect();
            SalesDataset::new(sellers, products, receipts)
        })
}

fn assert_numbers_serialized(row: &Value) {
    for field in ["revenue", "profit", "bonus"] {
        assert!(row[field].is_number(), "{field} serialized as {}", row[field]);
    }
}

#[test]
fn overflowing_seller_serializes_as_zero_totals() {
    let ds = SalesDataset::new(
        vec![Seller::new("s0"), Seller::new("s1")],
        vec![Product::new("p0").with_purchase_price(1.0)],
        vec![
            PurchaseRecord::new("s0")
                .with_item(LineItem::new("p0", f64::MAX, 10.0).with_discount(100.0)),
            PurchaseRecord::new("s1").with_item(LineItem::new("p0", 3.0, 2.0)),
        ],
    );
    let report = analyze(&ds, &AnalyzeOptions::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["seller_id"], "s1");
    assert_eq!(rows[1]["seller_id"], "s0");
    assert_eq!(rows[1]["revenue"], 0.0);
    assert_eq!(rows[1]["profit"], 0.0);
    rows.iter().for_each(assert_numbers_serialized);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: the report is ordered by descending profit.
    #[test]
    fn report_is_sorted_by_profit(ds in dataset()) {
        let report = analyze(&ds, &AnalyzeOptions::default()).unwrap();
        for pair in report.windows(2) {
            prop_assert!(pair[0].profit >= pair[1].profit);
        }
    }

    /// Property: at most one row per distinct known seller that has receipts.
    #[test]
    fn report_length_is_bounded_by_known_sellers(ds in dataset()) {
        let report = analyze(&ds, &AnalyzeOptions::default()).unwrap();
        let known: HashSet<_> = ds.sellers.iter().filter_map(|s| s.id.clone()).collect();
        let active: HashSet<_> = ds
            .purchase_records
            .iter()
            .filter_map(|r| r.seller_id.clone())
            .filter(|id| known.contains(id))
            .collect();
        prop_assert!(report.len() <= active.len());

        let reported: HashSet<_> = report.iter().map(|r| r.seller_id.clone()).collect();
        prop_assert_eq!(reported.len(), report.len());
    }

    /// Property: bonuses follow the default rank brackets exactly.
    #[test]
    fn bonus_matches_rank_brackets(ds in dataset()) {
        let report = analyze(&ds, &AnalyzeOptions::default()).unwrap();
        let n = report.len();
        for (i, row) in report.iter().enumerate() {
            let rate = if i == 0 {
                0.15
            } else if i == 1 || i == 2 {
                0.10
            } else if n >= 2 && i == n - 2 {
                0.05
            } else {
                0.0
            };
            prop_assert_eq!(row.bonus, round2(row.profit * rate));
        }
    }

    /// Property: top products are bounded and ordered by quantity.
    #[test]
    fn top_products_are_bounded_and_sorted(ds in dataset()) {
        let report = analyze(&ds, &AnalyzeOptions::default()).unwrap();
        for row in &report {
            prop_assert!(row.top_products.len() <= TOP_PRODUCTS_LIMIT);
            for pair in row.top_products.windows(2) {
                prop_assert!(pair[0].quantity >= pair[1].quantity);
            }
        }
    }

    /// Property: the profit filter only ever removes rows, never reorders them.
    #[test]
    fn min_profit_filter_is_a_subsequence(ds in dataset(), min in -1_000i32..5_000) {
        let all = analyze(&ds, &AnalyzeOptions::default()).unwrap();
        let options = AnalyzeOptions::default().with_min_profit(min as f64);
        let filtered = analyze(&ds, &options).unwrap();

        let expected: Vec<_> = all
            .iter()
            .filter(|r| r.profit >= min as f64)
            .map(|r| r.seller_id.clone())
            .collect();
        let actual: Vec<_> = filtered.iter().map(|r| r.seller_id.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: analysis is a pure function of its input.
    #[test]
    fn analysis_is_idempotent(ds in dataset()) {
        let options = AnalyzeOptions::default();
        prop_assert_eq!(analyze(&ds, &options).unwrap(), analyze(&ds, &options).unwrap());
    }

    /// Property: overflowing and zero-factor items never break the profit
    /// order or leak non-finite numbers into the report.
    #[test]
    fn extreme_items_keep_report_sorted_and_finite(ds in extreme_dataset()) {
        let report = analyze(&ds, &AnalyzeOptions::default()).unwrap();
        for pair in report.windows(2) {
            prop_assert!(pair[0].profit >= pair[1].profit);
        }
        for row in &report {
            prop_assert!(row.revenue.is_finite());
            prop_assert!(row.profit.is_finite());
            prop_assert!(row.bonus.is_finite());
            for product in &row.top_products {
                prop_assert!(product.quantity.is_finite());
            }
        }

        let json = serde_json::to_value(&report).unwrap();
        for row in json.as_array().unwrap() {
            for field in ["revenue", "profit", "bonus"] {
                prop_assert!(row[field].is_number(), "{} serialized as {}", field, row[field]);
            }
        }
    }
}
