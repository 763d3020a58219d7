//! Schema gate for untyped JSON input.
//!
//! Checks the top-level shape, rejects legacy field names with a precise path,
//! then decodes into the typed model. Only the canonical schema gets through;
//! nothing is guessed from the shape of the data.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use salesrank_core::{AnalyticsError, AnalyticsResult};

use crate::model::{Product, PurchaseRecord, SalesDataset, Seller};
use crate::options::AnalyzeOptions;

/// Legacy spellings and their canonical replacement, per record kind.
const LEGACY_PRODUCT_FIELDS: &[(&str, &str)] = &[("cost", "purchase_price")];
const LEGACY_RECEIPT_FIELDS: &[(&str, &str)] = &[("seller", "seller_id")];
const LEGACY_ITEM_FIELDS: &[(&str, &str)] = &[("product_id", "sku")];

const BONUS_RATE_KEYS: [&str; 3] = ["first", "podium", "penultimate"];

/// Check and decode `{ sellers, products, purchase_records }`.
pub fn decode_dataset(data: &Value) -> AnalyticsResult<SalesDataset> {
    let Value::Object(data) = data else {
        return Err(AnalyticsError::validation("data must be an object"));
    };

    let sellers = required_array(data, "sellers")?;
    let products = required_array(data, "products")?;
    let purchase_records = required_array(data, "purchase_records")?;

    for (i, product) in products.iter().enumerate() {
        if let Value::Object(product) = product {
            check_product(&format!("products[{i}]"), product)?;
        }
    }
    for (i, receipt) in purchase_records.iter().enumerate() {
        if let Value::Object(receipt) = receipt {
            check_receipt(&format!("purchase_records[{i}]"), receipt)?;
        }
    }

    let dataset = SalesDataset::new(
        decode_records::<Seller>("sellers", sellers)?,
        decode_records::<Product>("products", products)?,
        decode_records::<PurchaseRecord>("purchase_records", purchase_records)?,
    );
    dataset.validate()?;
    Ok(dataset)
}

/// Check and decode the options object. Unknown keys are rejected.
pub fn decode_options(options: &Value) -> AnalyticsResult<AnalyzeOptions> {
    let Value::Object(map) = options else {
        return Err(AnalyticsError::validation("options must be an object"));
    };

    let accepted = AnalyzeOptions::KEYS
        .iter()
        .map(|(canonical, _)| *canonical)
        .collect::<Vec<_>>()
        .join(", ");
    for key in map.keys() {
        let known = AnalyzeOptions::KEYS
            .iter()
            .any(|(canonical, alias)| key == canonical || key == alias);
        if !known {
            return Err(AnalyticsError::schema_mismatch(
                "options",
                key.as_str(),
                format!("one of {accepted}"),
            ));
        }
    }

    let rates = map.get("bonusRates").or_else(|| map.get("bonus_rates"));
    if let Some(Value::Object(rates)) = rates {
        if let Some(key) = rates.keys().find(|k| !BONUS_RATE_KEYS.contains(&k.as_str())) {
            return Err(AnalyticsError::schema_mismatch(
                "options.bonusRates",
                key.as_str(),
                BONUS_RATE_KEYS.join(", "),
            ));
        }
    }

    let decoded = AnalyzeOptions::deserialize(options)
        .map_err(|e| AnalyticsError::validation(format!("invalid options: {e}")))?;
    decoded.validate()?;
    Ok(decoded)
}

fn required_array<'a>(data: &'a Map<String, Value>, name: &str) -> AnalyticsResult<&'a [Value]> {
    match data.get(name) {
        Some(Value::Array(values)) if values.is_empty() => {
            Err(AnalyticsError::validation(format!("{name} array is empty")))
        }
        Some(Value::Array(values)) => Ok(values),
        _ => Err(AnalyticsError::validation(format!("{name} must be an array"))),
    }
}

fn reject_legacy(
    path: &str,
    record: &Map<String, Value>,
    legacy: &[(&str, &str)],
) -> AnalyticsResult<()> {
    for (field, expected) in legacy {
        if record.contains_key(*field) {
            return Err(AnalyticsError::schema_mismatch(path, *field, *expected));
        }
    }
    Ok(())
}

fn check_product(path: &str, product: &Map<String, Value>) -> AnalyticsResult<()> {
    if product.contains_key("id") && !product.contains_key("sku") {
        return Err(AnalyticsError::schema_mismatch(path, "id", "sku"));
    }
    reject_legacy(path, product, LEGACY_PRODUCT_FIELDS)
}

fn check_receipt(path: &str, receipt: &Map<String, Value>) -> AnalyticsResult<()> {
    reject_legacy(path, receipt, LEGACY_RECEIPT_FIELDS)?;

    if let Some(Value::Array(items)) = receipt.get("items") {
        for (i, item) in items.iter().enumerate() {
            if let Value::Object(item) = item {
                reject_legacy(&format!("{path}.items[{i}]"), item, LEGACY_ITEM_FIELDS)?;
            }
        }
    }
    Ok(())
}

/// Decode each object in `values`; non-object entries are dropped.
fn decode_records<T: DeserializeOwned>(name: &str, values: &[Value]) -> AnalyticsResult<Vec<T>> {
    let mut records = Vec::with_capacity(values.len());
    let mut dropped = 0usize;

    for (i, value) in values.iter().enumerate() {
        if !value.is_object() {
            dropped += 1;
            continue;
        }
        let record = T::deserialize(value)
            .map_err(|e| AnalyticsError::validation(format!("{name}[{i}]: {e}")))?;
        records.push(record);
    }

    if dropped > 0 {
        debug!(collection = name, dropped, "dropped non-object records");
    }
    Ok(records)
}
