//! Analysis options: a closed set of named, optional knobs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use salesrank_core::{AnalyticsError, AnalyticsResult};

use crate::bonus::BonusRates;

/// Knobs accepted by [`crate::analyze`].
///
/// - `min_profit`: sellers whose rounded profit is below it are dropped before ranking.
/// - `date_from` / `date_to`: inclusive receipt date window. When either bound is
///   set, receipts without a readable date are skipped.
/// - `bonus_rates`: fractions of profit paid per rank bracket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalyzeOptions {
    #[serde(default, alias = "min_profit", skip_serializing_if = "Option::is_none")]
    pub min_profit: Option<f64>,
    #[serde(default, alias = "date_from", skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, alias = "date_to", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, alias = "bonus_rates")]
    pub bonus_rates: BonusRates,
}

impl AnalyzeOptions {
    /// JSON keys accepted in an options object, canonical spelling first.
    pub const KEYS: [(&'static str, &'static str); 4] = [
        ("minProfit", "min_profit"),
        ("dateFrom", "date_from"),
        ("dateTo", "date_to"),
        ("bonusRates", "bonus_rates"),
    ];

    pub fn with_min_profit(mut self, min_profit: f64) -> Self {
        self.min_profit = Some(min_profit);
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn with_bonus_rates(mut self, bonus_rates: BonusRates) -> Self {
        self.bonus_rates = bonus_rates;
        self
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.min_profit.is_some_and(f64::is_nan) {
            return Err(AnalyticsError::validation("minProfit must be a number"));
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(AnalyticsError::validation(format!(
                    "dateFrom ({from}) is after dateTo ({to})"
                )));
            }
        }
        self.bonus_rates.validate()
    }

    pub fn has_date_window(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Whether a receipt dated `date` falls inside the configured window.
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        if !self.has_date_window() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }

    /// Whether a seller with this (rounded) profit survives the profit filter.
    pub fn keeps_profit(&self, profit: f64) -> bool {
        self.min_profit.is_none_or(|min| profit >= min)
    }
}
