//! Rank-based bonus: a fraction of the seller's profit chosen by rank position.

use serde::{Deserialize, Serialize};

use salesrank_core::{AnalyticsError, AnalyticsResult};

use crate::model::SellerStat;

/// Fractions of profit paid per rank bracket.
///
/// Brackets are checked in order: rank 0 gets `first`, ranks 1 and 2 get
/// `podium`, the second-to-last rank gets `penultimate`, everyone else 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BonusRates {
    pub first: f64,
    pub podium: f64,
    pub penultimate: f64,
}

impl Default for BonusRates {
    fn default() -> Self {
        Self {
            first: 0.15,
            podium: 0.10,
            penultimate: 0.05,
        }
    }
}

impl BonusRates {
    /// Rate for a 0-based position in a ranking of `total_count` sellers.
    pub fn rate_for(&self, rank_index: usize, total_count: usize) -> f64 {
        if rank_index == 0 {
            self.first
        } else if rank_index == 1 || rank_index == 2 {
            self.podium
        } else if total_count.checked_sub(2) == Some(rank_index) {
            self.penultimate
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        let rates = [
            ("first", self.first),
            ("podium", self.podium),
            ("penultimate", self.penultimate),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(AnalyticsError::validation(format!(
                    "bonus rate `{name}` must be a finite non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// Unrounded bonus for `seller` at `rank_index`; 0 when the profit is not finite.
pub fn calculate_bonus(
    rank_index: usize,
    total_count: usize,
    seller: &SellerStat,
    rates: &BonusRates,
) -> f64 {
    if !seller.profit.is_finite() {
        return 0.0;
    }
    seller.profit * rates.rate_for(rank_index, total_count)
}
