//! Stay price computation.
//!
//! All currency amounts are integer cents, so totals over any number of
//! nights are exact.

use serde::{Deserialize, Serialize};

use super::availability::DateRange;

/// The computed cost of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayQuote {
    /// Number of nights.
    pub nights: i64,
    /// Total price in cents: `nights * price_per_night_cents`.
    pub total_price_cents: i64,
}

/// Compute nights and total price for a stay.
///
/// Pure and deterministic; the range has already been validated, so
/// `nights` is always positive.
pub fn compute_stay(range: &DateRange, price_per_night_cents: i64) -> StayQuote {
    let nights = range.nights();
    StayQuote {
        nights,
        total_price_cents: nights * price_per_night_cents,
    }
}
