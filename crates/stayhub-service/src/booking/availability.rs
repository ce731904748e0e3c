//! Half-open stay date ranges and the overlap predicate.
//!
//! A stay occupies `[check_in, check_out)`. The departure date itself is
//! free, so a guest may check in on the same day another checks out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stayhub_core::error::AppError;
use stayhub_core::result::AppResult;

/// A validated half-open date interval `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First occupied night.
    pub check_in: NaiveDate,
    /// Departure date (not occupied).
    pub check_out: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `check_out <= check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<Self> {
        if check_out <= check_in {
            return Err(AppError::invalid_date_range(
                "Check-out date must be after check-in date",
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Reject a stay starting before `today`. A stay starting today is fine.
    pub fn validate_not_past(&self, today: NaiveDate) -> AppResult<()> {
        if self.check_in < today {
            return Err(AppError::invalid_date_range(
                "Check-in date cannot be in the past",
            ));
        }
        Ok(())
    }

    /// Number of nights covered. Always at least 1 for a valid range.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open interval overlap: `[a1, a2)` and `[b1, b2)` conflict iff
    /// `a1 < b2 && a2 > b1`. Ranges that merely touch do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}
