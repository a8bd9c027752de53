//! Custody day counting.
//!
//! The billing rule for days spent in custody is deliberately asymmetric:
//! the admission day is never counted, while the exit day (or the day the
//! range truncates the stay) is counted. In date arithmetic:
//!
//! ```text
//! days = min(exit_date ?? range_end, range_end) + 1 day
//!      - max(entry_date + 1 day, range_start)
//! ```
//!
//! clamped at zero. The SQL in the reporting queries mirrors this function
//! exactly; the integration tests assert agreement.

use crate::types::Date;

/// Days of custody attributable to one entry within `[range_start, range_end]`.
///
/// `exit_date` of `None` means the animal is still present, so counting
/// runs to the end of the range.
pub fn custody_days(
    entry_date: Date,
    exit_date: Option<Date>,
    range_start: Date,
    range_end: Date,
) -> i64 {
    let count_from = (entry_date + chrono::Days::new(1)).max(range_start);
    let count_to = exit_date.unwrap_or(range_end).min(range_end) + chrono::Days::new(1);
    (count_to - count_from).num_days().max(0)
}
