//! Time-entry arithmetic.
//!
//! Durations are whole minutes; project totals are hours with two
//! decimal places. The total is always recomputed from the full entry
//! list rather than adjusted incrementally, so it self-corrects after
//! any entry-level edit.

use crate::types::Timestamp;

/// Minutes between two instants, rounded to the nearest minute (half
/// away from zero: 90 seconds -> 2).
pub fn duration_minutes(start: Timestamp, end: Timestamp) -> i64 {
    let seconds = (end - start).num_seconds();
    (seconds as f64 / 60.0).round() as i64
}

/// Convert a minute total to hours rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use castworks_core::timeclock::total_hours;
///
/// assert_eq!(total_hours(90), 1.5);
/// assert_eq!(total_hours(50), 0.83);
/// ```
pub fn total_hours(total_minutes: i64) -> f64 {
    (total_minutes as f64 / 60.0 * 100.0).round() / 100.0
}
