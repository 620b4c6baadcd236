//! Habit streak computation.
//!
//! DESIGN
//! ======
//! `streak` on a habit row is a cached value, always re-derived from the full
//! completion-date set. The original client incremented the cached value on
//! completion and only recomputed on undo, which let the two paths drift
//! under rapid toggling. Here both directions funnel through
//! [`compute_streak`], so the cache can never disagree with the dates.

use chrono::{Days, NaiveDate};

/// Count consecutive completed days ending at `today` (when `today` is in
/// the set) or at the most recent day before `today`. A gap stops the count.
///
/// The slice does not need to be sorted or deduplicated.
#[must_use]
pub fn compute_streak(completed_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut dates = completed_dates.to_vec();
    dates.sort_unstable();
    dates.dedup();

    let mut cursor = if dates.binary_search(&today).is_ok() {
        today
    } else {
        let Some(yesterday) = today.checked_sub_days(Days::new(1)) else {
            return 0;
        };
        yesterday
    };

    let mut streak = 0;
    while dates.binary_search(&cursor).is_ok() {
        streak += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// Whether `today` is already marked complete.
#[must_use]
pub fn is_completed_on(completed_dates: &[NaiveDate], day: NaiveDate) -> bool {
    completed_dates.contains(&day)
}

/// Toggle `today`'s completion in place and return the recomputed streak.
///
/// Marking and unmarking both recompute from the resulting set, so toggling
/// twice always restores the prior streak.
pub fn toggle_completion(completed_dates: &mut Vec<NaiveDate>, today: NaiveDate) -> u32 {
    if is_completed_on(completed_dates, today) {
        completed_dates.retain(|d| *d != today);
    } else {
        completed_dates.push(today);
    }
    compute_streak(completed_dates, today)
}

#[cfg(test)]
#[path = "streak_test.rs"]
mod tests;
