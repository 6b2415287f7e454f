//! Featured performer rotation
//!
//! Day `d` after the epoch features the performer at index
//! `d mod len` of the creation-ordered list. No state is persisted: the
//! result depends only on the list and the date. Dates before the epoch
//! rotate backwards (Euclidean remainder), so every date has a defined pick.

use chrono::NaiveDate;
use setlist_common::time::days_between;

/// Index of the featured entry for a day offset, or `None` for an empty list
pub fn featured_index(days_since_epoch: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = i64::try_from(count).ok()?;
    usize::try_from(days_since_epoch.rem_euclid(count)).ok()
}

/// Pick the featured entry of `items` for `today`
pub fn select_featured<T>(items: &[T], epoch: NaiveDate, today: NaiveDate) -> Option<&T> {
    featured_index(days_between(epoch, today), items.len()).and_then(|i| items.get(i))
}
