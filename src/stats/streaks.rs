//! Daily streak tracking
//!
//! A streak counts consecutive calendar days with at least one workout and
//! stays alive while the newest workout day is today or yesterday.

use chrono::NaiveDate;

/// Current streak over `days`, evaluated on `today`.
///
/// `days` may be unsorted and contain duplicates.
pub fn current_streak<I>(days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut unique: Vec<NaiveDate> = days.into_iter().collect();
    unique.sort_unstable_by(|a, b| b.cmp(a));
    unique.dedup();

    let Some(newest) = unique.first() else {
        return 0;
    };

    let days_since = (today - *newest).num_days();
    if !(0..=1).contains(&days_since) {
        return 0;
    }

    let mut streak = 1;
    for pair in unique.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap() - Duration::days(offset)
    }

    #[test]
    fn test_three_consecutive_days() {
        assert_eq!(current_streak([day(0), day(1), day(2)], day(0)), 3);
    }

    #[test]
    fn test_gap_breaks_streak() {
        assert_eq!(current_streak([day(3)], day(0)), 0);
        assert_eq!(current_streak([day(0), day(1), day(3), day(4)], day(0)), 2);
    }

    #[test]
    fn test_streak_alive_from_yesterday() {
        assert_eq!(current_streak([day(1), day(2)], day(0)), 2);
    }

    #[test]
    fn test_duplicates_and_order() {
        assert_eq!(current_streak([day(2), day(0), day(0), day(1), day(1)], day(0)), 3);
    }

    #[test]
    fn test_empty_and_future() {
        assert_eq!(current_streak(Vec::new(), day(0)), 0);
        // A day after `today` (clock skew) does not count as active
        assert_eq!(current_streak([day(-1)], day(0)), 0);
    }
}
