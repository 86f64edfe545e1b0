use thiserror::Error;
use time::Date;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Streaks {
    /// Length of the run that ends today or yesterday, or 0 if there is none
    pub(crate) current: u32,
    /// Length of the longest run ever recorded
    pub(crate) maximum: u32,
}

/// Compute the current and longest runs of consecutive calendar days in
/// `dates`, which must be in strictly ascending order.
///
/// A run is still current if its last day is `today` or the day before; once
/// a full day passes without a completion, the current streak is 0.  A run
/// ending after `today` (e.g. from clock skew) also counts as current.
pub(crate) fn compute(dates: &[Date], today: Date) -> Result<Streaks, StreakError> {
    let Some((&first, rest)) = dates.split_first() else {
        return Ok(Streaks::default());
    };
    let mut run: u32 = 1;
    let mut maximum: u32 = 1;
    let mut prev = first;
    for &date in rest {
        if date <= prev {
            return Err(StreakError::UnsortedInput {
                previous: prev,
                next: date,
            });
        }
        if prev.next_day() == Some(date) {
            run += 1;
        } else {
            run = 1;
        }
        maximum = maximum.max(run);
        prev = date;
    }
    if (today - prev).whole_days() > 1 {
        run = 0;
    }
    Ok(Streaks {
        current: run,
        maximum,
    })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum StreakError {
    #[error("completion dates out of order: {next} does not come after {previous}")]
    UnsortedInput { previous: Date, next: Date },
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_empty() {
        assert_eq!(
            compute(&[], date!(2025 - 01 - 03)),
            Ok(Streaks {
                current: 0,
                maximum: 0
            })
        );
    }

    #[test]
    fn test_unbroken_run() {
        let dates = [
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 02),
            date!(2025 - 01 - 03),
        ];
        assert_eq!(
            compute(&dates, date!(2025 - 01 - 03)),
            Ok(Streaks {
                current: 3,
                maximum: 3
            })
        );
    }

    #[test]
    fn test_gap() {
        let dates = [date!(2025 - 01 - 01), date!(2025 - 01 - 03)];
        assert_eq!(
            compute(&dates, date!(2025 - 01 - 03)),
            Ok(Streaks {
                current: 1,
                maximum: 1
            })
        );
    }

    #[test]
    fn test_stale_run() {
        let dates = [
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 02),
            date!(2025 - 01 - 03),
        ];
        assert_eq!(
            compute(&dates, date!(2025 - 01 - 06)),
            Ok(Streaks {
                current: 0,
                maximum: 3
            })
        );
    }

    #[test]
    fn test_yesterday_keeps_run() {
        let dates = [date!(2025 - 01 - 01), date!(2025 - 01 - 02)];
        assert_eq!(
            compute(&dates, date!(2025 - 01 - 03)),
            Ok(Streaks {
                current: 2,
                maximum: 2
            })
        );
    }

    #[test]
    fn test_longest_run_in_the_past() {
        let dates = [
            date!(2024 - 06 - 10),
            date!(2024 - 06 - 11),
            date!(2024 - 06 - 12),
            date!(2024 - 06 - 13),
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 02),
        ];
        assert_eq!(
            compute(&dates, date!(2025 - 01 - 02)),
            Ok(Streaks {
                current: 2,
                maximum: 4
            })
        );
    }

    #[test]
    fn test_run_across_year_and_leap_day() {
        let dates = [
            date!(2023 - 12 - 31),
            date!(2024 - 01 - 01),
            date!(2024 - 02 - 28),
            date!(2024 - 02 - 29),
            date!(2024 - 03 - 01),
        ];
        assert_eq!(
            compute(&dates, date!(2024 - 03 - 01)),
            Ok(Streaks {
                current: 3,
                maximum: 3
            })
        );
    }

    #[test]
    fn test_across_dst_change() {
        // Clocks in much of Europe went forward on 2025-03-30; the day is
        // shorter than 24 hours but still consecutive.
        let dates = [
            date!(2025 - 03 - 29),
            date!(2025 - 03 - 30),
            date!(2025 - 03 - 31),
        ];
        assert_eq!(
            compute(&dates, date!(2025 - 03 - 31)),
            Ok(Streaks {
                current: 3,
                maximum: 3
            })
        );
    }

    #[test]
    fn test_single_date() {
        assert_eq!(
            compute(&[date!(2025 - 05 - 05)], date!(2025 - 05 - 05)),
            Ok(Streaks {
                current: 1,
                maximum: 1
            })
        );
        assert_eq!(
            compute(&[date!(2025 - 05 - 05)], date!(2025 - 05 - 07)),
            Ok(Streaks {
                current: 0,
                maximum: 1
            })
        );
    }

    #[test]
    fn test_run_ending_after_today() {
        let dates = [
            date!(2025 - 01 - 04),
            date!(2025 - 01 - 05),
            date!(2025 - 01 - 08),
        ];
        assert_eq!(
            compute(&dates, date!(2025 - 01 - 03)),
            Ok(Streaks {
                current: 1,
                maximum: 2
            })
        );
    }

    #[test]
    fn test_unsorted() {
        let dates = [date!(2025 - 01 - 02), date!(2025 - 01 - 01)];
        assert_eq!(
            compute(&dates, date!(2025 - 01 - 03)),
            Err(StreakError::UnsortedInput {
                previous: date!(2025 - 01 - 02),
                next: date!(2025 - 01 - 01),
            })
        );
    }

    #[test]
    fn test_duplicate() {
        let dates = [date!(2025 - 01 - 01), date!(2025 - 01 - 01)];
        assert!(compute(&dates, date!(2025 - 01 - 03)).is_err());
    }
}
