use time::Weekday::{self, *};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Zero-based index of the weekday with Monday first
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_monday()
    }
}

/// Sizing and weekday alignment of a single calendar year
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct YearGeometry {
    pub(crate) year: i32,
    pub(crate) day_count: u16,
    /// Number of blank cells placed before January 1st so that it lands in
    /// its weekday's row
    pub(crate) leading_pad: u8,
}

impl YearGeometry {
    pub(crate) fn new(year: i32) -> YearGeometry {
        YearGeometry {
            year,
            day_count: day_count(year),
            leading_pad: first_weekday_offset(year),
        }
    }

    pub(crate) fn grid_len(&self) -> usize {
        usize::from(self.leading_pad) + usize::from(self.day_count)
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn day_count(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Weekday of January 1st of `year` in the proleptic Gregorian calendar,
/// counted from Monday = 0.
///
/// This is Gauss's formula and works for any `i32` year, unlike
/// [`time::Date`], which stops at ±9999.
pub(crate) fn first_weekday_offset(year: i32) -> u8 {
    let y = i64::from(year) - 1;
    // 0 = Sunday
    let from_sunday =
        (1 + 5 * y.rem_euclid(4) + 4 * y.rem_euclid(100) + 6 * y.rem_euclid(400)).rem_euclid(7);
    let weekday = match from_sunday {
        0 => Sunday,
        1 => Monday,
        2 => Tuesday,
        3 => Wednesday,
        4 => Thursday,
        5 => Friday,
        _ => Saturday,
    };
    weekday.index0()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month::January};

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_day_count_matches_leap_years() {
        for year in 1800..=2400 {
            assert_eq!(day_count(year) == 366, is_leap_year(year), "year {year}");
            assert_eq!(day_count(year), time::util::days_in_year(year));
        }
    }

    #[test]
    fn test_first_weekday_offset() {
        assert_eq!(first_weekday_offset(2023), 6); // Sunday
        assert_eq!(first_weekday_offset(2024), 0); // Monday
        assert_eq!(first_weekday_offset(2025), 2); // Wednesday
        assert_eq!(first_weekday_offset(2026), 3); // Thursday
        assert_eq!(first_weekday_offset(2000), 5); // Saturday
    }

    #[test]
    fn test_first_weekday_offset_agrees_with_time() {
        for year in 1..=9999 {
            let jan1 = Date::from_calendar_date(year, January, 1).unwrap();
            assert_eq!(
                first_weekday_offset(year),
                jan1.weekday().index0(),
                "year {year}"
            );
        }
    }

    #[test]
    fn test_first_weekday_offset_outside_time_range() {
        for year in [i32::MIN, -100_000, 0, 10_000, 123_456, i32::MAX] {
            assert!(first_weekday_offset(year) < 7, "year {year}");
        }
        // The Gregorian cycle repeats every 400 years
        assert_eq!(first_weekday_offset(10_000), first_weekday_offset(9600));
        assert_eq!(first_weekday_offset(0), first_weekday_offset(400));
    }

    #[test]
    fn test_geometry() {
        let geom = YearGeometry::new(2024);
        assert_eq!(
            geom,
            YearGeometry {
                year: 2024,
                day_count: 366,
                leading_pad: 0
            }
        );
        assert_eq!(geom.grid_len(), 366);
        assert_eq!(YearGeometry::new(2023).grid_len(), 371);
    }
}
