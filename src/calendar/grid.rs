use super::geometry::{WeekdayExt, YearGeometry, DAYS_IN_WEEK};
use std::cmp::Ordering;
use std::io::{self, Write};
use std::iter::successors;
use thiserror::Error;
use time::Weekday::{self, *};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// State that every day of a year after the current one starts out in.
///
/// Days of future years have not happened yet, yet they are shown as missed;
/// change this to `DayState::Empty` to show them blank instead.
const FUTURE_YEAR_STATE: DayState = DayState::Missed;

const COMPLETED_GLYPH: &str = "██";
const MISSED_GLYPH: &str = "░░";
const BLANK_GLYPH: &str = "  ";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DayState {
    /// The day has not happened yet
    Empty,
    Missed,
    Completed,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Cell {
    /// Placeholder before January 1st; not a day at all
    Pad,
    Day(DayState),
}

impl Cell {
    fn glyph(self) -> &'static str {
        match self {
            Cell::Day(DayState::Completed) => COMPLETED_GLYPH,
            Cell::Day(DayState::Missed) => MISSED_GLYPH,
            Cell::Day(DayState::Empty) | Cell::Pad => BLANK_GLYPH,
        }
    }
}

/// A year of day states laid out column-major, one column per week and one
/// row per weekday, Monday first
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayGrid {
    geometry: YearGeometry,
    // Invariant: `cells.len() == geometry.grid_len()`, and exactly the first
    // `geometry.leading_pad` cells are `Cell::Pad`
    cells: Vec<Cell>,
}

impl DayGrid {
    /// Build the grid for `year` as seen on day `today_ordinal` (1-based) of
    /// `current_year`.  `completions` are the 1-based ordinals of the days of
    /// `year` on which the habit was completed; repeats are harmless.
    pub(crate) fn build<I>(
        year: i32,
        current_year: i32,
        today_ordinal: u16,
        completions: I,
    ) -> Result<DayGrid, GridError>
    where
        I: IntoIterator<Item = u16>,
    {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(GridError::InvalidYear(year));
        }
        let geometry = YearGeometry::new(year);
        let mut states = classify(geometry, current_year, today_ordinal);
        for ordinal in completions {
            let slot = usize::from(ordinal)
                .checked_sub(1)
                .and_then(|i| states.get_mut(i))
                .ok_or(GridError::OutOfRange { year, ordinal })?;
            *slot = DayState::Completed;
        }
        let mut cells = vec![Cell::Pad; usize::from(geometry.leading_pad)];
        cells.extend(states.into_iter().map(Cell::Day));
        debug_assert_eq!(
            cells.len(),
            geometry.grid_len(),
            "grid length should be leading pad plus day count"
        );
        Ok(DayGrid { geometry, cells })
    }

    pub(crate) fn year(&self) -> i32 {
        self.geometry.year
    }

    /// Lay the grid out as seven lines of text, Monday through Sunday, each
    /// consisting of a weekday label, a space, and one two-column glyph per
    /// week
    pub(crate) fn render(&self) -> Vec<String> {
        iter_weekdays()
            .map(|wd| {
                let mut line = String::from(weekday_label(wd));
                line.push(' ');
                for cell in self
                    .cells
                    .iter()
                    .skip(usize::from(wd.index0()))
                    .step_by(DAYS_IN_WEEK)
                {
                    line.push_str(cell.glyph());
                }
                line
            })
            .collect()
    }

    pub(crate) fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for line in self.render() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("year {0} is outside of the supported range 1..=9999")]
    InvalidYear(i32),
    #[error("there is no day {ordinal} in year {year}")]
    OutOfRange { year: i32, ordinal: u16 },
}

// Days before today in the current year are missed and the rest have yet to
// happen.  Other years are missed throughout.
fn classify(geometry: YearGeometry, current_year: i32, today_ordinal: u16) -> Vec<DayState> {
    let days = usize::from(geometry.day_count);
    match geometry.year.cmp(&current_year) {
        Ordering::Less => vec![DayState::Missed; days],
        Ordering::Equal => {
            let elapsed = usize::from(today_ordinal.saturating_sub(1)).min(days);
            (0..days)
                .map(|i| {
                    if i < elapsed {
                        DayState::Missed
                    } else {
                        DayState::Empty
                    }
                })
                .collect()
        }
        Ordering::Greater => vec![FUTURE_YEAR_STATE; days],
    }
}

fn iter_weekdays() -> impl Iterator<Item = Weekday> {
    successors(Some(Monday), |wd| Some(wd.next())).take(DAYS_IN_WEEK)
}

fn weekday_label(wd: Weekday) -> char {
    match wd {
        Monday => 'M',
        Tuesday | Thursday => 'T',
        Wednesday => 'W',
        Friday => 'F',
        Saturday | Sunday => 'S',
    }
}
