mod geometry;
mod grid;
pub(crate) use self::grid::DayGrid;
