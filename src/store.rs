use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};
use tracing::{debug, warn};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// File extension of the per-habit files in the store directory
const HABIT_EXT: &str = "log";

const MAX_NAME_LEN: usize = 64;

/// A directory holding one file per habit, listing the dates on which the
/// habit was completed, one `YYYY-MM-DD` date per line in the order they were
/// recorded
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HabitStore {
    dir: PathBuf,
}

impl HabitStore {
    pub(crate) fn open<P: Into<PathBuf>>(dir: P) -> Result<HabitStore, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        debug!(dir = %dir.display(), "Opened habit store");
        Ok(HabitStore { dir })
    }

    /// Names of all habits with at least one recorded completion, sorted
    pub(crate) fn habits(&self) -> Result<Vec<String>, StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() || path.extension().and_then(OsStr::to_str) != Some(HABIT_EXT) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                // Names are looked up lowercased, so any other spelling is unreachable
                Some(name) if normalize_name(name).is_ok_and(|n| n == name) => {
                    names.push(name.to_owned());
                }
                _ => debug!(path = %path.display(), "Skipping stray file in store"),
            }
        }
        names.sort_unstable();
        Ok(names)
    }

    /// Record that `habit` was completed on `date`.  Returns `false` if the
    /// completion was already recorded.
    pub(crate) fn mark(&self, habit: &str, date: Date) -> Result<bool, StoreError> {
        let path = self.habit_path(habit)?;
        let content = read_bytes(&path)?;
        if parse_dates(&path, &content).contains(&date) {
            debug!(habit, %date, "Completion already recorded");
            return Ok(false);
        }
        let line = date.format(&YMD_FMT)?;
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        let mut fp = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;
        // A hand-edited file may lack a final newline
        if content.last().is_some_and(|&b| b != b'\n') {
            writeln!(fp).map_err(io_err)?;
        }
        writeln!(fp, "{line}").map_err(io_err)?;
        debug!(habit, %date, "Recorded completion");
        Ok(true)
    }

    /// All dates on which `habit` was completed, oldest first and without
    /// duplicates.  A habit that was never marked has no dates.
    pub(crate) fn marked_dates(&self, habit: &str) -> Result<Vec<Date>, StoreError> {
        let path = self.habit_path(habit)?;
        Ok(read_dates(&path)?.into_iter().collect())
    }

    /// The 1-based days of `year` on which `habit` was completed
    pub(crate) fn marked_days(&self, habit: &str, year: i32) -> Result<BTreeSet<u16>, StoreError> {
        let path = self.habit_path(habit)?;
        Ok(read_dates(&path)?
            .into_iter()
            .filter(|d| d.year() == year)
            .map(Date::ordinal)
            .collect())
    }

    fn habit_path(&self, habit: &str) -> Result<PathBuf, StoreError> {
        let name = normalize_name(habit)?;
        Ok(self.dir.join(format!("{name}.{HABIT_EXT}")))
    }
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("invalid habit name {0:?}: names must be 1 to 64 characters long, must not start with a period, and must not contain slashes or control characters")]
    InvalidName(String),
    #[error("failed to access {}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to format date")]
    Format(#[from] time::error::Format),
}

// Habit names are case-insensitive and stored in lowercase.
fn normalize_name(habit: &str) -> Result<String, StoreError> {
    let name = habit.trim().to_lowercase();
    validate_name(&name)?;
    Ok(name)
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let len = name.chars().count();
    if len == 0
        || len > MAX_NAME_LEN
        || name.starts_with('.')
        || name.chars().any(|c| c == '/' || c == '\\' || c.is_control())
    {
        Err(StoreError::InvalidName(name.to_owned()))
    } else {
        Ok(())
    }
}

fn read_dates(path: &Path) -> Result<BTreeSet<Date>, StoreError> {
    Ok(parse_dates(path, &read_bytes(path)?))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, StoreError> {
    match fs::read(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(StoreError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}

// Lines that are not valid UTF-8 or not a date are skipped rather than
// failing the whole habit.
fn parse_dates(path: &Path, content: &[u8]) -> BTreeSet<Date> {
    let mut dates = BTreeSet::new();
    for (lineno, line) in std::iter::zip(1usize.., content.split(|&b| b == b'\n')) {
        let line = match std::str::from_utf8(line) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(path = %path.display(), lineno, "Ignoring non-UTF-8 line: {e}");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        match Date::parse(line, &YMD_FMT) {
            Ok(d) => {
                dates.insert(d);
            }
            Err(e) => warn!(
                path = %path.display(),
                lineno,
                "Ignoring malformed date {line:?}: {e}"
            ),
        }
    }
    dates
}
