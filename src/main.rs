mod calendar;
mod config;
mod logging;
mod store;
mod streak;
use crate::calendar::DayGrid;
use crate::logging::init_logging;
use crate::store::HabitStore;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, Write};
use std::path::PathBuf;
use time::{Date, OffsetDateTime};
use tracing::{debug, warn};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Show {
        habit: String,
        year: Option<i32>,
        mark: bool,
        data_dir: Option<PathBuf>,
    },
    List {
        data_dir: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut habit = None;
        let mut year = None;
        let mut mark = false;
        let mut list = false;
        let mut data_dir = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("mark") => mark = true,
                Arg::Short('l') | Arg::Long("list") => list = true,
                Arg::Short('y') | Arg::Long("year") => year = Some(parser.value()?.parse::<i32>()?),
                Arg::Short('d') | Arg::Long("data-dir") => {
                    data_dir = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if habit.is_none() && !list => habit = Some(value.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        if list {
            if let Some(habit) = habit {
                return Err(lexopt::Error::UnexpectedArgument(habit.into()));
            }
            return Ok(Command::List { data_dir });
        }
        let Some(habit) = habit else {
            return Err(lexopt::Error::Custom("no habit name given".into()));
        };
        Ok(Command::Show {
            habit,
            year,
            mark,
            data_dir,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Show {
                habit,
                year,
                mark,
                data_dir,
            } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let store = open_store(data_dir)?;
                show(&store, &habit, year, mark, today, io::stdout().lock())
            }
            Command::List { data_dir } => {
                let store = open_store(data_dir)?;
                let mut out = io::stdout().lock();
                for name in store.habits().context("failed to list habits")? {
                    writeln!(out, "{name}")?;
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: tarrier [-m] [-y <year>] [-d <dir>] <habit>");
                println!("       tarrier -l [-d <dir>]");
                println!();
                println!("Track daily habits and show a year of progress with streaks");
                println!();
                println!("Options:");
                println!("  -m, --mark             Mark today as completed; ignored when --year");
                println!("                         selects a year other than the current one");
                println!("  -y, --year <year>      Show the progress for the given year");
                println!("  -l, --list             List the known habits and exit");
                println!("  -d, --data-dir <dir>   Store habits in the given directory");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    Command::from_parser(Parser::from_env())?.run()
}

fn open_store(data_dir: Option<PathBuf>) -> anyhow::Result<HabitStore> {
    let dir = config::data_dir(data_dir)?;
    HabitStore::open(dir).context("failed to open habit store")
}

/// Print the calendar for `habit` in `year` (default: the year of `today`)
/// followed by its streaks, first recording a completion for `today` if
/// `mark` is set
fn show<W: Write>(
    store: &HabitStore,
    habit: &str,
    year: Option<i32>,
    mark: bool,
    today: Date,
    mut out: W,
) -> anyhow::Result<()> {
    let current_year = today.year();
    let year = year.unwrap_or(current_year);
    if mark {
        if year == current_year {
            let added = store
                .mark(habit, today)
                .with_context(|| format!("failed to mark {habit:?} as completed"))?;
            debug!(habit, added, "Marked today");
        } else {
            warn!(year, "Not marking today as completed, as a different year was selected");
        }
    }
    let days = store
        .marked_days(habit, year)
        .with_context(|| format!("failed to read completions of {habit:?}"))?;
    let grid = DayGrid::build(year, current_year, today.ordinal(), days)?;
    debug!(year = grid.year(), "Built calendar grid");
    let dates = store
        .marked_dates(habit)
        .with_context(|| format!("failed to read completions of {habit:?}"))?;
    let streaks = streak::compute(&dates, today)
        .with_context(|| format!("failed to compute streaks of {habit:?}"))?;
    grid.write_to(&mut out)?;
    writeln!(out)?;
    writeln!(out, "Current streak: {}", streaks.current)?;
    writeln!(out, "Longest streak: {}", streaks.maximum)?;
    Ok(())
}
