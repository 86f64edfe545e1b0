use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the directory in which habits are stored
pub(crate) const DATA_DIR_VAR: &str = "TARRIER_DATA_DIR";

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Determine the directory in which habits are stored.  In order of
/// preference, this is:
///
/// - `explicit`, the directory given on the command line
/// - `$TARRIER_DATA_DIR`
/// - `$XDG_DATA_HOME/tarrier`
/// - `$HOME/.local/share/tarrier`
/// - `%APPDATA%\tarrier`
pub(crate) fn data_dir(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    resolve_data_dir(explicit, |name| env::var_os(name))
}

fn resolve_data_dir<F>(explicit: Option<PathBuf>, getenv: F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let var = |name: &str| getenv(name).filter(|v| !v.is_empty()).map(PathBuf::from);
    if let Some(dir) = explicit {
        Ok(dir)
    } else if let Some(dir) = var(DATA_DIR_VAR) {
        Ok(dir)
    } else if let Some(dir) = var("XDG_DATA_HOME") {
        Ok(dir.join(APP_NAME))
    } else if let Some(home) = var("HOME") {
        Ok(home.join(".local").join("share").join(APP_NAME))
    } else if let Some(appdata) = var("APPDATA") {
        Ok(appdata.join(APP_NAME))
    } else {
        Err(ConfigError::NoDataDir)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("could not determine data directory; set TARRIER_DATA_DIR or HOME, or pass --data-dir")]
    NoDataDir,
}
