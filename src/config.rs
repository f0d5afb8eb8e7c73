//! Settings resolution for the `wip` binary.
//!
//! Each setting is resolved through a chain, first match wins:
//!
//! 1. the command-line flag (`--file`, `--timing`)
//! 2. the environment (`WIP_FILENAME`, `WIP_TIMING=true`)
//! 3. `<config dir>/wip/config.toml` (`file = "..."`, `timing = true`)
//! 4. the default: `$HOME/.wip`, timing off
//!
//! The config file is optional; a missing one is the same as an empty one.

use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

/// Error message shown when no log file location can be resolved.
pub const FILE_REQUIRED: &str = "could not determine log file: pass --file, \
    set WIP_FILENAME, or set HOME";

/// The contents of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Log file location.
    pub file: Option<PathBuf>,

    /// Print how long the invocation took.
    pub timing: Option<bool>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file: PathBuf,
    pub timing: bool,
}

impl ConfigFile {
    /// Reads `<config dir>/wip/config.toml`, if it exists.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `<config dir>/wip/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wip").join("config.toml"))
    }
}

/// Resolves settings from flags, the process environment, and the config file.
pub fn resolve(file_flag: Option<PathBuf>, timing_flag: bool) -> Result<Settings, String> {
    let config = ConfigFile::load()?;
    resolve_with(
        file_flag,
        timing_flag,
        |key| env::var(key).ok(),
        config,
        dirs::home_dir(),
    )
}

fn resolve_with(
    file_flag: Option<PathBuf>,
    timing_flag: bool,
    var: impl Fn(&str) -> Option<String>,
    config: ConfigFile,
    home: Option<PathBuf>,
) -> Result<Settings, String> {
    let file = file_flag
        .or_else(|| {
            var("WIP_FILENAME")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        })
        .or(config.file)
        .or_else(|| home.map(|h| h.join(".wip")))
        .ok_or(FILE_REQUIRED)?;

    let timing = timing_flag
        || match var("WIP_TIMING") {
            Some(value) => value == "true",
            None => config.timing.unwrap_or(false),
        };

    Ok(Settings { file, timing })
}
