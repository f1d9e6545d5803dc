//! Load configuration from XDG `config.toml` and project `.env`, apply it to the process
//! environment with priority **existing env > .env > XDG**, then read typed [`MazeSettings`].
//!
//! `$XDG_CONFIG_HOME/labyrinth/config.toml`:
//!
//! ```toml
//! [env]
//! LABYRINTH_URL = "ws://maze.example.org:8080"
//! LABYRINTH_MOVE_TIMEOUT_SECS = "30"
//! ```

mod settings;
mod sources;

pub use settings::MazeSettings;

use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(#[from] dotenv::Error),
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Loads `.env` (from `override_dir` or the current directory) and the XDG `[env]` table, and
/// sets every key that is **not** already present in the process environment.
///
/// * `app_name`: e.g. `"labyrinth"`; XDG path is `~/.config/<app_name>/config.toml`.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg = sources::xdg_env_map(app_name)?;
    let dotenv = sources::dotenv_map(override_dir)?;
    for (key, value) in merge(dotenv, xdg, |k| std::env::var_os(k).is_some()) {
        std::env::set_var(key, value);
    }
    Ok(())
}

/// Values to set: `.env` beats XDG; keys for which `is_set` holds are skipped.
fn merge(
    dotenv: HashMap<String, String>,
    mut xdg: HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let keys: HashSet<String> = dotenv.keys().chain(xdg.keys()).cloned().collect();
    let mut out: Vec<(String, String)> = keys
        .into_iter()
        .filter(|k| !is_set(k))
        .filter_map(|k| {
            let value = dotenv.get(&k).cloned().or_else(|| xdg.remove(&k))?;
            Some((k, value))
        })
        .collect();
    out.sort();
    out
}
