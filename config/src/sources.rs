//! Raw key/value sources: project `.env` and the `[env]` table of the XDG `config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Pairs from `<dir>/.env`, `dir` defaulting to the current directory. Missing file is empty.
pub(crate) fn dotenv_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => match std::env::current_dir() {
            Ok(d) => d,
            Err(_) => return Ok(HashMap::new()),
        },
    };
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let mut out = HashMap::new();
    for item in dotenv::from_path_iter(&path)? {
        let (key, value) = item?;
        out.insert(key, value);
    }
    Ok(out)
}

/// `[env]` table of `$XDG_CONFIG_HOME/<app_name>/config.toml`. Missing file is empty.
pub(crate) fn xdg_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    match dirs::config_dir() {
        Some(base) => env_map_in(&base, app_name),
        None => Ok(HashMap::new()),
    }
}

fn config_path(base: &Path, app_name: &str) -> PathBuf {
    base.join(app_name).join("config.toml")
}

fn env_map_in(base: &Path, app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_path(base, app_name);
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}
