use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// User configuration: fallback documentation sources for libraries the
/// built-in page tables don't know.
///
/// Templates may use `{symbol_name}` and `{module_name}` placeholders, e.g.
/// `"numpy": "https://numpy.org/doc/stable/search.html?q={symbol_name}"`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UserConfig {
    /// Library root module -> URL template.
    pub libraries: HashMap<String, String>,
}

impl UserConfig {
    /// Load from a JSON file. A missing file is an empty config.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Returns the path to the data directory for pyhelp.
/// Uses $XDG_DATA_HOME/pyhelp if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/pyhelp,
/// or ./pyhelp if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("pyhelp.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("pyhelp")
}
