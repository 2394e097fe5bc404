use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::history::DEFAULT_UNDO_LIMIT;

pub const CONFIG_ENV: &str = "JAVITOR_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tab_width: usize,
    pub show_line_numbers: bool,
    pub show_toolbar: bool,
    pub undo_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            show_line_numbers: true,
            show_toolbar: true,
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

impl Config {
    /// `$JAVITOR_CONFIG`, then `$XDG_CONFIG_HOME/javitor/config.json`, then
    /// `$HOME/.config/javitor/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

        Some(base.join("javitor").join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// A missing file means defaults; an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };

        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.tab_width = self.tab_width.clamp(1, 16);
        self.undo_limit = self.undo_limit.max(1);
        self
    }
}
