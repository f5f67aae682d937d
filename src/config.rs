use crate::sort::SortMode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: Storage,

    #[serde(default)]
    pub ui: Ui,
}

/// Where installed applications live. Either root may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removable: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ui {
    #[serde(default)]
    pub default_sort: SortMode,

    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            default_sort: SortMode::default(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Storage {
    pub fn is_configured(&self) -> bool {
        self.internal.is_some() || self.removable.is_some()
    }
}

impl Config {
    /// Default config file path: `<config dir>/appsweep/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "appsweep")
            .context("could not determine the user's config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load config from the default location or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from `path`. A missing file gives defaults silently; an
    /// unreadable or invalid one gives defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("failed to parse config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Apply CLI option overrides
    pub fn apply_cli_overrides(
        &mut self,
        internal: Option<PathBuf>,
        removable: Option<PathBuf>,
        sort: Option<SortMode>,
    ) {
        if let Some(path) = internal {
            self.storage.internal = Some(path);
        }
        if let Some(path) = removable {
            self.storage.removable = Some(path);
        }
        if let Some(sort) = sort {
            self.ui.default_sort = sort;
        }
    }
}
