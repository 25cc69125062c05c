use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::model::world::World;

pub const APP_DIR_NAME: &str = "text_rpg";

/// `<config_dir>/text_rpg`, falling back to the working directory.
pub fn app_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR_NAME);
    path
}

fn default_storage_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR_NAME);
    path.push("storage");
    path
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where save slots live. Defaults to the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Fixed seed for reproducible dice.
    pub rng_seed: Option<u64>,
    /// JSON world to play instead of the built-in one.
    pub world_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            log_filter: default_log_filter(),
            rng_seed: None,
            world_file: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        app_config_dir().join("config.json")
    }

    /// A missing file means defaults; an unreadable one is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(default_storage_dir)
    }

    pub fn load_world(&self) -> anyhow::Result<World> {
        let Some(path) = &self.world_file else {
            return Ok(World::builtin());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading world {}", path.display()))?;
        World::from_json_str(&text).with_context(|| format!("loading world {}", path.display()))
    }
}
