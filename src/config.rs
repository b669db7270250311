use std::path::{Path, PathBuf};

use anyhow::Context;
use directories_next::ProjectDirs;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub port: u16,
    pub store: Store,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub history: History,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text).context("failed to deserialize config")
    }

    /// Public URL a snippet can be viewed at.
    pub fn share_url(&self, code: &str) -> String {
        format!(
            "{base_url}/share/{code}",
            base_url = self.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub kind: StoreKind,
    /// Database URL, required for the `sql` store.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Sql,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_content_size")]
    pub max_content_size: usize,
    #[serde(default = "default_allocation_attempts")]
    pub allocation_attempts: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_content_size: default_max_content_size(),
            allocation_attempts: default_allocation_attempts(),
        }
    }
}

fn default_max_content_size() -> usize {
    512 * 1024
}

fn default_allocation_attempts() -> u32 {
    crate::code::MAX_ALLOCATION_ATTEMPTS
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct History {
    pub file: Option<PathBuf>,
}

impl History {
    /// Configured history file, falling back to the platform data directory.
    pub fn path(&self) -> anyhow::Result<PathBuf> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }
        let dirs = ProjectDirs::from("", "", "snipbin")
            .context("could not determine a data directory for the history file")?;
        Ok(dirs.data_dir().join("history.json"))
    }
}
