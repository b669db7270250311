//! Local record of the codes this user has shared.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub code: String,
    pub title: String,
    pub created_at: i64,
    pub expiry: i64,
}

#[derive(Debug)]
pub struct History {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Load the history file, starting empty if it does not exist yet.
    pub async fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("corrupt history file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read history file {}", path.display()))
            }
        };
        Ok(History { path, entries })
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .context("failed to create history directory")?;
        }
        let bytes = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("failed to write history file {}", self.path.display()))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Newest entries go first; re-recording a code replaces the old entry.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.forget(&entry.code);
        self.entries.insert(0, entry);
    }

    pub fn forget(&mut self, code: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.code != code);
        self.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};

    use super::*;

    fn scratch_path() -> PathBuf {
        let suffix: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        std::env::temp_dir()
            .join(format!("snipbin-test-{suffix}"))
            .join("history.json")
    }

    fn entry(code: &str) -> HistoryEntry {
        HistoryEntry {
            code: code.into(),
            title: "Untitled".into(),
            created_at: 1,
            expiry: 0,
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let history = History::load(scratch_path()).await.unwrap();
        assert!(history.entries().is_empty());
    }

    #[tokio::test]
    async fn saves_and_reloads() {
        let path = scratch_path();
        let mut history = History::load(&path).await.unwrap();
        history.record(entry("ab12"));
        history.record(entry("cd34"));
        history.save().await.unwrap();

        let reloaded = History::load(&path).await.unwrap();
        let codes: Vec<_> = reloaded.entries().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["cd34", "ab12"]);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir).await;
        }
    }

    #[test]
    fn record_replaces_and_forget_removes() {
        let mut history = History {
            path: PathBuf::from("unused"),
            entries: Vec::new(),
        };
        history.record(entry("ab12"));
        history.record(entry("cd34"));
        history.record(entry("ab12"));

        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.entries()[0].code, "ab12");
        assert!(history.forget("cd34"));
        assert!(!history.forget("cd34"));
    }
}
