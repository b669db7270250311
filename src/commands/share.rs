use std::path::PathBuf;

use anyhow::Context;
use tokio::io::AsyncReadExt;
use tracing::warn;

use crate::config::Config;
use crate::controllers::snippet::{self, NewSnippet};
use crate::history::{History, HistoryEntry};
use crate::models::{ExpiryOption, Snippet, Syntax};
use crate::App;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// File to share, stdin when omitted.
    file: Option<PathBuf>,
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long, value_enum, default_value_t = Syntax::Text)]
    syntax: Syntax,
    #[arg(short, long, value_enum, default_value_t = ExpiryOption::OneDay)]
    expiry: ExpiryOption,
    #[arg(long)]
    private: bool,
    /// Encrypt the content with this password.
    #[arg(short, long)]
    password: Option<String>,
}

pub async fn run(mut app: App, args: Args) -> anyhow::Result<()> {
    let content = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };

    let title = args.title.or_else(|| {
        args.file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    });

    let new = NewSnippet {
        title,
        content,
        syntax: args.syntax,
        expiry: args.expiry,
        is_private: args.private,
        password: args.password,
    };
    let snippet = snippet::create(&mut app.store, &app.config.limits, new).await?;

    println!("{}", snippet.code);
    println!("{}", app.config.share_url(&snippet.code));

    if let Err(e) = record(&app.config, &snippet).await {
        warn!("not updating history: {e:#}");
    }
    Ok(())
}

async fn record(config: &Config, snippet: &Snippet) -> anyhow::Result<()> {
    let mut history = History::load(config.history.path()?).await?;
    history.record(HistoryEntry {
        code: snippet.code.clone(),
        title: snippet.title.clone(),
        created_at: snippet.created_at,
        expiry: snippet.expiry,
    });
    history.save().await
}

#[cfg(test)]
mod tests {
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};

    use super::*;
    use crate::config::{Limits, Store, StoreKind};
    use crate::store::memory::MemoryStore;
    use crate::store::SnippetStore;

    fn scratch_dir() -> PathBuf {
        let suffix: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        std::env::temp_dir().join(format!("snipbin-share-{suffix}"))
    }

    fn app(store: MemoryStore, history_file: PathBuf) -> App {
        App {
            config: Config {
                base_url: "http://snip.test".into(),
                port: 0,
                store: Store {
                    kind: StoreKind::Memory,
                    url: None,
                },
                limits: Limits::default(),
                history: crate::config::History {
                    file: Some(history_file),
                },
            },
            store: store.into(),
        }
    }

    fn args(file: PathBuf) -> Args {
        Args {
            file: Some(file),
            title: None,
            syntax: Syntax::Text,
            expiry: ExpiryOption::Never,
            private: false,
            password: None,
        }
    }

    #[tokio::test]
    async fn records_shared_code_in_history() {
        let dir = scratch_dir();
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let input = dir.join("notes.txt");
        tokio::fs::write(&input, "hello").await.unwrap();
        let history_file = dir.join("history.json");

        let mut store = MemoryStore::new();
        run(app(store.clone(), history_file.clone()), args(input))
            .await
            .unwrap();

        let history = History::load(&history_file).await.unwrap();
        assert_eq!(history.entries().len(), 1);
        let entry = &history.entries()[0];
        assert_eq!(entry.title, "notes.txt");
        assert!(store.find_one(&entry.code).await.unwrap().is_some());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn corrupt_history_does_not_fail_the_share() {
        let dir = scratch_dir();
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let input = dir.join("notes.txt");
        tokio::fs::write(&input, "hello").await.unwrap();
        let history_file = dir.join("history.json");
        tokio::fs::write(&history_file, "not json").await.unwrap();

        let store = MemoryStore::new();
        run(app(store.clone(), history_file.clone()), args(input))
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        // the broken file is left for the user to inspect
        assert_eq!(
            tokio::fs::read_to_string(&history_file).await.unwrap(),
            "not json"
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
