use std::path::PathBuf;

use anyhow::Context;
use axum::extract::FromRef;
use clap::{Parser, Subcommand};
use tracing::warn;

mod code;
mod commands;
mod config;
mod controllers;
mod history;
mod models;
mod protect;
mod store;

mod error;
pub(crate) use error::AppResult;

pub(crate) mod types;

use config::{Config, StoreKind};
use store::memory::MemoryStore;
use store::sql::SqlStore;
use store::AnyStore;

#[derive(Parser)]
#[command(version, about = "Share text snippets under short codes")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Delete snippets whose expiry has passed.
    PurgeExpired,
    /// Share a file or stdin and print its code.
    Share(commands::share::Args),
    /// Print a snippet's content.
    Fetch(commands::fetch::Args),
    /// Delete a snippet.
    Delete { code: String },
    /// List the snippets shared from this machine.
    Mine,
}

#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub store: AnyStore,
}

impl App {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = match config.store.kind {
            StoreKind::Sql => {
                let url = config
                    .store
                    .url
                    .as_deref()
                    .context("store.url is required for the sql store")?;
                SqlStore::connect(url)
                    .await
                    .context("failed to connect to database")?
                    .into()
            }
            StoreKind::Memory => {
                warn!("using the in-memory store, snippets are lost on exit");
                MemoryStore::new().into()
            }
        };
        Ok(App { config, store })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config).await?;

    match cli.command {
        Command::Serve => commands::serve::run(App::new(config).await?).await,
        Command::PurgeExpired => commands::purge_expired::run(App::new(config).await?).await,
        Command::Share(args) => commands::share::run(App::new(config).await?, args).await,
        Command::Fetch(args) => commands::fetch::run(App::new(config).await?, args).await,
        Command::Delete { code } => commands::delete::run(App::new(config).await?, code).await,
        Command::Mine => commands::mine::run(&config).await,
    }
}
