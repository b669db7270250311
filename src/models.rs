use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Title given to snippets shared without one.
pub const DEFAULT_TITLE: &str = "Untitled";

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// A shared snippet as it is persisted.
///
/// `content` holds ciphertext exactly when `password_tag` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub code: String,
    pub title: String,
    pub content: String,
    pub syntax: Syntax,
    /// Epoch milliseconds, `0` for never.
    pub expiry: i64,
    pub is_private: bool,
    pub password_tag: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub views: u64,
}

impl Snippet {
    pub fn is_protected(&self) -> bool {
        self.password_tag.is_some()
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expiry != 0 && self.expiry < now
    }
}

/// Row shape of the `snippet` table.
#[derive(FromRow)]
pub struct SnippetRow {
    pub code: String,
    pub title: String,
    pub content: String,
    pub syntax: String,
    pub expiry: i64,
    pub is_private: bool,
    pub password_tag: Option<String>,
    pub created_at: i64,
    pub views: i64,
}

impl From<SnippetRow> for Snippet {
    fn from(row: SnippetRow) -> Self {
        Snippet {
            code: row.code,
            title: row.title,
            content: row.content,
            // syntax is a display hint, an unknown value just renders as text
            syntax: row.syntax.parse().unwrap_or_default(),
            expiry: row.expiry,
            is_private: row.is_private,
            password_tag: row.password_tag,
            created_at: row.created_at,
            views: row.views.try_into().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    #[default]
    Text,
    Javascript,
    Python,
    Html,
    Css,
    Json,
    Markdown,
}

impl Syntax {
    pub fn as_str(self) -> &'static str {
        match self {
            Syntax::Text => "text",
            Syntax::Javascript => "javascript",
            Syntax::Python => "python",
            Syntax::Html => "html",
            Syntax::Css => "css",
            Syntax::Json => "json",
            Syntax::Markdown => "markdown",
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown syntax '{0}'")]
pub struct UnknownSyntax(String);

impl FromStr for Syntax {
    type Err = UnknownSyntax;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Syntax::Text),
            "javascript" => Ok(Syntax::Javascript),
            "python" => Ok(Syntax::Python),
            "html" => Ok(Syntax::Html),
            "css" => Ok(Syntax::Css),
            "json" => Ok(Syntax::Json),
            "markdown" => Ok(Syntax::Markdown),
            other => Err(UnknownSyntax(other.to_owned())),
        }
    }
}

/// Lifetimes offered when sharing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ExpiryOption {
    #[serde(rename = "1h")]
    #[value(name = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "24h")]
    #[value(name = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    #[value(name = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    #[value(name = "30d")]
    ThirtyDays,
    #[serde(rename = "never")]
    #[value(name = "never")]
    Never,
}

impl ExpiryOption {
    pub fn hours(self) -> Option<i64> {
        match self {
            ExpiryOption::OneHour => Some(1),
            ExpiryOption::OneDay => Some(24),
            ExpiryOption::SevenDays => Some(7 * 24),
            ExpiryOption::ThirtyDays => Some(30 * 24),
            ExpiryOption::Never => None,
        }
    }

    /// Absolute expiry timestamp for a snippet created at `now`.
    pub fn deadline(self, now: i64) -> i64 {
        match self.hours() {
            Some(hours) => now + hours * MILLIS_PER_HOUR,
            None => 0,
        }
    }
}
