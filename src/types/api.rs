use serde::{Deserialize, Serialize};

use crate::controllers::snippet::NewSnippet;
use crate::models::{ExpiryOption, Snippet, Syntax};

/// Header carrying the password for protected snippets.
pub const PASSWORD_HEADER: &str = "x-snippet-password";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnippet {
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub syntax: Syntax,
    #[serde(default)]
    pub expiry: ExpiryOption,
    #[serde(default)]
    pub is_private: bool,
    pub password: Option<String>,
}

impl From<CreateSnippet> for NewSnippet {
    fn from(value: CreateSnippet) -> Self {
        NewSnippet {
            title: value.title,
            content: value.content,
            syntax: value.syntax,
            expiry: value.expiry,
            is_private: value.is_private,
            password: value.password,
        }
    }
}

#[derive(Serialize)]
pub struct SnippetCreated {
    pub code: String,
    pub url: String,
    pub expiry: i64,
}

/// A retrieved snippet with plaintext content.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetView {
    pub code: String,
    pub title: String,
    pub content: String,
    pub syntax: Syntax,
    pub expiry: i64,
    pub is_private: bool,
    pub protected: bool,
    pub created_at: i64,
    pub views: u64,
}

impl From<Snippet> for SnippetView {
    fn from(snippet: Snippet) -> Self {
        SnippetView {
            protected: snippet.is_protected(),
            code: snippet.code,
            title: snippet.title,
            content: snippet.content,
            syntax: snippet.syntax,
            expiry: snippet.expiry,
            is_private: snippet.is_private,
            created_at: snippet.created_at,
            views: snippet.views,
        }
    }
}
