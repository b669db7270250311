use chrono::Utc;
use tracing::info;

use crate::code::{allocate, is_valid_code};
use crate::config::Limits;
use crate::error::AppError;
use crate::models::{ExpiryOption, Snippet, Syntax, DEFAULT_TITLE};
use crate::protect;
use crate::store::SnippetStore;

/// What a caller asks to share.
#[derive(Debug, Clone, Default)]
pub struct NewSnippet {
    pub title: Option<String>,
    pub content: String,
    pub syntax: Syntax,
    pub expiry: ExpiryOption,
    pub is_private: bool,
    pub password: Option<String>,
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub async fn create<S: SnippetStore>(
    store: &mut S,
    limits: &Limits,
    new: NewSnippet,
) -> crate::AppResult<Snippet> {
    create_at(store, limits, new, now_millis()).await
}

pub async fn create_at<S: SnippetStore>(
    store: &mut S,
    limits: &Limits,
    new: NewSnippet,
    now: i64,
) -> crate::AppResult<Snippet> {
    if new.content.is_empty() {
        return Err(AppError::EmptyContent);
    }
    if new.content.len() > limits.max_content_size {
        return Err(AppError::ContentTooLarge {
            max: limits.max_content_size,
        });
    }

    let code = allocate(store, limits.allocation_attempts).await?;

    let title = new
        .title
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

    let (content, password_tag) = match new.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => (
            protect::encrypt(&new.content, password),
            Some(protect::tag(password, &code)),
        ),
        None => (new.content, None),
    };

    let snippet = Snippet {
        code,
        title,
        content,
        syntax: new.syntax,
        expiry: new.expiry.deadline(now),
        is_private: new.is_private,
        password_tag,
        created_at: now,
        views: 0,
    };

    info!(
        "new snippet: code='{code}', syntax={syntax}, expiry={expiry}, protected={protected}, \
         size={size}",
        code = snippet.code,
        syntax = snippet.syntax,
        expiry = snippet.expiry,
        protected = snippet.is_protected(),
        size = snippet.content.len()
    );

    store.insert(&snippet).await?;
    Ok(snippet)
}

/// Look up a snippet and return it with plaintext content, counting the view.
pub async fn retrieve<S: SnippetStore>(
    store: &mut S,
    code: &str,
    password: Option<&str>,
) -> crate::AppResult<Snippet> {
    retrieve_at(store, code, password, now_millis()).await
}

pub async fn retrieve_at<S: SnippetStore>(
    store: &mut S,
    code: &str,
    password: Option<&str>,
    now: i64,
) -> crate::AppResult<Snippet> {
    if !is_valid_code(code) {
        return Err(AppError::InvalidCode);
    }

    // missing and hidden snippets look the same from here
    let mut snippet = store
        .find_one(code)
        .await?
        .ok_or(AppError::NotFoundOrUnauthorized)?;

    if snippet.is_expired_at(now) {
        return Err(AppError::Expired);
    }

    if let Some(stored_tag) = &snippet.password_tag {
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(AppError::PasswordRequired)?;
        if protect::tag(password, code) != *stored_tag {
            return Err(AppError::InvalidPassword);
        }
        let plaintext =
            protect::decrypt(&snippet.content, password).map_err(|_| AppError::InvalidPassword)?;
        if plaintext.is_empty() {
            return Err(AppError::InvalidPassword);
        }
        snippet.content = plaintext;
    }

    store.increment_views(code).await?;
    snippet.views += 1;

    info!("viewed snippet: code='{code}', views={}", snippet.views);

    Ok(snippet)
}

pub async fn delete<S: SnippetStore>(store: &mut S, code: &str) -> crate::AppResult<()> {
    if !is_valid_code(code) {
        return Err(AppError::InvalidCode);
    }
    if !store.delete(code).await? {
        return Err(AppError::NotFoundOrUnauthorized);
    }
    info!("deleted snippet: code='{code}'");
    Ok(())
}

pub async fn purge_expired<S: SnippetStore>(store: &mut S) -> crate::AppResult<u64> {
    let count = store.purge_expired(now_millis()).await?;
    if count > 0 {
        info!("deleted {count} expired snippets");
    }
    Ok(count)
}
