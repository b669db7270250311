use crate::models::Snippet;

pub mod memory;
pub mod sql;

/// Document-collection façade holding snippets.
///
/// Implementations pass calls straight through; callers validate.
pub trait SnippetStore {
    /// Insert a snippet.
    async fn insert(&mut self, snippet: &Snippet) -> crate::AppResult<()>;

    /// Find the snippet stored under a code.
    async fn find_one(&mut self, code: &str) -> crate::AppResult<Option<Snippet>>;

    /// Add one to a snippet's view count.
    async fn increment_views(&mut self, code: &str) -> crate::AppResult<()>;

    /// Delete a snippet by code, returning whether anything was removed.
    async fn delete(&mut self, code: &str) -> crate::AppResult<bool>;

    /// Delete every snippet whose expiry has passed at `now`.
    async fn purge_expired(&mut self, now: i64) -> crate::AppResult<u64>;
}

#[derive(Clone)]
pub enum AnyStore {
    Sql(sql::SqlStore),
    Memory(memory::MemoryStore),
}

impl SnippetStore for AnyStore {
    async fn insert(&mut self, snippet: &Snippet) -> crate::AppResult<()> {
        match self {
            AnyStore::Sql(sql) => sql.insert(snippet).await,
            AnyStore::Memory(memory) => memory.insert(snippet).await,
        }
    }

    async fn find_one(&mut self, code: &str) -> crate::AppResult<Option<Snippet>> {
        match self {
            AnyStore::Sql(sql) => sql.find_one(code).await,
            AnyStore::Memory(memory) => memory.find_one(code).await,
        }
    }

    async fn increment_views(&mut self, code: &str) -> crate::AppResult<()> {
        match self {
            AnyStore::Sql(sql) => sql.increment_views(code).await,
            AnyStore::Memory(memory) => memory.increment_views(code).await,
        }
    }

    async fn delete(&mut self, code: &str) -> crate::AppResult<bool> {
        match self {
            AnyStore::Sql(sql) => sql.delete(code).await,
            AnyStore::Memory(memory) => memory.delete(code).await,
        }
    }

    async fn purge_expired(&mut self, now: i64) -> crate::AppResult<u64> {
        match self {
            AnyStore::Sql(sql) => sql.purge_expired(now).await,
            AnyStore::Memory(memory) => memory.purge_expired(now).await,
        }
    }
}

impl From<sql::SqlStore> for AnyStore {
    fn from(value: sql::SqlStore) -> Self {
        AnyStore::Sql(value)
    }
}

impl From<memory::MemoryStore> for AnyStore {
    fn from(value: memory::MemoryStore) -> Self {
        AnyStore::Memory(value)
    }
}
