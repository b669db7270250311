use sqlx::AnyPool;

use super::SnippetStore;
use crate::models::{Snippet, SnippetRow};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS snippet (
    code TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    syntax TEXT NOT NULL,
    expiry BIGINT NOT NULL DEFAULT 0,
    is_private BOOLEAN NOT NULL DEFAULT FALSE,
    password_tag TEXT,
    created_at BIGINT NOT NULL,
    views BIGINT NOT NULL DEFAULT 0
)";

#[derive(Clone)]
pub struct SqlStore {
    pool: AnyPool,
}

impl SqlStore {
    /// Connect to a database by URL and make sure the schema exists.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        Self::from_pool(AnyPool::connect(url).await?).await
    }

    pub async fn from_pool(pool: AnyPool) -> anyhow::Result<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

impl SnippetStore for SqlStore {
    async fn insert(&mut self, snippet: &Snippet) -> crate::AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(
            "INSERT INTO snippet (code, title, content, syntax, expiry, is_private, \
             password_tag, created_at, views) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&snippet.code)
        .bind(&snippet.title)
        .bind(&snippet.content)
        .bind(snippet.syntax.as_str())
        .bind(snippet.expiry)
        .bind(snippet.is_private)
        .bind(snippet.password_tag.as_deref())
        .bind(snippet.created_at)
        .bind(snippet.views as i64)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    async fn find_one(&mut self, code: &str) -> crate::AppResult<Option<Snippet>> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, SnippetRow>(
            "SELECT code, title, content, syntax, expiry, is_private, password_tag, \
             created_at, views FROM snippet WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&mut conn)
        .await?;
        Ok(row.map(Snippet::from))
    }

    async fn increment_views(&mut self, code: &str) -> crate::AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("UPDATE snippet SET views = views + 1 WHERE code = ?")
            .bind(code)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, code: &str) -> crate::AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM snippet WHERE code = ?")
            .bind(code)
            .execute(&mut conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&mut self, now: i64) -> crate::AppResult<u64> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM snippet WHERE expiry != 0 AND expiry < ?")
            .bind(now)
            .execute(&mut conn)
            .await?;
        Ok(result.rows_affected())
    }
}
