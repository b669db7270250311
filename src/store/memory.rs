use std::sync::Arc;

use tokio::sync::Mutex;

use super::SnippetStore;
use crate::models::Snippet;

/// Process-local snippet collection.
///
/// Like a remote document store it has no uniqueness constraint on `code`:
/// inserting a taken code keeps both documents and lookups see the oldest.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<Vec<Snippet>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }
}

impl SnippetStore for MemoryStore {
    async fn insert(&mut self, snippet: &Snippet) -> crate::AppResult<()> {
        self.documents.lock().await.push(snippet.clone());
        Ok(())
    }

    async fn find_one(&mut self, code: &str) -> crate::AppResult<Option<Snippet>> {
        let documents = self.documents.lock().await;
        Ok(documents.iter().find(|s| s.code == code).cloned())
    }

    async fn increment_views(&mut self, code: &str) -> crate::AppResult<()> {
        let mut documents = self.documents.lock().await;
        if let Some(snippet) = documents.iter_mut().find(|s| s.code == code) {
            snippet.views += 1;
        }
        Ok(())
    }

    async fn delete(&mut self, code: &str) -> crate::AppResult<bool> {
        let mut documents = self.documents.lock().await;
        match documents.iter().position(|s| s.code == code) {
            Some(index) => {
                documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn purge_expired(&mut self, now: i64) -> crate::AppResult<u64> {
        let mut documents = self.documents.lock().await;
        let before = documents.len();
        documents.retain(|s| !s.is_expired_at(now));
        Ok((before - documents.len()) as u64)
    }
}
