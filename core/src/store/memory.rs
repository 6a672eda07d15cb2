use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::HistoryStore;
use crate::error::StoreError;
use crate::model::Calculation;

/// In-process history, lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<Calculation>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn recent(&self, limit: i64) -> Result<Vec<Calculation>, StoreError> {
        let mut list = self.rows.lock().await.clone();
        list.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        list.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(list)
    }

    async fn insert(&self, expression: &str, result: &str) -> Result<i32, StoreError> {
        let mut list = self.rows.lock().await;
        let id = list.last().map_or(1, |c| c.id + 1);
        list.push(Calculation {
            id,
            expression: expression.to_string(),
            result: result.to_string(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recent_is_newest_first_and_capped() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.insert(&format!("{i}+{i}"), &(i * 2).to_string()).await.unwrap();
        }

        let list = store.recent(3).await.unwrap();
        let ids: Vec<i32> = list.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert_eq!(store.recent(100).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = MemoryStore::new();
        let a = store.insert("1+1", "2").await.unwrap();
        let b = store.insert("1+1", "2").await.unwrap();
        assert_ne!(a, b);
    }
}
