use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::Calculation;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Backing table for calculation history.
///
/// Implementations return rows newest first and never more than `limit`.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn recent(&self, limit: i64) -> Result<Vec<Calculation>, StoreError>;

    /// Inserts a row and returns the id the store generated for it.
    async fn insert(&self, expression: &str, result: &str) -> Result<i32, StoreError>;
}
