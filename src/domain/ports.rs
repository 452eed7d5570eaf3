use crate::domain::model::Table;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Answers whether a live (not soft-deleted) row exists, the way the
/// request handlers check foreign keys before writing.
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    async fn exists(&self, table: Table, id: i64) -> Result<bool>;
}
