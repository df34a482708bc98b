pub mod file;

use futures::future::BoxFuture;

use crate::dao::models::{GameMode, ScoreRecord};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for best-score records.
pub trait ScoreStore: Send + Sync {
    /// Upsert-if-better by identity key; returns whether the store changed.
    fn submit(&self, record: ScoreRecord) -> BoxFuture<'static, StorageResult<bool>>;
    /// Top records for a mode (and exact date for daily), best first.
    fn top_n(
        &self,
        mode: GameMode,
        date: Option<String>,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<ScoreRecord>>>;
    /// Probe the backing medium (used by the health route).
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
