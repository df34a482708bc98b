//! File-backed score store: one JSON document, rewritten whole on every update.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::warn;

use crate::dao::{
    models::{GameMode, ScoreBook, ScoreRecord},
    score_store::ScoreStore,
    storage::{StorageError, StorageResult},
};

/// Score store persisting the whole [`ScoreBook`] as a JSON file.
///
/// Every submit is a read-modify-write over the full document, serialized by a
/// mutex so concurrent requests cannot lose updates. A missing or corrupt file
/// degrades to an empty book.
#[derive(Clone)]
pub struct FileScoreStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    write_gate: Mutex<()>,
}

impl FileScoreStore {
    /// Create a store backed by the document at `path`. The file is created
    /// lazily on the first successful submit.
    pub fn new(path: PathBuf) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                write_gate: Mutex::new(()),
            }),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn submit(&self, record: ScoreRecord) -> BoxFuture<'static, StorageResult<bool>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let _gate = inner.write_gate.lock().await;
            let mut book = read_book(&inner.path).await;
            let updated = book.apply(record);
            if updated {
                write_book(&inner.path, &book).await?;
            }
            Ok(updated)
        })
    }

    fn top_n(
        &self,
        mode: GameMode,
        date: Option<String>,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<ScoreRecord>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let book = read_book(&inner.path).await;
            Ok(book.top_n(mode, date.as_deref(), limit))
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            // Reads always succeed (they degrade to empty); the useful probe is
            // whether the parent directory can be created for future writes.
            if let Some(parent) = inner.path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|source| StorageError::write(&inner.path, source))?;
                }
            }
            Ok(())
        })
    }
}

/// Load the score book, treating any read or parse failure as an empty book.
async fn read_book(path: &Path) -> ScoreBook {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return ScoreBook::default(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read score store; starting empty");
            return ScoreBook::default();
        }
    };

    match serde_json::from_slice::<ScoreBook>(&bytes) {
        Ok(book) => book,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "corrupt score store; starting empty");
            ScoreBook::default()
        }
    }
}

/// Persist the score book, creating the parent directory on first write.
async fn write_book(path: &Path, book: &ScoreBook) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::write(path, source))?;
        }
    }

    let bytes = serde_json::to_vec_pretty(book)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| StorageError::write(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::GameMode;

    fn temp_store() -> (FileScoreStore, PathBuf) {
        let path = std::env::temp_dir().join(format!("flagzim-store-{}.json", uuid::Uuid::new_v4()));
        (FileScoreStore::new(path.clone()), path)
    }

    fn record(name: &str, score: u32, time: f64) -> ScoreRecord {
        ScoreRecord::new(name.to_string(), score, time, GameMode::Classic, None)
    }

    #[tokio::test]
    async fn submit_then_top_n_includes_the_record() {
        let (store, path) = temp_store();

        assert!(store.submit(record("Ana", 5, 12.3)).await.unwrap());
        let top = store.top_n(GameMode::Classic, None, 10).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Ana");

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn records_survive_a_store_reopen() {
        let (store, path) = temp_store();
        store.submit(record("Ana", 5, 12.3)).await.unwrap();
        drop(store);

        let reopened = FileScoreStore::new(path.clone());
        let top = reopened.top_n(GameMode::Classic, None, 10).await.unwrap();
        assert_eq!(top.len(), 1);

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn worse_submission_leaves_the_file_unchanged() {
        let (store, path) = temp_store();
        store.submit(record("Ana", 5, 9.0)).await.unwrap();

        assert!(!store.submit(record("Ana", 3, 5.0)).await.unwrap());
        let top = store.top_n(GameMode::Classic, None, 10).await.unwrap();
        assert_eq!(top[0].score, 5);
        assert_eq!(top[0].time, 9.0);

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let (store, path) = temp_store();
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let top = store.top_n(GameMode::Classic, None, 10).await.unwrap();
        assert!(top.is_empty());

        // Submitting afterwards rebuilds a valid document.
        assert!(store.submit(record("Ana", 1, 2.0)).await.unwrap());
        let top = store.top_n(GameMode::Classic, None, 10).await.unwrap();
        assert_eq!(top.len(), 1);

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let (store, _path) = temp_store();
        let top = store.top_n(GameMode::Classic, None, 10).await.unwrap();
        assert!(top.is_empty());
    }
}
