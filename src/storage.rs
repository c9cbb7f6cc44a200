//! Transient storage for rendered notices.
//!
//! PDFs are written to a directory and indexed by a moka cache. Entries
//! expire after a time-to-live or when the capacity is exceeded, and the
//! eviction listener deletes the backing file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ArtifactConfig;

const ARTIFACT_EXTENSION: &str = "pdf";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("artifact storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist a document under a fresh identifier.
    async fn save(&self, data: &[u8]) -> Result<Uuid, StorageError>;

    /// Fetch a document. Unknown or expired identifiers yield `None`.
    async fn load(&self, id: &Uuid) -> Result<Option<Vec<u8>>, StorageError>;
}

pub struct DiskArtifactStore {
    dir: PathBuf,
    index: Cache<Uuid, PathBuf>,
}

impl DiskArtifactStore {
    /// Open the store, creating the directory and removing artifacts left
    /// behind by a previous process.
    pub async fn new(config: &ArtifactConfig) -> Result<Self, StorageError> {
        tokio::fs::create_dir_all(&config.dir).await?;
        let removed = purge_stale_artifacts(&config.dir).await?;
        if removed > 0 {
            log::info!(
                "Removed {} stale artifact(s) from {}",
                removed,
                config.dir.display()
            );
        }

        // LRU so a full store drops its oldest artifact instead of refusing
        // the one just handed out.
        let index = Cache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_count)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(|id: Arc<Uuid>, path: PathBuf, cause: RemovalCause| {
                log::debug!("Evicting artifact {} ({:?})", id, cause);
                // Runs inside run_pending_tasks. Artifacts are a few KiB, so a
                // synchronous unlink on the worker thread is acceptable.
                if let Err(e) = std::fs::remove_file(&path) {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        log::error!("Failed to delete artifact {}: {}", path.display(), e);
                    }
                }
            })
            .build();

        Ok(Self {
            dir: config.dir.clone(),
            index,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{id}.{ARTIFACT_EXTENSION}"))
    }

    /// Apply pending expirations and evictions.
    pub async fn run_pending_tasks(&self) {
        self.index.run_pending_tasks().await;
    }

    pub async fn entry_count(&self) -> u64 {
        self.index.run_pending_tasks().await;
        self.index.entry_count()
    }

    /// Periodically run cache maintenance so expired files are deleted
    /// even when no requests arrive.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            log::info!("Artifact sweeper started ({:?} interval)", every);
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                store.run_pending_tasks().await;
            }
        })
    }
}

#[async_trait]
impl ArtifactStore for DiskArtifactStore {
    async fn save(&self, data: &[u8]) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();
        let path = self.path_for(&id);
        tokio::fs::write(&path, data).await?;
        self.index.insert(id, path).await;
        log::debug!("Stored artifact {} ({} bytes)", id, data.len());
        Ok(id)
    }

    async fn load(&self, id: &Uuid) -> Result<Option<Vec<u8>>, StorageError> {
        let Some(path) = self.index.get(id).await else {
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Artifact {} is indexed but missing on disk", id);
                self.index.invalidate(id).await;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn purge_stale_artifacts(dir: &Path) -> Result<usize, StorageError> {
    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_artifact = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION))
            .unwrap_or(false);
        if is_artifact && entry.file_type().await?.is_file() {
            tokio::fs::remove_file(&path).await?;
            removed += 1;
        }
    }
    Ok(removed)
}
