//! Shared application state.

use std::sync::Arc;

use crate::completion::{CompletionService, GroqClient};
use crate::config::{AppConfig, NoticeDelivery};
use crate::document::{NoticeRenderer, SubstitutionPolicy};
use crate::notice::NoticePipeline;
use crate::storage::{ArtifactStore, DiskArtifactStore};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<NoticePipeline>,
}

impl AppState {
    /// Build the production state: Groq client, and a disk store with its
    /// sweeper when notices are delivered as downloads.
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = GroqClient::new(&config.completion)?;
        log::info!("Drafting notices with model {}", client.model());
        let completion: Arc<dyn CompletionService> = Arc::new(client);

        let artifacts: Option<Arc<dyn ArtifactStore>> = match config.delivery {
            NoticeDelivery::Download => {
                let store = Arc::new(DiskArtifactStore::new(&config.artifacts).await?);
                store.spawn_sweeper(config.artifacts.sweep_interval);
                log::info!(
                    "Storing generated notices in {} (ttl {:?}, max {})",
                    store.dir().display(),
                    config.artifacts.ttl,
                    config.artifacts.max_count
                );
                Some(store as Arc<dyn ArtifactStore>)
            }
            NoticeDelivery::Inline => None,
        };

        Ok(Self::new_with_services(
            completion,
            artifacts,
            config.delivery,
            config.substitution,
        ))
    }

    pub fn new_with_services(
        completion: Arc<dyn CompletionService>,
        artifacts: Option<Arc<dyn ArtifactStore>>,
        delivery: NoticeDelivery,
        substitution: SubstitutionPolicy,
    ) -> Self {
        let pipeline = NoticePipeline::new(
            completion,
            NoticeRenderer::new(substitution),
            delivery,
            artifacts,
        );
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
