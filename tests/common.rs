#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use legal_notice_server::completion::{CompletionError, CompletionService};
use legal_notice_server::config::{ArtifactConfig, NoticeDelivery};
use legal_notice_server::document::SubstitutionPolicy;
use legal_notice_server::notice::NoticeRequest;
use legal_notice_server::storage::{ArtifactStore, DiskArtifactStore};
use legal_notice_server::AppState;

pub const THREE_PARAGRAPH_NOTICE: &str = "John Doe\n123 Main St\n\nDate: 2024-01-15\n\nTo,\nJane Roe\n456 Oak Ave\n\nSubject: Legal Notice for Breach of Contract\n\nDear Jane Roe,\n\nUnder instructions from my client, this notice concerns your failure to deliver goods worth Rs. 50000. The goods were paid for in full. Delivery was promised on 2024-01-15.\n\nYour conduct amounts to a breach under the Indian Contract Act 1872. My client has suffered loss as a direct result. You are liable to compensate my client.\n\nYou are called upon to pay the amount within 15 days of receipt of this notice. Failing which, legal proceedings will be initiated at your risk and cost. Please treat this as final.\n\nYours sincerely,\nJohn Doe";

/// Completion service that returns a fixed text and records every prompt.
pub struct MockCompletion {
    response: String,
    prompts: tokio::sync::Mutex<Vec<String>>,
}

impl MockCompletion {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().await.push(prompt.to_string());
        Ok(self.response.clone())
    }
}

/// Completion service that always fails like a dropped connection.
pub struct FailingCompletion;

#[async_trait]
impl CompletionService for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Network("connection reset by peer".to_string()))
    }
}

pub fn sample_request() -> NoticeRequest {
    NoticeRequest {
        notice_type: "Breach of Contract".to_string(),
        sender_name: "john doe".to_string(),
        sender_address: "123 main st".to_string(),
        recipient_name: "jane roe".to_string(),
        recipient_address: "456 oak ave".to_string(),
        issue_description: "Failure to deliver goods".to_string(),
        amount: "50000".to_string(),
        incident_date: "2024-01-15".to_string(),
    }
}

pub async fn disk_store(dir: &Path) -> Arc<DiskArtifactStore> {
    let config = ArtifactConfig {
        dir: dir.to_path_buf(),
        ..ArtifactConfig::default()
    };
    Arc::new(
        DiskArtifactStore::new(&config)
            .await
            .expect("failed to open artifact store"),
    )
}

/// State that stores PDFs in `dir` and serves them for download.
pub async fn download_state(completion: Arc<dyn CompletionService>, dir: &Path) -> AppState {
    let store: Arc<dyn ArtifactStore> = disk_store(dir).await;
    AppState::new_with_services(
        completion,
        Some(store),
        NoticeDelivery::Download,
        SubstitutionPolicy::default(),
    )
}

/// State that embeds PDFs in the response.
pub fn inline_state(completion: Arc<dyn CompletionService>) -> AppState {
    AppState::new_with_services(
        completion,
        None,
        NoticeDelivery::Inline,
        SubstitutionPolicy::default(),
    )
}

pub fn pdf_files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().map(|ext| ext == "pdf").unwrap_or(false))
                .count()
        })
        .unwrap_or(0)
}
