//! The request pipeline: validate, prompt, generate, render, deliver.

use std::sync::Arc;

use actix_web::web;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use uuid::Uuid;

use super::models::{GenerateResponse, NoticeRequest};
use super::prompt::build_prompt;
use super::NoticeError;
use crate::completion::CompletionService;
use crate::config::NoticeDelivery;
use crate::document::NoticeRenderer;
use crate::storage::ArtifactStore;

/// Where the rendered PDF ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Stored(Uuid),
    Inline(String),
}

impl Artifact {
    pub fn download_url(id: &Uuid) -> String {
        format!("/download/{id}")
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct NoticeOutcome {
    pub notice: String,
    pub page_count: usize,
    pub artifact: Artifact,
}

impl From<NoticeOutcome> for GenerateResponse {
    fn from(outcome: NoticeOutcome) -> Self {
        match outcome.artifact {
            Artifact::Stored(id) => {
                GenerateResponse::download(outcome.notice, Artifact::download_url(&id))
            }
            Artifact::Inline(pdf_b64) => GenerateResponse::inline(outcome.notice, pdf_b64),
        }
    }
}

pub struct NoticePipeline {
    completion: Arc<dyn CompletionService>,
    renderer: NoticeRenderer,
    delivery: NoticeDelivery,
    artifacts: Option<Arc<dyn ArtifactStore>>,
}

impl NoticePipeline {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        renderer: NoticeRenderer,
        delivery: NoticeDelivery,
        artifacts: Option<Arc<dyn ArtifactStore>>,
    ) -> Self {
        Self {
            completion,
            renderer,
            delivery,
            artifacts,
        }
    }

    pub fn delivery(&self) -> NoticeDelivery {
        self.delivery
    }

    pub fn artifacts(&self) -> Option<&Arc<dyn ArtifactStore>> {
        self.artifacts.as_ref()
    }

    /// Run the whole pipeline for one request. Nothing is persisted unless
    /// every earlier step succeeded.
    pub async fn run(&self, request: NoticeRequest) -> Result<NoticeOutcome, NoticeError> {
        request.validate().map_err(NoticeError::Validation)?;

        let store = match self.delivery {
            NoticeDelivery::Download => Some(
                self.artifacts
                    .as_ref()
                    .ok_or(NoticeError::StoreUnavailable)?,
            ),
            NoticeDelivery::Inline => None,
        };

        let prompt = build_prompt(&request);
        log::debug!(
            "Generating '{}' notice ({} prompt chars)",
            request.notice_type,
            prompt.len()
        );
        let notice = self.completion.complete(&prompt).await?;

        log::debug!("Rendering notice ({} chars)", notice.len());
        let renderer = self.renderer.clone();
        let text = notice.clone();
        let document = web::block(move || renderer.render(&text))
            .await
            .map_err(|e| NoticeError::Blocking(e.to_string()))??;

        let artifact = match store {
            Some(store) => Artifact::Stored(store.save(&document.bytes).await?),
            None => Artifact::Inline(BASE64.encode(&document.bytes)),
        };

        Ok(NoticeOutcome {
            notice,
            page_count: document.page_count,
            artifact,
        })
    }
}
