//! Legal notice generation.
//!
//! - `models` - request and response bodies
//! - `validation` - presence checks on incoming requests
//! - `prompt` - instruction text for the completion service
//! - `pipeline` - orchestration of generation, rendering and delivery
//! - `handlers` - HTTP endpoints

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod validation;

pub use handlers::config;
pub use models::{GenerateResponse, NoticeRequest};
pub use pipeline::{Artifact, NoticeOutcome, NoticePipeline};

use thiserror::Error;

use crate::completion::CompletionError;
use crate::document::RenderError;
use crate::storage::StorageError;

/// Any failure while producing a notice.
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("rendering task failed: {0}")]
    Blocking(String),
    #[error("document storage is not configured")]
    StoreUnavailable,
}
