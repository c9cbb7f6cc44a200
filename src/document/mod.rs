//! Document rendering - turns generated notice text into a PDF.
//!
//! - `encoding` - Latin-1 transcoding with an explicit substitution policy
//! - `layout` - line wrapping and pagination
//! - `renderer` - PDF serialization

pub mod encoding;
pub mod layout;
pub mod renderer;

pub use encoding::SubstitutionPolicy;
pub use layout::LayoutOptions;
pub use renderer::NoticeRenderer;

use thiserror::Error;

/// Errors that can occur while writing the PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load PDF font: {0}")]
    Font(String),
    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// A finished PDF.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}
