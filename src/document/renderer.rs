//! PDF writer for laid-out notices.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::encoding::{to_latin1, SubstitutionPolicy};
use super::layout::{layout, LayoutOptions};
use super::{RenderError, RenderedDocument};

const DOCUMENT_TITLE: &str = "Legal Notice";
const LAYER_NAME: &str = "Layer 1";

/// Baseline offset inside a line box, as a fraction of the font size.
const BASELINE_FONT_RATIO: f32 = 0.3;

/// Renders plain text into paginated A4 PDF documents.
#[derive(Debug, Clone, Default)]
pub struct NoticeRenderer {
    options: LayoutOptions,
    policy: SubstitutionPolicy,
}

impl NoticeRenderer {
    pub fn new(policy: SubstitutionPolicy) -> Self {
        Self {
            options: LayoutOptions::default(),
            policy,
        }
    }

    /// Render `text` to PDF bytes.
    ///
    /// Unsupported characters are substituted, so the only failure is the
    /// PDF writer itself.
    pub fn render(&self, text: &str) -> Result<RenderedDocument, RenderError> {
        let clean = to_latin1(text, self.policy);
        let pages = layout(&clean, &self.options);
        let opts = &self.options;

        let (doc, first_page, first_layer) = PdfDocument::new(
            DOCUMENT_TITLE,
            Mm(opts.page_width),
            Mm(opts.page_height),
            LAYER_NAME,
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Font(format!("{e:?}")))?;

        let font_size_mm = opts.font_size_pt * 25.4 / 72.0;
        let baseline_offset = opts.line_height / 2.0 + BASELINE_FONT_RATIO * font_size_mm;

        for (index, page) in pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(opts.page_width), Mm(opts.page_height), LAYER_NAME)
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);

            for line in &page.lines {
                let baseline_from_top = line.y + baseline_offset;
                layer.use_text(
                    line.text.as_str(),
                    opts.font_size_pt,
                    Mm(opts.margin_left),
                    Mm(opts.page_height - baseline_from_top),
                    &font,
                );
            }
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| RenderError::Write(format!("{e:?}")))?;

        log::debug!(
            "Rendered notice: {} page(s), {} bytes",
            pages.len(),
            bytes.len()
        );

        Ok(RenderedDocument {
            bytes,
            page_count: pages.len(),
        })
    }
}
