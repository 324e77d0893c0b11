use std::path::Path;

use crate::core::error::ExtractError;
use crate::ocr::renderer::PageRenderer;
use crate::ocr::{Detection, Recognizer};
use crate::pdf::PdfReader;

/// Extracted text for one document: each page's detections joined with
/// single spaces, pages joined with newlines.
#[derive(Debug, Clone)]
pub struct DocumentText {
    pub text: String,
    pub pages: usize,
}

pub struct DocumentExtractor<R> {
    renderer: PageRenderer,
    recognizer: R,
    quiet: bool,
}

impl<R: Recognizer> DocumentExtractor<R> {
    pub fn new(renderer: PageRenderer, recognizer: R) -> Self {
        Self {
            renderer,
            recognizer,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Extracts the full-document text blob. Pages are processed strictly
    /// in index order; the first failing page aborts the whole document, so
    /// failure tolerance is document-scoped.
    pub fn extract(&self, pdf_path: &Path) -> Result<DocumentText, ExtractError> {
        let reader = PdfReader::open(pdf_path)?;
        let page_count = reader.page_count()?;

        let mut full_text = String::new();
        for page_idx in 0..page_count {
            let raster = self.renderer.render_page(reader.path(), page_idx)?;
            let detections = self.recognizer.recognize(&raster)?;
            let text = page_text(&detections);

            if !self.quiet {
                println!(
                    "    page {}/{}: {}x{} px, {} characters",
                    page_idx + 1,
                    page_count,
                    raster.width,
                    raster.height,
                    text.len()
                );
            }

            full_text.push_str(&text);
            full_text.push('\n');
        }

        Ok(DocumentText {
            text: full_text,
            pages: page_count,
        })
    }
}

/// Joins a page's detections with single spaces, in the order the engine
/// returned them. Reading order is the engine's responsibility.
fn page_text(detections: &[Detection]) -> String {
    detections
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
