pub mod bridge;
pub mod extractor;
pub mod renderer;

use crate::core::error::ExtractError;
use crate::ocr::renderer::RasterPage;

pub use bridge::TesseractBridge;
pub use extractor::DocumentExtractor;
pub use renderer::PageRenderer;

/// One recognized text span on a page, in the order the engine returned it.
/// Only the text survives downstream; position and confidence are reported
/// by the engine and discarded here.
#[derive(Debug, Clone)]
pub struct Detection {
    pub text: String,
    /// left, top, width, height in raster pixels
    pub bbox: [i32; 4],
    /// 0.0 to 1.0
    pub confidence: f32,
}

pub trait Recognizer {
    fn recognize(&self, page: &RasterPage) -> Result<Vec<Detection>, ExtractError>;
}
