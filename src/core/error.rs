use thiserror::Error;

/// Per-stage extraction failures. Both variants are fatal to the affected
/// document only: the pipeline catches them at the document boundary,
/// records an empty tally for that document, and moves on.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// The document could not be opened, rendered, or the page index is out
    /// of range. Callers must not retry.
    #[error("document access failed: {0}")]
    DocumentAccess(String),

    /// The OCR engine failed during recognition.
    #[error("model inference failed: {0}")]
    ModelInference(String),
}

impl ExtractError {
    pub fn stage(&self) -> &'static str {
        match self {
            ExtractError::DocumentAccess(_) => "document-access",
            ExtractError::ModelInference(_) => "model-inference",
        }
    }
}
