use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::ExtractError;

/// Handle on one input document. Scoped per document: nothing is held open
/// between documents, so memory stays bounded by one page raster.
#[derive(Debug, Clone)]
pub struct PdfReader {
    path: PathBuf,
}

impl PdfReader {
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        if !path.is_file() {
            return Err(ExtractError::DocumentAccess(format!(
                "no such document: {}",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> Result<usize, ExtractError> {
        let output = Command::new("pdfinfo")
            .arg(&self.path)
            .output()
            .map_err(|e| {
                ExtractError::DocumentAccess(format!(
                    "failed to invoke pdfinfo (is poppler-utils installed?): {e}"
                ))
            })?;

        if !output.status.success() {
            return Err(ExtractError::DocumentAccess(format!(
                "pdfinfo failed with status {} on {}",
                output.status,
                self.path.display()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            if let Some(rest) = line.strip_prefix("Pages:") {
                let num = rest.trim();
                return num.parse().map_err(|_| {
                    ExtractError::DocumentAccess(format!(
                        "unparseable page count {num:?} for {}",
                        self.path.display()
                    ))
                });
            }
        }

        Err(ExtractError::DocumentAccess(format!(
            "pdfinfo output has no 'Pages:' line for {}",
            self.path.display()
        )))
    }
}
