use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::ExtractError;

/// PDF pages are defined at 72 dpi, so rendering at `72 * upscale` scales
/// the native resolution by `upscale` on both axes.
const PDF_BASE_DPI: u32 = 72;

/// One page rasterized into a dense RGB8 buffer.
#[derive(Debug, Clone)]
pub struct RasterPage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

#[derive(Debug, Clone)]
pub struct PageRenderer {
    work_dir: PathBuf,
    upscale: u32,
}

impl PageRenderer {
    pub fn new(work_dir: PathBuf, upscale: u32) -> Self {
        Self { work_dir, upscale }
    }

    /// Rasterizes one zero-based page at the fixed upscale. Fails with
    /// `DocumentAccess` if the document cannot be rendered or the page is
    /// out of range; callers must not retry.
    pub fn render_page(
        &self,
        pdf_path: &Path,
        page_idx: usize,
    ) -> Result<RasterPage, ExtractError> {
        fs::create_dir_all(&self.work_dir).map_err(|e| {
            ExtractError::DocumentAccess(format!(
                "cannot create render dir {}: {e}",
                self.work_dir.display()
            ))
        })?;

        // pdftoppm uses 1-based page indices
        let page_number = page_idx + 1;
        let prefix = self.work_dir.join(format!("page_{page_number:03}"));
        let prefix_str = prefix.to_str().ok_or_else(|| {
            ExtractError::DocumentAccess("non-UTF8 render path not supported".to_string())
        })?;

        let status = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg((PDF_BASE_DPI * self.upscale).to_string())
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg(pdf_path)
            .arg(prefix_str)
            .status()
            .map_err(|e| {
                ExtractError::DocumentAccess(format!(
                    "failed to invoke pdftoppm (is poppler-utils installed?): {e}"
                ))
            })?;

        if !status.success() {
            return Err(ExtractError::DocumentAccess(format!(
                "pdftoppm failed with status {status} on page {page_number} of {}",
                pdf_path.display()
            )));
        }

        // pdftoppm will create a file like `<prefix>-1.png` for this page
        let image_path = self
            .work_dir
            .join(format!("page_{page_number:03}-{page_number}.png"));

        if !image_path.exists() {
            return Err(ExtractError::DocumentAccess(format!(
                "expected rendered image not found: {} (page out of range?)",
                image_path.display()
            )));
        }

        let decoded = image::open(&image_path).map_err(|e| {
            ExtractError::DocumentAccess(format!("cannot decode rendered page: {e}"))
        })?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb.into_raw();

        // The scratch file is spent once the buffer is in memory.
        let _ = fs::remove_file(&image_path);

        Ok(RasterPage {
            pixels,
            width,
            height,
            channels: 3,
        })
    }
}
