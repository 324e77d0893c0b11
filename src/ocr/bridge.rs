use std::fs;
use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use crate::core::error::ExtractError;
use crate::ocr::renderer::RasterPage;
use crate::ocr::{Detection, Recognizer};

/// tesseract's TSV rows below level 5 describe page/block/paragraph/line
/// geometry and carry no text.
const WORD_LEVEL: u32 = 5;

/// One row of tesseract's TSV output. Extra columns (page_num, block_num,
/// par_num, line_num, word_num) are ignored by name.
#[derive(Debug, Deserialize)]
struct TsvRecord {
    level: u32,
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    conf: f32,
    text: String,
}

/// OCR engine bridge: hands a rasterized page to the external tesseract
/// binary and parses the detections it reports. Constructed once per run
/// and reused across documents.
#[derive(Debug, Clone)]
pub struct TesseractBridge {
    work_dir: PathBuf,
    lang: String,
}

impl TesseractBridge {
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            work_dir,
            lang: "eng".to_string(),
        }
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }

    fn parse_tsv(data: &str) -> Result<Vec<Detection>, ExtractError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .from_reader(data.as_bytes());

        let mut detections = Vec::new();
        for record in reader.deserialize::<TsvRecord>() {
            let record = record.map_err(|e| {
                ExtractError::ModelInference(format!("malformed TSV from tesseract: {e}"))
            })?;
            if record.level != WORD_LEVEL || record.text.trim().is_empty() {
                continue;
            }
            detections.push(Detection {
                text: record.text,
                bbox: [record.left, record.top, record.width, record.height],
                // tesseract reports confidence as 0-100
                confidence: record.conf / 100.0,
            });
        }
        Ok(detections)
    }
}

impl Recognizer for TesseractBridge {
    fn recognize(&self, page: &RasterPage) -> Result<Vec<Detection>, ExtractError> {
        fs::create_dir_all(&self.work_dir).map_err(|e| {
            ExtractError::ModelInference(format!(
                "cannot create OCR work dir {}: {e}",
                self.work_dir.display()
            ))
        })?;

        // The engine reads files, not buffers; the raster is staged as a
        // scratch PNG and removed once recognition finishes.
        let scratch = self
            .work_dir
            .join(format!("ocr_input_{}.png", std::process::id()));
        image::save_buffer(
            &scratch,
            &page.pixels,
            page.width,
            page.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ExtractError::ModelInference(format!("cannot stage page raster: {e}")))?;

        let output = Command::new("tesseract")
            .arg(&scratch)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("--psm")
            .arg("3")
            .arg("tsv")
            .output();

        let _ = fs::remove_file(&scratch);

        let output = output.map_err(|e| {
            ExtractError::ModelInference(format!(
                "failed to invoke tesseract (is it installed?): {e}"
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::ModelInference(format!(
                "tesseract failed: {}",
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_tsv(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn parses_word_level_rows_in_engine_order() {
        let tsv = format!(
            "{HEADER}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t1000\t1400\t-1\t\n\
             5\t1\t1\t1\t1\t1\t10\t20\t80\t30\t96.5\tHello\n\
             5\t1\t1\t1\t1\t2\t100\t20\t90\t30\t91.0\tWorld\n"
        );
        let detections = TesseractBridge::parse_tsv(&tsv).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].text, "Hello");
        assert_eq!(detections[1].text, "World");
        assert_eq!(detections[0].bbox, [10, 20, 80, 30]);
        assert!((detections[0].confidence - 0.965).abs() < 1e-6);
    }

    #[test]
    fn skips_blank_word_rows() {
        let tsv = format!(
            "{HEADER}\n\
             5\t1\t1\t1\t1\t1\t10\t20\t80\t30\t95.0\t \n\
             5\t1\t1\t1\t1\t2\t100\t20\t90\t30\t90.0\tcat\n"
        );
        let detections = TesseractBridge::parse_tsv(&tsv).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "cat");
    }

    #[test]
    fn empty_output_yields_no_detections() {
        let detections = TesseractBridge::parse_tsv(&format!("{HEADER}\n")).unwrap();
        assert!(detections.is_empty());
    }
}
