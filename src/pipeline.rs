use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::model::{DocumentReport, FrequencyTable};
use crate::export::{CsvExporter, Exporter};
use crate::ocr::{DocumentExtractor, PageRenderer, TesseractBridge};
use crate::table::build_table;
use crate::text::{count, normalize};

/// Characters of extracted text echoed per document.
const SAMPLE_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub output: PathBuf,
    pub upscale: u32,
    pub min_token_len: usize,
    pub preview_rows: usize,
    pub lang: String,
    pub quiet: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output: PathBuf::from("word_frequencies.csv"),
            upscale: 2,
            min_token_len: 2,
            preview_rows: 10,
            lang: "eng".to_string(),
            quiet: false,
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub table: FrequencyTable,
    pub reports: Vec<DocumentReport>,
}

impl RunSummary {
    pub fn failed_documents(&self) -> usize {
        self.reports.iter().filter(|r| r.failed()).count()
    }
}

/// Lists files in `dir` whose names end in `.pdf` (exact, case-sensitive),
/// in directory listing order. The order is whatever the platform reports.
pub fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("cannot read input folder {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("cannot read input folder {}", dir.display()))?;
        let path = entry.path();
        let is_pdf = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Runs the whole pipeline: enumerate, extract each document with
/// per-document failure capture, tally, build the table, write the CSV.
///
/// Per-document failures never abort the run; they are reported and the
/// document keeps an empty column. Infrastructure failures (unreadable
/// folder, unwritable output) propagate and abort.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let pdf_files = list_pdf_files(&config.data_dir)?;
    if !config.quiet {
        println!(
            "[*] Found {} PDF files in {}",
            pdf_files.len(),
            config.data_dir.display()
        );
        if pdf_files.is_empty() {
            println!("[!] no PDF files found; writing an empty table");
        }
    }

    let work_dir = std::env::temp_dir().join(format!("ocrtally-{}", std::process::id()));
    let renderer = PageRenderer::new(work_dir.clone(), config.upscale);
    let bridge = TesseractBridge::new(work_dir.join("ocr")).with_lang(config.lang.clone());
    let extractor = DocumentExtractor::new(renderer, bridge).quiet(config.quiet);

    let mut tallies: Vec<(String, HashMap<String, u64>)> = Vec::with_capacity(pdf_files.len());
    let mut reports = Vec::with_capacity(pdf_files.len());

    for path in &pdf_files {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        if !config.quiet {
            println!("\n[*] Processing: {name}");
        }

        match extractor.extract(path) {
            Ok(doc) => {
                let tokens = normalize(&doc.text, config.min_token_len);
                let counts = count(&tokens);

                if !config.quiet {
                    println!("    total characters extracted: {}", doc.text.len());
                    if !doc.text.trim().is_empty() {
                        let sample: String = doc.text.chars().take(SAMPLE_CHARS).collect();
                        println!("    sample: {}...", sample.trim_end());
                    }
                    if counts.is_empty() {
                        println!("[!] No text extracted from {name}");
                    } else {
                        println!("[+] Found {} unique words in {name}", counts.len());
                    }
                }

                reports.push(DocumentReport {
                    name: name.clone(),
                    pages: doc.pages,
                    chars: doc.text.len(),
                    unique_tokens: counts.len(),
                    failure: None,
                });
                tallies.push((name, counts));
            }
            Err(err) => {
                eprintln!("[✗] {name}: extraction failed ({}): {err}", err.stage());
                reports.push(DocumentReport {
                    name: name.clone(),
                    pages: 0,
                    chars: 0,
                    unique_tokens: 0,
                    failure: Some(err),
                });
                // a failed document still gets a column
                tallies.push((name, HashMap::new()));
            }
        }
    }

    let _ = fs::remove_dir_all(&work_dir);

    let table = build_table(&tallies);
    CsvExporter::new(config.output.clone()).export(&table)?;
    if !config.quiet {
        println!("\n[✓] Word frequencies saved to: {}", config.output.display());
    }

    Ok(RunSummary { table, reports })
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temp_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        let pid = std::process::id();
        std::env::temp_dir().join(format!("{prefix}-{pid}-{now}"))
    }

    #[test]
    fn lists_only_exact_pdf_suffix() -> Result<()> {
        let dir = temp_dir("ocrtally-list");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("a.pdf"), b"")?;
        fs::write(dir.join("b.PDF"), b"")?;
        fs::write(dir.join("c.txt"), b"")?;
        fs::write(dir.join("d.pdf.bak"), b"")?;

        let files = list_pdf_files(&dir)?;
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pdf"]);

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn missing_folder_is_fatal() {
        let err = list_pdf_files(Path::new("/nonexistent/ocrtally-data")).unwrap_err();
        assert!(err.to_string().contains("cannot read input folder"));
    }

    #[test]
    fn empty_folder_completes_and_writes_degenerate_table() -> Result<()> {
        let dir = temp_dir("ocrtally-empty-run");
        fs::create_dir_all(&dir)?;
        let output = dir.join("word_frequencies.csv");

        let config = RunConfig {
            data_dir: dir.clone(),
            output: output.clone(),
            quiet: true,
            ..RunConfig::default()
        };
        let summary = run(&config)?;

        assert!(summary.table.rows.is_empty());
        assert_eq!(summary.failed_documents(), 0);
        let contents = fs::read_to_string(&output)?;
        assert_eq!(contents.lines().collect::<Vec<_>>(), vec![",Total", "TOTAL,0"]);

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }
}
