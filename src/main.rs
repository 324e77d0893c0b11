use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use ocrtally::export::preview::render_preview;
use ocrtally::pipeline::{run, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "ocrtally")]
#[command(version, about = "OCR a folder of PDFs into a word-frequency spreadsheet", long_about = None)]
struct Cli {
    /// Folder containing the input PDFs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "word_frequencies.csv")]
    output: PathBuf,

    /// Resolution multiplier applied when rasterizing each page
    #[arg(long, default_value_t = 2)]
    upscale: u32,

    /// Minimum token length kept by the normalizer
    #[arg(long, default_value_t = 2)]
    min_token_len: usize,

    /// Number of table rows shown in the final preview
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,

    /// OCR language passed to the engine
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Disable progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Exit codes: 0 clean run, 1 fatal setup or output error, 2 completed with
/// at least one failed document.
fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_cli(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            eprintln!("[!] completed with {failed} failed document(s)");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("[✗] fatal: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run_cli(cli: Cli) -> Result<usize> {
    if !cli.data_dir.is_dir() {
        anyhow::bail!("input folder does not exist: {}", cli.data_dir.display());
    }

    let config = RunConfig {
        data_dir: cli.data_dir,
        output: cli.output,
        upscale: cli.upscale,
        min_token_len: cli.min_token_len,
        preview_rows: cli.preview_rows,
        lang: cli.lang,
        quiet: cli.quiet,
    };

    let summary = run(&config)?;

    if !config.quiet {
        println!(
            "\nSample of word frequencies (top {} words):",
            config.preview_rows
        );
        print!("{}", render_preview(&summary.table, config.preview_rows));
    }

    Ok(summary.failed_documents())
}
