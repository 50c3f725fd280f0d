//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::{ExtractorError, Result};
use crate::extractor::extract_doc_numbers;

/// Patent Extractor - Extract doc-numbers from patent XML files.
#[derive(Parser)]
#[command(name = "patent-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract doc-numbers from an XML file in priority order.
    Extract {
        /// Path to the XML file to process
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "lines")]
        format: OutputFormat,
    },
}

/// How extracted doc-numbers are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One doc-number per line.
    Lines,
    /// JSON array.
    Json,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { file, format } => extract_command(&file, format),
    }
}

/// Execute the extract command.
fn extract_command(file: &Path, format: OutputFormat) -> Result<()> {
    // Validate the input path before invoking the pipeline.
    if !file.exists() {
        return Err(ExtractorError::FileNotFound(file.to_path_buf()));
    }
    if !file.is_file() {
        return Err(ExtractorError::NotAFile(file.to_path_buf()));
    }

    let doc_numbers = extract_doc_numbers(file)?;

    match format {
        OutputFormat::Lines => {
            for doc_number in &doc_numbers {
                println!("{doc_number}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&doc_numbers)?;
            println!("{json}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::parse_from(["patent-extractor", "extract", "input.xml"]);

        let Commands::Extract { file, format } = cli.command;
        assert_eq!(file, PathBuf::from("input.xml"));
        assert_eq!(format, OutputFormat::Lines);
    }

    #[test]
    fn test_cli_parse_extract_json() {
        let cli = Cli::parse_from([
            "patent-extractor",
            "extract",
            "input.xml",
            "--format",
            "json",
        ]);

        let Commands::Extract { format, .. } = cli.command;
        assert_eq!(format, OutputFormat::Json);
    }
}
