//! CLI interface for the job matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Relevance-ranked job search over job snapshots")]
#[command(long_about = "Search, browse and shortlist job postings with keyword parsing, synonym expansion and fuzzy matching")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank jobs against a free-text query
    Search {
        /// Job snapshot file (JSON or JSONL)
        #[arg(short, long)]
        jobs: PathBuf,

        /// Search text; empty lists the newest jobs
        #[arg(short, long, default_value = "")]
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Drop results scoring below this value
        #[arg(long, value_parser = parse_min_score)]
        min_score: Option<f32>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List jobs newest first with plain filters
    Browse {
        /// Job snapshot file (JSON or JSONL)
        #[arg(short, long)]
        jobs: PathBuf,

        /// Substring to look for in title, company or description
        #[arg(short, long)]
        keyword: Option<String>,

        /// Location substring
        #[arg(long)]
        location: Option<String>,

        /// Job type, e.g. "Part-time"
        #[arg(short = 't', long)]
        job_type: Option<String>,

        /// Only remote jobs
        #[arg(long)]
        remote: bool,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Shortlist jobs for a natural-language request as the assistant would
    Assist {
        /// Job snapshot file (JSON or JSONL)
        #[arg(short, long)]
        jobs: PathBuf,

        /// The user's request
        #[arg(short, long)]
        prompt: String,

        /// File holding the model's follow-up reply to interpret
        #[arg(short, long)]
        reply: Option<PathBuf>,

        /// Print the job selection prompt sent to the model
        #[arg(long)]
        show_prompt: bool,
    },

    /// Pull a JSON payload out of model output
    Extract {
        /// File with the model output; reads stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Parse a score floor: a finite, non-negative number
pub fn parse_min_score(value: &str) -> Result<f32, String> {
    let score: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid score: {}", value))?;
    if !score.is_finite() || score < 0.0 {
        return Err(format!("Score must be a non-negative number, got {}", value));
    }
    Ok(score)
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_min_score() {
        assert_eq!(parse_min_score("1.5"), Ok(1.5));
        assert_eq!(parse_min_score("0"), Ok(0.0));
        assert!(parse_min_score("NaN").is_err());
        assert!(parse_min_score("inf").is_err());
        assert!(parse_min_score("-1").is_err());
        assert!(parse_min_score("high").is_err());
    }

    #[test]
    fn test_nan_min_score_rejected_on_command_line() {
        let result = Cli::try_parse_from([
            "job-matcher", "search", "--jobs", "jobs.json", "--min-score", "NaN",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["json", "jsonl"];
        assert!(validate_file_extension(Path::new("jobs.JSON"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("jobs.csv"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("jobs"), &allowed).is_err());
    }

    #[test]
    fn test_search_command_parses() {
        let cli = Cli::try_parse_from([
            "job-matcher", "search", "--jobs", "jobs.json", "--query", "barista penang", "--limit", "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Search { query, limit, .. } => {
                assert_eq!(query, "barista penang");
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search command"),
        }
    }
}
