//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Callscope - scam-call transcript auditor and dataset generator
///
/// Audit call transcripts for sensitive-information disclosures,
/// persuasive phrasing, and sentiment, or generate synthetic scam-call
/// datasets. Markdown/JSON reports, PNG charts, CSV output.
///
/// Examples:
///   callscope analyze --sample
///   callscope analyze transcripts/call_017.txt --format json
///   callscope analyze transcripts/ --fail-on high
///   callscope generate --count 3000 --output synthetic_calls.csv
///   callscope init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    ///
    /// If not specified, looks for .callscope.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze call transcripts for disclosures, persuasion, and sentiment
    Analyze(AnalyzeArgs),

    /// Generate a synthetic scam-call dataset as CSV
    Generate(GenerateArgs),

    /// Generate a default .callscope.toml configuration file
    InitConfig,
}

/// Arguments for the `analyze` subcommand.
#[derive(ClapArgs, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Transcript file or directory of transcripts to analyze
    ///
    /// Not required with --sample.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Analyze the built-in demo transcript instead of a file
    #[arg(long, conflicts_with = "input")]
    pub sample: bool,

    /// Output file path for the report
    ///
    /// Defaults to callscope_report.md (or the config file value).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Directory to write PNG charts into
    #[arg(long, value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Recurse into subdirectories when PATH is a directory
    #[arg(short, long)]
    pub recursive: bool,

    /// File extensions to treat as transcripts (comma-separated)
    ///
    /// Example: --extensions txt,log
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Patterns to exclude when scanning a directory (comma-separated)
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Maximum number of transcripts to analyze
    #[arg(long, value_name = "COUNT")]
    pub max_files: Option<usize>,

    /// How many of the most frequent scammer words to report
    #[arg(long, value_name = "COUNT")]
    pub top_words: Option<usize>,

    /// Minimum severity to include in the report
    ///
    /// Findings below this level are filtered out. Values: critical, high, medium, low
    #[arg(long, value_name = "LEVEL")]
    pub min_severity: Option<SeverityLevel>,

    /// Fail if disclosures at or above this severity are found
    ///
    /// Useful for CI pipelines. Exit code 2 when threshold is exceeded.
    /// Values: critical, high, medium, low
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<SeverityLevel>,

    /// Dry run: list the transcripts that would be analyzed and exit
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `generate` subcommand.
#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of records to generate
    ///
    /// Defaults to 3000 (or the config file value).
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub count: Option<usize>,

    /// Output CSV file path
    ///
    /// Defaults to synthetic_calls.csv (or the config file value).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seed for deterministic generation
    ///
    /// Omit to seed from OS entropy.
    #[arg(long, value_name = "SEED", env = "CALLSCOPE_SEED")]
    pub seed: Option<u64>,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Severity level for --fail-on and --min-severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match &self.command {
            Command::Analyze(args) => args.validate(),
            Command::Generate(args) => args.validate(),
            Command::InitConfig => Ok(()),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

impl AnalyzeArgs {
    /// Validate the analyze arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_none() && !self.sample {
            return Err("Provide a transcript PATH or use --sample".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input path does not exist: {}", input.display()));
            }
        }

        if let Some(max_files) = self.max_files {
            if max_files == 0 {
                return Err("Max files must be at least 1".to_string());
            }
        }

        if let Some(top_words) = self.top_words {
            if top_words == 0 {
                return Err("Top words must be at least 1".to_string());
            }
        }

        Ok(())
    }
}

impl GenerateArgs {
    /// Validate the generate arguments.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(count) = self.count {
            if count == 0 {
                return Err("Count must be at least 1".to_string());
            }
        }

        Ok(())
    }
}
