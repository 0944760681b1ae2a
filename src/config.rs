//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.callscope.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Transcript scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Dataset generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default report output path.
    #[serde(default = "default_report_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_report_output(),
            verbose: false,
        }
    }
}

fn default_report_output() -> String {
    "callscope_report.md".to_string()
}

/// Transcript scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum transcripts to analyze.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// File extensions treated as transcripts.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Patterns to exclude.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Maximum transcript size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Recurse into subdirectories.
    #[serde(default)]
    pub recursive: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            extensions: default_extensions(),
            excludes: default_excludes(),
            max_file_size: default_max_file_size(),
            recursive: false,
        }
    }
}

fn default_max_files() -> usize {
    100
}

fn default_extensions() -> Vec<String> {
    vec!["txt", "log", "transcript"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_excludes() -> Vec<String> {
    vec!["README.txt", "LICENSE.txt"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_file_size() -> usize {
    1024 * 1024 // 1MB
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Speaker tag treated as the victim.
    #[serde(default = "default_victim_speaker")]
    pub victim_speaker: String,

    /// Speaker tag treated as the scammer.
    #[serde(default = "default_scammer_speaker")]
    pub scammer_speaker: String,

    /// How many of the most frequent scammer words to report.
    #[serde(default = "default_top_words")]
    pub top_words: usize,

    /// Extra keywords per disclosure kind, keyed by kind slug
    /// (e.g. `login_credentials = ["passphrase"]`). Additive.
    #[serde(default)]
    pub extra_keywords: HashMap<String, Vec<String>>,

    /// Extra persuasive phrases. Additive.
    #[serde(default)]
    pub extra_phrases: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            victim_speaker: default_victim_speaker(),
            scammer_speaker: default_scammer_speaker(),
            top_words: default_top_words(),
            extra_keywords: HashMap::new(),
            extra_phrases: Vec::new(),
        }
    }
}

fn default_victim_speaker() -> String {
    "victim".to_string()
}

fn default_scammer_speaker() -> String {
    "scammer".to_string()
}

fn default_top_words() -> usize {
    15
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include turn excerpts in finding blocks.
    #[serde(default = "default_true")]
    pub include_excerpts: bool,

    /// Render PNG charts alongside the report.
    #[serde(default = "default_true")]
    pub charts: bool,

    /// Directory charts are written into.
    #[serde(default = "default_charts_dir")]
    pub charts_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_excerpts: true,
            charts: true,
            charts_dir: default_charts_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_charts_dir() -> String {
    "charts".to_string()
}

/// Dataset generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of records to generate.
    #[serde(default = "default_count")]
    pub count: usize,

    /// Output CSV path.
    #[serde(default = "default_csv_output")]
    pub output: String,

    /// Shortest call length in seconds.
    #[serde(default = "default_min_call_secs")]
    pub min_call_secs: f64,

    /// Longest call length in seconds.
    #[serde(default = "default_max_call_secs")]
    pub max_call_secs: f64,

    /// Weights for response sampling. Uniform when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_weights: Option<ResponseWeights>,

    /// Weights for scenario sampling. Uniform when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_weights: Option<ScenarioWeights>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            output: default_csv_output(),
            min_call_secs: default_min_call_secs(),
            max_call_secs: default_max_call_secs(),
            response_weights: None,
            scenario_weights: None,
        }
    }
}

fn default_count() -> usize {
    3000
}

fn default_csv_output() -> String {
    "synthetic_calls.csv".to_string()
}

fn default_min_call_secs() -> f64 {
    5.0
}

fn default_max_call_secs() -> f64 {
    300.0
}

/// Per-category weights for response sampling.
///
/// A weight table must name every category; serde rejects missing or
/// unknown fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseWeights {
    pub hung_up_immediately: f64,
    pub asked_questions: f64,
    pub shared_information: f64,
    pub skeptical: f64,
    pub ignored: f64,
}

impl ResponseWeights {
    /// Weights in category order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.hung_up_immediately,
            self.asked_questions,
            self.shared_information,
            self.skeptical,
            self.ignored,
        ]
    }
}

/// Per-category weights for phishing scenario sampling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioWeights {
    pub bank_fraud: f64,
    pub tech_support: f64,
    pub irs_tax: f64,
    pub prize: f64,
}

impl ScenarioWeights {
    /// Weights in category order.
    pub fn as_array(&self) -> [f64; 4] {
        [self.bank_fraud, self.tech_support, self.irs_tax, self.prize]
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".callscope.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with `analyze` CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_analyze(&mut self, cli: &crate::cli::Cli, args: &crate::cli::AnalyzeArgs) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if let Some(ref extensions) = args.extensions {
            self.scanner.extensions = extensions.clone();
        }
        if let Some(ref excludes) = args.exclude {
            self.scanner.excludes = excludes.clone();
        }
        if let Some(max_files) = args.max_files {
            self.scanner.max_files = max_files;
        }
        if args.recursive {
            self.scanner.recursive = true;
        }

        if let Some(top_words) = args.top_words {
            self.analysis.top_words = top_words;
        }

        if args.no_charts {
            self.report.charts = false;
        }
        if let Some(ref charts_dir) = args.charts_dir {
            self.report.charts_dir = charts_dir.display().to_string();
        }

        if cli.verbose {
            self.general.verbose = true;
        }
    }

    /// Merge this configuration with `generate` CLI arguments.
    pub fn merge_with_generate(&mut self, args: &crate::cli::GenerateArgs) {
        if let Some(count) = args.count {
            self.generator.count = count;
        }
        if let Some(ref output) = args.output {
            self.generator.output = output.display().to_string();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "callscope_report.md");
        assert_eq!(config.analysis.top_words, 15);
        assert_eq!(config.generator.count, 3000);
        assert!(config.scanner.extensions.contains(&"txt".to_string()));
        assert!(config.generator.response_weights.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "audit.md"
verbose = true

[analysis]
top_words = 10
extra_phrases = ["act now"]

[analysis.extra_keywords]
login_credentials = ["passphrase"]

[generator]
count = 500

[generator.response_weights]
hung_up_immediately = 3.0
asked_questions = 2.0
shared_information = 1.0
skeptical = 2.0
ignored = 2.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "audit.md");
        assert!(config.general.verbose);
        assert_eq!(config.analysis.top_words, 10);
        assert_eq!(config.analysis.extra_phrases, vec!["act now"]);
        assert_eq!(
            config.analysis.extra_keywords.get("login_credentials"),
            Some(&vec!["passphrase".to_string()])
        );
        assert_eq!(config.generator.count, 500);

        let weights = config.generator.response_weights.unwrap();
        assert_eq!(weights.hung_up_immediately, 3.0);
        assert_eq!(weights.shared_information, 1.0);
    }

    #[test]
    fn test_incomplete_weight_table_is_rejected() {
        let toml_content = r#"
[generator.response_weights]
hung_up_immediately = 1.0
"#;
        assert!(toml::from_str::<Config>(toml_content).is_err());
    }

    #[test]
    fn test_unknown_weight_category_is_rejected() {
        let toml_content = r#"
[generator.scenario_weights]
bank_fraud = 1.0
tech_support = 1.0
irs_tax = 1.0
prize = 1.0
lottery = 1.0
"#;
        assert!(toml::from_str::<Config>(toml_content).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("[generator]"));
    }
}
