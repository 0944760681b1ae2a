//! Callscope - scam-call transcript auditor
//!
//! A CLI tool that audits call transcripts for sensitive-information
//! disclosures, persuasive phrasing, and sentiment, and generates
//! synthetic scam-call datasets.
//!
//! Exit codes:
//!   0 - Success (no disclosures above threshold, or no --fail-on set)
//!   1 - Runtime error (bad input, unreadable file, config failure)
//!   2 - Disclosures found above --fail-on threshold

mod analysis;
mod charts;
mod cli;
mod config;
mod generator;
mod models;
mod report;
mod scanner;
mod transcript;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use cli::{AnalyzeArgs, Cli, Command, GenerateArgs, OutputFormat, SeverityLevel};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{FindingSummary, Report, ReportMetadata, Severity};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Validate arguments
    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(cli.command, Command::InitConfig) {
        match handle_init_config() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("\n❌ Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Initialize logging
    init_logging(&cli);

    info!("Callscope v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", cli);

    let result = match &cli.command {
        Command::Analyze(args) => run_analyze(&cli, args),
        Command::Generate(args) => run_generate(&cli, args),
        Command::InitConfig => unreachable!("handled above"),
    };

    match result {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle `init-config`: generate a default .callscope.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".callscope.toml");

    if path.exists() {
        eprintln!("⚠️  .callscope.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .callscope.toml")?;

    println!("✅ Created .callscope.toml with default settings.");
    println!("   Edit it to customize lexicons, weights, charts, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(cli: &Cli) {
    let level = cli.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(cli: &Cli) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = cli.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .callscope.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Run the complete analysis workflow. Returns exit code (0 or 2).
fn run_analyze(cli: &Cli, args: &AnalyzeArgs) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(cli)?;
    config.merge_with_analyze(cli, args);

    let scan_config = scanner::ScanConfig::from(&config.scanner);

    // Handle --dry-run: list transcripts and exit
    if args.dry_run {
        return handle_dry_run(args, &scan_config);
    }

    // Step 1: Collect transcripts
    let (source, transcripts) = collect_transcripts(args, &scan_config)?;
    println!("🔎 Analyzing {} transcript(s) from {}", transcripts.len(), source);

    // Step 2: Run the analysis
    let analyzer = analysis::Analyzer::from_config(&config.analysis)?;
    let mut analyses: Vec<_> = transcripts.iter().map(|t| analyzer.analyze(t)).collect();

    // Apply --min-severity filter
    if let Some(min_level) = args.min_severity {
        let min_severity = severity_from_level(min_level);
        for analysis in &mut analyses {
            analysis.findings.retain(|f| f.severity >= min_severity);
        }
    }

    // Step 3: Build the report
    println!("📝 Generating report...");

    let all_findings = analysis::aggregate_findings(&analyses);
    let summary = FindingSummary::from_findings(&all_findings);
    let duration = start_time.elapsed().as_secs_f64();

    let metadata = ReportMetadata {
        source: source.clone(),
        analysis_date: Utc::now(),
        transcripts_analyzed: analyses.len(),
        total_turns: analyses.iter().map(|a| a.turn_count).sum(),
        total_findings: summary.total,
        duration_seconds: duration,
    };

    let report = Report {
        metadata,
        transcripts: analyses,
        summary: summary.clone(),
        recommendations: report::default_recommendations(&summary),
    };

    // Step 4: Generate and save the report
    let output = PathBuf::from(&config.general.output);
    let content = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(&output, &content)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    // Step 5: Render charts
    if config.report.charts {
        let charts_dir = PathBuf::from(&config.report.charts_dir);
        match charts::render_charts(&report, &charts_dir) {
            Ok(written) if !written.is_empty() => {
                println!("📈 Charts written to {}:", charts_dir.display());
                for path in &written {
                    println!("     {}", path.display());
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Chart rendering failed: {:#}", e),
        }
    }

    // Print summary
    println!("\n📊 Analysis Summary:");
    println!("   Transcripts analyzed: {}", report.transcripts.len());
    println!("   Total disclosures: {}", summary.total);
    println!(
        "   - 🔴 Critical: {} | 🟠 High: {} | 🟡 Medium: {} | 🟢 Low: {}",
        summary.critical, summary.high, summary.medium, summary.low
    );
    println!("   Duration: {:.1}s", duration);
    println!(
        "\n✅ Audit complete! Report saved to: {}",
        output.display()
    );

    // Check --fail-on threshold
    if let Some(fail_level) = args.fail_on {
        let threshold_severity = severity_from_level(fail_level);
        let has_findings_above = all_findings
            .iter()
            .any(|f| f.severity >= threshold_severity);

        if has_findings_above {
            eprintln!(
                "\n⛔ Disclosures found at or above {:?} severity. Failing (exit code 2).",
                fail_level
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Handle --dry-run: list transcripts that would be analyzed, exit.
fn handle_dry_run(args: &AnalyzeArgs, scan_config: &scanner::ScanConfig) -> Result<i32> {
    println!("\n🔍 Dry run: listing transcripts (no analysis)...\n");

    if args.sample {
        println!("     📄 sample (embedded demo transcript)");
        println!("\n✅ Dry run complete.");
        return Ok(0);
    }

    let Some(input) = args.input.as_ref() else {
        bail!("No input path provided");
    };
    if input.is_file() {
        let size = std::fs::metadata(input).map(|m| m.len()).unwrap_or(0);
        println!("     📄 {} ({} bytes)", input.display(), size);
    } else {
        let file_scanner =
            scanner::TranscriptScanner::new(input.clone(), scan_config.clone());
        let files = file_scanner.scan()?;

        if files.is_empty() {
            println!("   No matching transcript files found.");
        } else {
            for file in &files {
                println!("     📄 {} ({} bytes)", file.path, file.size);
            }
            println!("\n   Total: {} transcripts", files.len());
        }
    }

    println!("\n✅ Dry run complete.");
    Ok(0)
}

/// Collect transcripts from the sample, a file, or a directory.
fn collect_transcripts(
    args: &AnalyzeArgs,
    scan_config: &scanner::ScanConfig,
) -> Result<(String, Vec<transcript::Transcript>)> {
    if args.sample {
        return Ok(("sample".to_string(), vec![transcript::sample()]));
    }

    let Some(input) = args.input.as_ref() else {
        bail!("No input path provided");
    };

    if input.is_file() {
        let parsed = transcript::parse_file(input)?;
        return Ok((input.display().to_string(), vec![parsed]));
    }

    // Directory scan
    let file_scanner = scanner::TranscriptScanner::new(input.clone(), scan_config.clone());
    let files = file_scanner.scan()?;
    info!("Found {} transcript file(s)", files.len());

    let mut transcripts = Vec::new();
    for file in &files {
        match transcript::parse_file(&file_scanner.resolve(file)) {
            Ok(parsed) => transcripts.push(parsed),
            Err(e) => warn!("Skipping {}: {}", file.path, e),
        }
    }

    if transcripts.is_empty() {
        bail!("No transcripts found in {}", input.display());
    }

    Ok((input.display().to_string(), transcripts))
}

/// Run the dataset generation workflow. Returns exit code (always 0).
fn run_generate(cli: &Cli, args: &GenerateArgs) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(cli)?;
    config.merge_with_generate(args);

    let count = config.generator.count;
    let output = PathBuf::from(&config.generator.output);

    println!("🎲 Generating {} synthetic call records...", count);
    if let Some(seed) = args.seed {
        info!("Seeded generation with {}", seed);
    }

    let mut call_generator = generator::CallGenerator::from_config(&config.generator, args.seed)?;

    // Progress bar for large runs
    let progress = if cli.quiet || count < 1000 {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    let mut csv_output = generator::csv::CsvOutput::new();
    for _ in 0..count {
        csv_output.add_record(call_generator.next_record());
        progress.inc(1);
    }
    progress.finish_and_clear();

    csv_output.write_to(&output)?;

    let duration = start_time.elapsed().as_secs_f64();
    println!("\n✅ Dataset saved to: {}", output.display());
    println!("   Records: {}", csv_output.len());
    println!("   Duration: {:.1}s", duration);

    // Head preview, like a quick sanity check of the shape
    if !cli.quiet {
        let content = csv_output.to_csv();
        println!("\n   Preview:");
        for line in content.lines().take(6) {
            println!("     {}", line);
        }
    }

    Ok(0)
}

/// Convert a CLI severity level to a model severity for comparison.
fn severity_from_level(level: SeverityLevel) -> Severity {
    match level {
        SeverityLevel::Low => Severity::Low,
        SeverityLevel::Medium => Severity::Medium,
        SeverityLevel::High => Severity::High,
        SeverityLevel::Critical => Severity::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_level() {
        assert_eq!(severity_from_level(SeverityLevel::Low), Severity::Low);
        assert_eq!(
            severity_from_level(SeverityLevel::Critical),
            Severity::Critical
        );
    }
}
