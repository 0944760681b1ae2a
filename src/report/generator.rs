//! Markdown report generation.
//!
//! This module generates Markdown audit reports from the analysis
//! results.

use crate::analysis::{count_kinds, most_affected_transcripts};
use crate::models::{
    Finding, FindingSummary, Report, ReportMetadata, Sentiment, Severity, TranscriptAnalysis,
};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Callscope Report\n\n");

    // Metadata section
    output.push_str(&generate_metadata_section(&report.metadata));

    // Table of contents
    output.push_str(&generate_table_of_contents(report));

    // Summary section
    output.push_str(&generate_summary_section(report));

    // Findings by transcript
    output.push_str(&generate_findings_section(&report.transcripts));

    // Recommendations
    output.push_str(&generate_recommendations_section(&report.recommendations));

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Transcripts Analyzed:** {}\n",
        metadata.transcripts_analyzed
    ));
    section.push_str(&format!("- **Total Turns:** {}\n", metadata.total_turns));
    section.push_str(&format!(
        "- **Total Disclosures:** {}\n",
        metadata.total_findings
    ));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &Report) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Summary](#summary)\n");
    toc.push_str("- [Findings by Transcript](#findings-by-transcript)\n");

    // Add links to each transcript with findings
    for transcript in &report.transcripts {
        if !transcript.findings.is_empty() {
            let anchor = anchor_for(&transcript.source);
            toc.push_str(&format!("  - [{}](#{})\n", transcript.source, anchor));
        }
    }

    if !report.recommendations.is_empty() {
        toc.push_str("- [Recommendations](#recommendations)\n");
    }

    toc.push('\n');

    toc
}

fn anchor_for(source: &str) -> String {
    source.replace(['/', '.', ' '], "-").to_lowercase()
}

/// Generate the summary section.
fn generate_summary_section(report: &Report) -> String {
    let summary = &report.summary;
    let mut section = String::new();

    section.push_str("## Summary\n\n");

    // Severity breakdown
    section.push_str("### Disclosure Severity Breakdown\n\n");
    section.push_str(&format!(
        "| {} Critical | {} High | {} Medium | {} Low | **Total** |\n",
        Severity::Critical.emoji(),
        Severity::High.emoji(),
        Severity::Medium.emoji(),
        Severity::Low.emoji(),
    ));
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | **{}** |\n\n",
        summary.critical, summary.high, summary.medium, summary.low, summary.total
    ));

    // Disclosure kind breakdown with shares (the pie chart, as a table)
    let all_findings: Vec<Finding> = report
        .transcripts
        .iter()
        .flat_map(|t| t.findings.clone())
        .collect();
    let kind_counts = count_kinds(&all_findings);
    if !kind_counts.is_empty() {
        section.push_str("### Disclosures by Kind\n\n");
        section.push_str("| Kind | Count | Share |\n");
        section.push_str("|:---|:---:|:---:|\n");

        let total = all_findings.len() as f64;
        let mut sorted = kind_counts;
        sorted.sort_by_key(|(_, count)| std::cmp::Reverse(*count));

        for (kind, count) in sorted {
            section.push_str(&format!(
                "| {} | {} | {:.1}% |\n",
                kind,
                count,
                count as f64 / total * 100.0
            ));
        }
        section.push('\n');
    }

    // Persuasive phrases across all transcripts
    let phrase_counts = merged_phrase_counts(&report.transcripts);
    if !phrase_counts.is_empty() {
        section.push_str("### Persuasive Phrases\n\n");
        section.push_str("| Phrase | Frequency |\n");
        section.push_str("|:---|:---:|\n");

        for (phrase, count) in phrase_counts {
            section.push_str(&format!("| {} | {} |\n", phrase, count));
        }
        section.push('\n');
    }

    // Top scammer words
    let word_counts = merged_word_counts(&report.transcripts);
    if !word_counts.is_empty() {
        section.push_str("### Most Common Scammer Words\n\n");
        section.push_str("| Word | Count |\n");
        section.push_str("|:---|:---:|\n");

        for (word, count) in word_counts {
            section.push_str(&format!("| {} | {} |\n", word, count));
        }
        section.push('\n');
    }

    // Most affected transcripts
    if report.transcripts.len() > 1 {
        let affected = most_affected_transcripts(&report.transcripts, 5);
        if !affected.is_empty() {
            section.push_str("### Most Affected Transcripts\n\n");
            section.push_str("| Transcript | Disclosures |\n");
            section.push_str("|:---|:---:|\n");

            for (transcript, count) in affected {
                section.push_str(&format!("| `{}` | {} |\n", transcript.source, count));
            }
            section.push('\n');
        }
    }

    section
}

/// Phrase frequencies summed across transcripts, descending.
fn merged_phrase_counts(transcripts: &[TranscriptAnalysis]) -> Vec<(String, usize)> {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for transcript in transcripts {
        for (phrase, count) in &transcript.phrase_counts {
            *counts.entry(phrase.clone()).or_default() += count;
        }
    }

    let mut merged: Vec<_> = counts.into_iter().collect();
    merged.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    merged
}

/// Scammer word frequencies summed across transcripts, descending.
fn merged_word_counts(transcripts: &[TranscriptAnalysis]) -> Vec<(String, usize)> {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut cap = 0usize;

    for transcript in transcripts {
        cap = cap.max(transcript.top_scammer_words.len());
        for (word, count) in &transcript.top_scammer_words {
            *counts.entry(word.clone()).or_default() += count;
        }
    }

    let mut merged: Vec<_> = counts.into_iter().collect();
    merged.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    merged.truncate(cap);
    merged
}

/// Generate the findings section.
fn generate_findings_section(transcripts: &[TranscriptAnalysis]) -> String {
    let mut section = String::new();

    section.push_str("## Findings by Transcript\n\n");

    // Filter transcripts with findings
    let with_findings: Vec<_> = transcripts.iter().filter(|t| !t.findings.is_empty()).collect();

    if with_findings.is_empty() {
        section.push_str("No sensitive-information disclosures were found. 🎉\n\n");
        return section;
    }

    for transcript in with_findings {
        section.push_str(&generate_transcript_section(transcript));
    }

    section
}

/// Generate the findings section for a single transcript.
fn generate_transcript_section(transcript: &TranscriptAnalysis) -> String {
    let mut section = String::new();

    let anchor = anchor_for(&transcript.source);
    section.push_str(&format!("### {} {{#{}}}\n\n", transcript.source, anchor));

    // Transcript info
    section.push_str(&format!(
        "*Turns: {} ({} victim, {} scammer) | Disclosures: {}*\n\n",
        transcript.turn_count,
        transcript.victim_turns,
        transcript.scammer_turns,
        transcript.findings.len()
    ));

    // Sort findings by severity then by turn order
    let mut findings = transcript.findings.clone();
    findings.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.turn_index.cmp(&b.turn_index))
    });

    for finding in &findings {
        let sentiment = transcript
            .turns
            .iter()
            .find(|t| t.turn_index == finding.turn_index)
            .map(|t| t.sentiment);
        section.push_str(&generate_finding_block(finding, sentiment));
    }

    section
}

/// Generate a single finding block.
fn generate_finding_block(finding: &Finding, sentiment: Option<Sentiment>) -> String {
    let mut block = String::new();

    // Finding header with severity badge
    let severity_badge = match finding.severity {
        Severity::Critical => "🔴 **CRITICAL**",
        Severity::High => "🟠 **HIGH**",
        Severity::Medium => "🟡 **MEDIUM**",
        Severity::Low => "🟢 **LOW**",
    };

    block.push_str(&format!("#### {} {}\n\n", severity_badge, finding.kind));

    // Turn reference
    block.push_str(&format!(
        "**Turn:** {} ({}) | **Matched keyword:** `{}`\n\n",
        finding.turn_index, finding.speaker, finding.matched_keyword
    ));

    // Excerpt
    if !finding.excerpt.is_empty() {
        block.push_str(&format!("> {}\n\n", finding.excerpt));
    }

    // Turn sentiment
    if let Some(sentiment) = sentiment {
        block.push_str(&format!(
            "*Turn sentiment: polarity {:.2}, subjectivity {:.2}*\n\n",
            sentiment.polarity, sentiment.subjectivity
        ));
    }

    block.push_str("---\n\n");

    block
}

/// Generate the recommendations section.
fn generate_recommendations_section(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Recommendations\n\n");

    for (i, rec) in recommendations.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, rec));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by Callscope*\n");

    footer
}

/// Default recommendations attached to every report.
pub fn default_recommendations(summary: &FindingSummary) -> Vec<String> {
    let mut recommendations = vec![
        "Review each disclosure and notify the affected account holders.".to_string(),
        "Prioritize credential and payment-card disclosures for immediate remediation."
            .to_string(),
    ];

    if summary.critical > 0 {
        recommendations.push(
            "Critical disclosures found: rotate credentials and block affected cards."
                .to_string(),
        );
    }

    recommendations
}

/// Write the report to a file.
#[allow(dead_code)] // Alternative to writing the rendered string directly
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let content = generate_markdown_report(report);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write a JSON report to a file.
#[allow(dead_code)] // Convenience wrapper
pub fn write_json_report(report: &Report, path: &Path) -> Result<()> {
    let content = generate_json_report(report)?;

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::config::AnalysisConfig;
    use crate::models::DisclosureKind;
    use crate::transcript;
    use chrono::Utc;

    fn create_test_report() -> Report {
        let analysis = Analyzer::from_config(&AnalysisConfig::default())
            .unwrap()
            .analyze(&transcript::sample());

        let findings: Vec<Finding> = analysis.findings.clone();
        let summary = FindingSummary::from_findings(&findings);

        Report {
            metadata: ReportMetadata {
                source: "sample".to_string(),
                analysis_date: Utc::now(),
                transcripts_analyzed: 1,
                total_turns: analysis.turn_count,
                total_findings: findings.len(),
                duration_seconds: 0.1,
            },
            transcripts: vec![analysis],
            summary: summary.clone(),
            recommendations: default_recommendations(&summary),
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Callscope Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("## Findings by Transcript"));
        assert!(markdown.contains("login credentials"));
        assert!(markdown.contains("### Persuasive Phrases"));
        assert!(markdown.contains("please confirm"));
    }

    #[test]
    fn test_markdown_report_shares_sum_to_percentages() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        // 6 findings, one per kind: each kind holds a 16.7% share.
        assert!(markdown.contains("16.7%"));
    }

    #[test]
    fn test_generate_finding_block() {
        let finding = Finding {
            transcript: "sample".to_string(),
            turn_index: 9,
            speaker: "victim".to_string(),
            severity: Severity::Critical,
            kind: DisclosureKind::LoginCredentials,
            matched_keyword: "password".to_string(),
            excerpt: "My username is johndoe80 and my password is hunter2.".to_string(),
        };

        let block = generate_finding_block(&finding, Some(Sentiment::default()));

        assert!(block.contains("CRITICAL"));
        assert!(block.contains("login credentials"));
        assert!(block.contains("`password`"));
        assert!(block.contains("**Turn:** 9 (victim)"));
        assert!(block.contains("johndoe80"));
    }

    #[test]
    fn test_no_findings_message() {
        let mut report = create_test_report();
        report.transcripts[0].findings.clear();

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("No sensitive-information disclosures were found."));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"source\""));
        assert!(json.contains("\"transcripts\""));
        assert!(json.contains("\"findings\""));
        assert!(json.contains("\"polarity\""));
    }

    #[test]
    fn test_write_report() {
        let report = create_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_report(&report, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# Callscope Report"));
    }
}
