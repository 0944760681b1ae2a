//! Finding aggregation and statistics.
//!
//! This module provides utilities for aggregating findings from multiple
//! transcripts and computing the frequency counts behind the report
//! tables and charts.

use crate::models::{DisclosureKind, Finding, FindingSummary, Role, Severity, TranscriptAnalysis, TurnAnalysis};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"\w+").unwrap())
}

/// Count words in a message (maximal alphanumeric/underscore runs).
pub fn word_count(text: &str) -> usize {
    word_re().find_iter(text).count()
}

/// Most frequent words across a set of messages, descending.
///
/// Words are lowercased; ties break by first appearance.
pub fn top_words<'a>(messages: impl Iterator<Item = &'a str>, n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_rank = 0usize;

    for message in messages {
        for word in word_re().find_iter(&message.to_lowercase()) {
            let entry = counts.entry(word.as_str().to_string()).or_insert_with(|| {
                let rank = next_rank;
                next_rank += 1;
                (0, rank)
            });
            entry.0 += 1;
        }
    }

    let mut words: Vec<_> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    words.truncate(n);

    words.into_iter().map(|(w, (count, _))| (w, count)).collect()
}

/// Disclosure counts per kind across all findings, in taxonomy order.
///
/// Kinds with zero findings are omitted.
pub fn count_kinds(findings: &[Finding]) -> Vec<(DisclosureKind, usize)> {
    DisclosureKind::ALL
        .iter()
        .filter_map(|kind| {
            let count = findings.iter().filter(|f| f.kind == *kind).count();
            (count > 0).then_some((*kind, count))
        })
        .collect()
}

/// Persuasive phrase frequencies across turns, descending.
pub fn count_phrases(turns: &[TurnAnalysis]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for turn in turns {
        for phrase in &turn.phrases {
            *counts.entry(phrase.clone()).or_default() += 1;
        }
    }

    let mut phrases: Vec<_> = counts.into_iter().collect();
    phrases.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    phrases
}

/// Aggregate all findings from analyzed transcripts.
pub fn aggregate_findings(transcripts: &[TranscriptAnalysis]) -> Vec<Finding> {
    transcripts.iter().flat_map(|t| t.findings.clone()).collect()
}

/// Sort findings by severity (critical first).
#[allow(dead_code)] // Utility for sorting
pub fn sort_findings_by_severity(findings: &mut [Finding]) {
    findings.sort_by(|a, b| b.severity.cmp(&a.severity));
}

/// Group findings by transcript source.
#[allow(dead_code)] // Utility for grouping
pub fn group_by_transcript(findings: &[Finding]) -> HashMap<String, Vec<Finding>> {
    let mut grouped: HashMap<String, Vec<Finding>> = HashMap::new();

    for finding in findings {
        grouped
            .entry(finding.transcript.clone())
            .or_default()
            .push(finding.clone());
    }

    // Sort findings within each transcript by turn order
    for findings in grouped.values_mut() {
        findings.sort_by_key(|f| f.turn_index);
    }

    grouped
}

/// (word count, disclosure count) pairs for victim turns, in turn order.
pub fn disclosure_scatter(turns: &[TurnAnalysis]) -> Vec<(usize, usize)> {
    turns
        .iter()
        .filter(|t| t.role == Role::Victim)
        .map(|t| (t.word_count, t.disclosures.len()))
        .collect()
}

/// Identify the transcripts with the most findings.
pub fn most_affected_transcripts(
    transcripts: &[TranscriptAnalysis],
    n: usize,
) -> Vec<(&TranscriptAnalysis, usize)> {
    let mut affected: Vec<_> = transcripts
        .iter()
        .map(|t| (t, t.findings.len()))
        .filter(|(_, count)| *count > 0)
        .collect();

    affected.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    affected.truncate(n);

    affected
}

/// Generate a text summary of finding statistics.
#[allow(dead_code)] // Utility for text output
pub fn generate_summary_text(summary: &FindingSummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Total Disclosures: {}", summary.total));
    lines.push(format!(
        "- {} Critical: {}",
        Severity::Critical.emoji(),
        summary.critical
    ));
    lines.push(format!(
        "- {} High: {}",
        Severity::High.emoji(),
        summary.high
    ));
    lines.push(format!(
        "- {} Medium: {}",
        Severity::Medium.emoji(),
        summary.medium
    ));
    lines.push(format!("- {} Low: {}", Severity::Low.emoji(), summary.low));

    if !summary.by_kind.is_empty() {
        lines.push(String::new());
        lines.push("By Kind:".to_string());

        let mut kinds: Vec<_> = summary.by_kind.iter().collect();
        kinds.sort_by_key(|(_, count)| std::cmp::Reverse(**count));

        for (kind, count) in kinds {
            lines.push(format!("- {}: {}", kind, count));
        }
    }

    lines.join("\n")
}
