//! Data models for the call auditor.
//!
//! This module contains all the core data structures used throughout
//! the application for representing transcript turns, disclosure
//! findings, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a disclosure finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity - contact details with limited abuse potential
    Low,
    /// Medium severity - identifying details useful for impersonation
    Medium,
    /// High severity - account details enabling financial access
    High,
    /// Critical severity - credentials and identifiers enabling takeover
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

impl Severity {
    /// Returns an emoji representation of the severity.
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Low => "🟢",
            Severity::Medium => "🟡",
            Severity::High => "🟠",
            Severity::Critical => "🔴",
        }
    }
}

/// Kind of sensitive information disclosed in a victim turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureKind {
    BankAccount,
    CreditCard,
    LoginCredentials,
    PersonalIdentification,
    Address,
    PhoneNumber,
    Email,
    DateOfBirth,
}

impl DisclosureKind {
    /// All kinds, in taxonomy order.
    pub const ALL: [DisclosureKind; 8] = [
        DisclosureKind::BankAccount,
        DisclosureKind::CreditCard,
        DisclosureKind::LoginCredentials,
        DisclosureKind::PersonalIdentification,
        DisclosureKind::Address,
        DisclosureKind::PhoneNumber,
        DisclosureKind::Email,
        DisclosureKind::DateOfBirth,
    ];

    /// Stable key used in config files and chart labels.
    pub fn slug(&self) -> &'static str {
        match self {
            DisclosureKind::BankAccount => "bank_account",
            DisclosureKind::CreditCard => "credit_card",
            DisclosureKind::LoginCredentials => "login_credentials",
            DisclosureKind::PersonalIdentification => "personal_identification",
            DisclosureKind::Address => "address",
            DisclosureKind::PhoneNumber => "phone_number",
            DisclosureKind::Email => "email",
            DisclosureKind::DateOfBirth => "date_of_birth",
        }
    }

    /// How damaging a disclosure of this kind is.
    pub fn severity(&self) -> Severity {
        match self {
            DisclosureKind::LoginCredentials
            | DisclosureKind::CreditCard
            | DisclosureKind::PersonalIdentification => Severity::Critical,
            DisclosureKind::BankAccount => Severity::High,
            DisclosureKind::DateOfBirth | DisclosureKind::Address => Severity::Medium,
            DisclosureKind::PhoneNumber | DisclosureKind::Email => Severity::Low,
        }
    }

    /// Parse a config-file key into a kind.
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.slug() == s)
    }
}

impl fmt::Display for DisclosureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisclosureKind::BankAccount => write!(f, "bank account"),
            DisclosureKind::CreditCard => write!(f, "credit card"),
            DisclosureKind::LoginCredentials => write!(f, "login credentials"),
            DisclosureKind::PersonalIdentification => write!(f, "personal identification"),
            DisclosureKind::Address => write!(f, "address"),
            DisclosureKind::PhoneNumber => write!(f, "phone number"),
            DisclosureKind::Email => write!(f, "email"),
            DisclosureKind::DateOfBirth => write!(f, "date of birth"),
        }
    }
}

/// Sentiment scores for a single turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Polarity in [-1.0, 1.0]; negative values mean negative tone.
    pub polarity: f64,
    /// Subjectivity in [0.0, 1.0]; 0.0 is fully objective.
    pub subjectivity: f64,
}

/// Role a speaker plays in the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Scammer,
    Victim,
    Other,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Scammer => write!(f, "scammer"),
            Role::Victim => write!(f, "victim"),
            Role::Other => write!(f, "other"),
        }
    }
}

/// Represents a single disclosure found during transcript analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Source transcript the finding belongs to.
    pub transcript: String,
    /// 0-based index of the turn within the transcript.
    pub turn_index: usize,
    /// Speaker tag of the turn (as written in the transcript).
    pub speaker: String,
    /// Severity of the disclosure.
    pub severity: Severity,
    /// Kind of sensitive information disclosed.
    pub kind: DisclosureKind,
    /// The keyword that triggered the match.
    pub matched_keyword: String,
    /// Excerpt of the turn's message.
    pub excerpt: String,
}

/// Per-turn analysis results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnAnalysis {
    /// 0-based index of the turn.
    pub turn_index: usize,
    /// Speaker tag of the turn.
    pub speaker: String,
    /// Role the speaker plays.
    pub role: Role,
    /// Number of words in the message.
    pub word_count: usize,
    /// Kinds of sensitive information disclosed in this turn.
    pub disclosures: Vec<DisclosureKind>,
    /// Persuasive phrases found in this turn.
    pub phrases: Vec<String>,
    /// Sentiment scores for the message.
    pub sentiment: Sentiment,
}

/// Represents a fully analyzed transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptAnalysis {
    /// Source name (file path or "sample").
    pub source: String,
    /// Total number of parsed turns.
    pub turn_count: usize,
    /// Number of victim turns.
    pub victim_turns: usize,
    /// Number of scammer turns.
    pub scammer_turns: usize,
    /// Disclosure findings, in turn order.
    pub findings: Vec<Finding>,
    /// Per-turn analysis, in turn order.
    pub turns: Vec<TurnAnalysis>,
    /// Most frequent words across scammer turns, descending.
    pub top_scammer_words: Vec<(String, usize)>,
    /// Persuasive phrase frequencies across scammer turns, descending.
    pub phrase_counts: Vec<(String, usize)>,
}

impl TranscriptAnalysis {
    /// Returns the number of findings at the given severity.
    #[allow(dead_code)] // Utility for filtering
    pub fn finding_count_by_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Summary of disclosures found during analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingSummary {
    /// Total number of findings.
    pub total: usize,
    /// Number of critical findings.
    pub critical: usize,
    /// Number of high severity findings.
    pub high: usize,
    /// Number of medium severity findings.
    pub medium: usize,
    /// Number of low severity findings.
    pub low: usize,
    /// Findings grouped by disclosure kind.
    pub by_kind: std::collections::HashMap<String, usize>,
}

impl FindingSummary {
    /// Creates a summary from a list of findings.
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self {
            total: findings.len(),
            ..Self::default()
        };

        for finding in findings {
            match finding.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }

            *summary
                .by_kind
                .entry(finding.kind.to_string())
                .or_insert(0) += 1;
        }

        summary
    }
}

/// Metadata about the audit report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input the analysis ran over (path, directory, or "sample").
    pub source: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Number of transcripts analyzed.
    pub transcripts_analyzed: usize,
    /// Total number of turns across all transcripts.
    pub total_turns: usize,
    /// Total number of disclosure findings.
    pub total_findings: usize,
    /// Duration of the analysis in seconds.
    pub duration_seconds: f64,
}

/// The complete transcript audit report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Analyzed transcripts.
    pub transcripts: Vec<TranscriptAnalysis>,
    /// Summary statistics of the findings.
    pub summary: FindingSummary,
    /// High-level recommendations.
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(severity: Severity, kind: DisclosureKind) -> Finding {
        Finding {
            transcript: "sample".to_string(),
            turn_index: 0,
            speaker: "victim".to_string(),
            severity,
            kind,
            matched_keyword: "password".to_string(),
            excerpt: "my password is hunter2".to_string(),
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_emoji() {
        assert_eq!(Severity::Critical.emoji(), "🔴");
        assert_eq!(Severity::High.emoji(), "🟠");
        assert_eq!(Severity::Medium.emoji(), "🟡");
        assert_eq!(Severity::Low.emoji(), "🟢");
    }

    #[test]
    fn test_kind_slug_roundtrip() {
        for kind in DisclosureKind::ALL {
            assert_eq!(DisclosureKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(DisclosureKind::from_slug("nonsense"), None);
    }

    #[test]
    fn test_kind_severity_mapping() {
        assert_eq!(
            DisclosureKind::LoginCredentials.severity(),
            Severity::Critical
        );
        assert_eq!(DisclosureKind::BankAccount.severity(), Severity::High);
        assert_eq!(DisclosureKind::Address.severity(), Severity::Medium);
        assert_eq!(DisclosureKind::Email.severity(), Severity::Low);
    }

    #[test]
    fn test_finding_summary() {
        let findings = vec![
            make_finding(Severity::Critical, DisclosureKind::LoginCredentials),
            make_finding(Severity::Critical, DisclosureKind::CreditCard),
            make_finding(Severity::High, DisclosureKind::BankAccount),
            make_finding(Severity::Low, DisclosureKind::Email),
        ];

        let summary = FindingSummary::from_findings(&findings);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.critical, 2);
        assert_eq!(summary.high, 1);
        assert_eq!(summary.medium, 0);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.by_kind.get("login credentials"), Some(&1));
        assert_eq!(summary.by_kind.get("bank account"), Some(&1));
    }
}
