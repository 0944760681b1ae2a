//! Transcript analysis.
//!
//! Wires the lexicons, sentiment scorer, and aggregation helpers into a
//! per-transcript pass producing findings and turn-level statistics.

pub mod aggregator;
pub mod lexicon;
pub mod sentiment;

pub use aggregator::*;

use crate::config::AnalysisConfig;
use crate::models::{Finding, Role, TranscriptAnalysis, TurnAnalysis};
use crate::transcript::Transcript;
use anyhow::{bail, Result};
use lexicon::{DisclosureLexicon, PhraseLexicon};
use tracing::debug;

/// Longest excerpt carried into a finding.
const MAX_EXCERPT_CHARS: usize = 120;

/// Configured transcript analyzer.
#[derive(Debug, Clone)]
pub struct Analyzer {
    disclosures: DisclosureLexicon,
    phrases: PhraseLexicon,
    victim_speaker: String,
    scammer_speaker: String,
    top_words: usize,
}

impl Analyzer {
    /// Build an analyzer from configuration, validating lexicon
    /// extensions.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let mut disclosures = DisclosureLexicon::builtin();

        for (slug, keywords) in &config.extra_keywords {
            match crate::models::DisclosureKind::from_slug(slug) {
                Some(kind) => disclosures.extend_kind(kind, keywords),
                None => bail!(
                    "unknown disclosure kind '{}' in [analysis.extra_keywords] (valid kinds: {})",
                    slug,
                    crate::models::DisclosureKind::ALL
                        .iter()
                        .map(|k| k.slug())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        }

        let mut phrases = PhraseLexicon::builtin();
        phrases.extend(&config.extra_phrases);

        Ok(Self {
            disclosures,
            phrases,
            victim_speaker: config.victim_speaker.to_lowercase(),
            scammer_speaker: config.scammer_speaker.to_lowercase(),
            top_words: config.top_words,
        })
    }

    /// Role played by a (lowercased) speaker tag.
    fn role_of(&self, speaker: &str) -> Role {
        if speaker == self.victim_speaker {
            Role::Victim
        } else if speaker == self.scammer_speaker {
            Role::Scammer
        } else {
            Role::Other
        }
    }

    /// Run the full analysis pass over one transcript.
    pub fn analyze(&self, transcript: &Transcript) -> TranscriptAnalysis {
        let mut turns = Vec::with_capacity(transcript.turns.len());
        let mut findings = Vec::new();

        for turn in &transcript.turns {
            let role = self.role_of(&turn.speaker);

            let disclosures = if role == Role::Victim {
                self.disclosures.detect(&turn.message)
            } else {
                Vec::new()
            };

            let phrases = if role == Role::Scammer {
                self.phrases.detect(&turn.message)
            } else {
                Vec::new()
            };

            for (kind, keyword) in &disclosures {
                findings.push(Finding {
                    transcript: transcript.source.clone(),
                    turn_index: turn.index,
                    speaker: turn.speaker.clone(),
                    severity: kind.severity(),
                    kind: *kind,
                    matched_keyword: keyword.clone(),
                    excerpt: excerpt(&turn.message),
                });
            }

            turns.push(TurnAnalysis {
                turn_index: turn.index,
                speaker: turn.speaker.clone(),
                role,
                word_count: word_count(&turn.message),
                disclosures: disclosures.into_iter().map(|(kind, _)| kind).collect(),
                phrases,
                sentiment: sentiment::score(&turn.message),
            });
        }

        let scammer_messages: Vec<&str> = transcript
            .turns
            .iter()
            .filter(|t| self.role_of(&t.speaker) == Role::Scammer)
            .map(|t| t.message.as_str())
            .collect();

        let scammer_turns: Vec<TurnAnalysis> = turns
            .iter()
            .filter(|t| t.role == Role::Scammer)
            .cloned()
            .collect();

        debug!(
            "analyzed {}: {} turns, {} findings",
            transcript.source,
            turns.len(),
            findings.len()
        );

        TranscriptAnalysis {
            source: transcript.source.clone(),
            turn_count: turns.len(),
            victim_turns: turns.iter().filter(|t| t.role == Role::Victim).count(),
            scammer_turns: turns.iter().filter(|t| t.role == Role::Scammer).count(),
            findings,
            turns,
            top_scammer_words: top_words(scammer_messages.into_iter(), self.top_words),
            phrase_counts: count_phrases(&scammer_turns),
        }
    }
}

/// Shorten a message for inclusion in a finding.
fn excerpt(message: &str) -> String {
    if message.chars().count() <= MAX_EXCERPT_CHARS {
        message.to_string()
    } else {
        let mut cut: String = message.chars().take(MAX_EXCERPT_CHARS).collect();
        cut.push('…');
        cut
    }
}
