//! Call transcript parsing.
//!
//! Transcripts are plain text with one turn per line in the form
//! `speaker: message`. Blank lines and lines without a separator are
//! skipped; the speaker tag is lowercased so role matching is
//! case-insensitive.

use std::path::Path;
use thiserror::Error;

/// Errors produced while parsing a transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transcript {path} contains no `speaker: message` lines")]
    Empty { path: String },
}

/// A single speaker turn in a call transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// 0-based position among parsed turns.
    pub index: usize,
    /// Lowercased, trimmed speaker tag.
    pub speaker: String,
    /// Trimmed message text.
    pub message: String,
}

/// A parsed transcript.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Source name (file path or "sample").
    pub source: String,
    /// Turns in call order.
    pub turns: Vec<Turn>,
}

impl Transcript {
    /// Returns the turns spoken by the given (lowercased) speaker tag.
    #[allow(dead_code)] // Utility for filtering
    pub fn turns_by<'a>(&'a self, speaker: &'a str) -> impl Iterator<Item = &'a Turn> + 'a {
        self.turns.iter().filter(move |t| t.speaker == speaker)
    }
}

/// The bank-fraud demo call, for `--sample` runs.
pub const SAMPLE_TRANSCRIPT: &str = "\
scammer: Hello, this is the fraud prevention department from your bank.
victim: Hi, I'm a bit confused. What's going on with my account?
scammer: We have detected unusual activity. To verify your identity, please confirm your full name, account number, and address.
victim: My name is John Doe, my account number is 123456789, and my address is 123 Maple Street, Springfield.
scammer: Thank you, John. For further verification, we need your date of birth and social security number.
victim: Sure, my date of birth is 01/01/1980 and my social security number is 123-45-6789.
scammer: To secure your account, please also provide your credit card details including the card number, expiry date, and CVV.
victim: Alright, my credit card number is 4111111111111111, it expires on 12/25, and the CVV is 123.
scammer: Lastly, to reset your online banking session, please confirm your login credentials including your username and password.
victim: My username is johndoe80 and my password is securePass!2025.
scammer: Thank you, John. We are securing your account now.
";

/// Parse a transcript from a string.
///
/// Lines without a `:` separator carry no speaker attribution and are
/// skipped. A message may itself contain `:`; only the first one splits.
pub fn parse_str(source: &str, text: &str) -> Transcript {
    let mut turns = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((speaker, message)) = line.split_once(':') {
            let speaker = speaker.trim().to_lowercase();
            let message = message.trim().to_string();
            if speaker.is_empty() {
                continue;
            }

            turns.push(Turn {
                index: turns.len(),
                speaker,
                message,
            });
        }
    }

    Transcript {
        source: source.to_string(),
        turns,
    }
}

/// Parse a transcript from a file, failing when it yields no turns.
pub fn parse_file(path: &Path) -> Result<Transcript, TranscriptError> {
    let display = path.display().to_string();

    let text = std::fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: display.clone(),
        source,
    })?;

    let transcript = parse_str(&display, &text);
    if transcript.turns.is_empty() {
        return Err(TranscriptError::Empty { path: display });
    }

    Ok(transcript)
}

/// Parse the embedded sample transcript.
pub fn sample() -> Transcript {
    parse_str("sample", SAMPLE_TRANSCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic() {
        let transcript = parse_str("t", "scammer: Hello.\nvictim: Hi there.\n");

        assert_eq!(transcript.turns.len(), 2);
        assert_eq!(transcript.turns[0].speaker, "scammer");
        assert_eq!(transcript.turns[0].message, "Hello.");
        assert_eq!(transcript.turns[1].index, 1);
        assert_eq!(transcript.turns[1].speaker, "victim");
    }

    #[test]
    fn test_parse_skips_blank_and_unattributed_lines() {
        let transcript = parse_str("t", "\n\nscammer: Hello.\n(line noise)\n\nvictim: Hi.\n");

        assert_eq!(transcript.turns.len(), 2);
        assert_eq!(transcript.turns[1].index, 1);
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let transcript = parse_str("t", "victim: my password is a:b:c");

        assert_eq!(transcript.turns.len(), 1);
        assert_eq!(transcript.turns[0].message, "my password is a:b:c");
    }

    #[test]
    fn test_parse_lowercases_speaker() {
        let transcript = parse_str("t", "Scammer: Hello.\nVICTIM: Hi.");

        assert_eq!(transcript.turns[0].speaker, "scammer");
        assert_eq!(transcript.turns[1].speaker, "victim");
    }

    #[test]
    fn test_parse_crlf_matches_lf() {
        let lf = parse_str("t", "scammer: Hello.\nvictim: Hi.\n");
        let crlf = parse_str("t", "scammer: Hello.\r\nvictim: Hi.\r\n");

        assert_eq!(lf.turns, crlf.turns);
    }

    #[test]
    fn test_sample_transcript_shape() {
        let transcript = sample();

        assert_eq!(transcript.turns.len(), 11);
        assert_eq!(transcript.turns_by("scammer").count(), 6);
        assert_eq!(transcript.turns_by("victim").count(), 5);
    }

    #[test]
    fn test_parse_file_empty_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "no separator on this line").unwrap();

        let err = parse_file(file.path()).unwrap_err();
        assert!(matches!(err, TranscriptError::Empty { .. }));
    }

    #[test]
    fn test_parse_file_reads_turns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scammer: Hello.").unwrap();
        writeln!(file, "victim: Hi.").unwrap();

        let transcript = parse_file(file.path()).unwrap();
        assert_eq!(transcript.turns.len(), 2);
    }
}
