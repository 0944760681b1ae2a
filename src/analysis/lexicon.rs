//! Keyword lexicons for disclosure and persuasion detection.
//!
//! Detection is case-insensitive substring matching: a disclosure kind is
//! reported at most once per turn (the first matching keyword wins), while
//! persuasive phrases are reported individually.

use crate::models::DisclosureKind;

/// Built-in keyword sets per disclosure kind.
const DISCLOSURE_KEYWORDS: [(DisclosureKind, &[&str]); 8] = [
    (
        DisclosureKind::BankAccount,
        &["account number", "routing number", "bank"],
    ),
    (
        DisclosureKind::CreditCard,
        &["credit card", "card number", "cvv", "expiry"],
    ),
    (
        DisclosureKind::LoginCredentials,
        &["password", "username", "login", "pin"],
    ),
    (
        DisclosureKind::PersonalIdentification,
        &["social security", "ssn", "passport", "id"],
    ),
    (
        DisclosureKind::Address,
        &["address", "street", "city", "zip code"],
    ),
    (DisclosureKind::PhoneNumber, &["phone", "mobile"]),
    (DisclosureKind::Email, &["email", "e-mail"]),
    (
        DisclosureKind::DateOfBirth,
        &["date of birth", "dob", "birthdate"],
    ),
];

/// Built-in persuasive phrases seen in pressure scripts.
const PERSUASIVE_PHRASES: &[&str] = &[
    "please confirm",
    "we need",
    "verify",
    "unusual activity",
    "fraud prevention",
    "securing your account",
    "for further verification",
];

/// Keyword table mapping disclosure kinds to their trigger keywords.
#[derive(Debug, Clone)]
pub struct DisclosureLexicon {
    entries: Vec<(DisclosureKind, Vec<String>)>,
}

impl DisclosureLexicon {
    /// The built-in taxonomy.
    pub fn builtin() -> Self {
        Self {
            entries: DISCLOSURE_KEYWORDS
                .iter()
                .map(|(kind, keywords)| {
                    (*kind, keywords.iter().map(|k| k.to_string()).collect())
                })
                .collect(),
        }
    }

    /// Add extra keywords to a kind. Extensions are additive; the
    /// built-in set is never removed. Keywords are lowercased.
    pub fn extend_kind(&mut self, kind: DisclosureKind, keywords: &[String]) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            for keyword in keywords {
                let keyword = keyword.to_lowercase();
                if !keyword.is_empty() && !existing.contains(&keyword) {
                    existing.push(keyword);
                }
            }
        }
    }

    /// Detect disclosure kinds in a message.
    ///
    /// Returns at most one `(kind, matched_keyword)` pair per kind, in
    /// taxonomy order.
    pub fn detect(&self, message: &str) -> Vec<(DisclosureKind, String)> {
        let lowered = message.to_lowercase();
        let mut found = Vec::new();

        for (kind, keywords) in &self.entries {
            if let Some(keyword) = keywords.iter().find(|k| lowered.contains(k.as_str())) {
                found.push((*kind, keyword.clone()));
            }
        }

        found
    }

    /// Returns the keywords configured for a kind.
    #[allow(dead_code)] // Utility accessor
    pub fn keywords(&self, kind: DisclosureKind) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, keywords)| keywords.as_slice())
            .unwrap_or(&[])
    }
}

/// Persuasive phrase list matched against scammer turns.
#[derive(Debug, Clone)]
pub struct PhraseLexicon {
    phrases: Vec<String>,
}

impl PhraseLexicon {
    /// The built-in phrase list.
    pub fn builtin() -> Self {
        Self {
            phrases: PERSUASIVE_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Add extra phrases (additive, lowercased, deduplicated).
    pub fn extend(&mut self, phrases: &[String]) {
        for phrase in phrases {
            let phrase = phrase.to_lowercase();
            if !phrase.is_empty() && !self.phrases.contains(&phrase) {
                self.phrases.push(phrase);
            }
        }
    }

    /// Detect persuasive phrases in a message, in lexicon order.
    pub fn detect(&self, message: &str) -> Vec<String> {
        let lowered = message.to_lowercase();
        self.phrases
            .iter()
            .filter(|p| lowered.contains(p.as_str()))
            .cloned()
            .collect()
    }

    /// Returns the configured phrase list.
    #[allow(dead_code)] // Utility accessor
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_case_insensitive() {
        let lexicon = DisclosureLexicon::builtin();

        let found = lexicon.detect("My PASSWORD is hunter2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, DisclosureKind::LoginCredentials);
        assert_eq!(found[0].1, "password");
    }

    #[test]
    fn test_detect_reports_kind_once() {
        let lexicon = DisclosureLexicon::builtin();

        // Two credential keywords, one finding.
        let found = lexicon.detect("my username and password");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, DisclosureKind::LoginCredentials);
        assert_eq!(found[0].1, "password");
    }

    #[test]
    fn test_detect_multiple_kinds() {
        let lexicon = DisclosureLexicon::builtin();

        let found = lexicon.detect(
            "my account number is 123456789, and my address is 123 Maple Street",
        );
        let kinds: Vec<_> = found.iter().map(|(k, _)| *k).collect();
        assert!(kinds.contains(&DisclosureKind::BankAccount));
        assert!(kinds.contains(&DisclosureKind::Address));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_detect_flags_only_configured_keywords() {
        let lexicon = DisclosureLexicon::builtin();

        assert!(lexicon.detect("lovely weather today").is_empty());
        assert!(lexicon.detect("see you at the staff meeting").is_empty());
    }

    #[test]
    fn test_extend_kind_is_additive() {
        let mut lexicon = DisclosureLexicon::builtin();
        lexicon.extend_kind(DisclosureKind::Email, &["inbox".to_string()]);

        assert!(!lexicon.detect("check your inbox").is_empty());
        // Built-ins survive.
        assert!(!lexicon.detect("my email is a@b.c").is_empty());
    }

    #[test]
    fn test_phrase_detection() {
        let lexicon = PhraseLexicon::builtin();

        let found = lexicon.detect("We have detected unusual activity. Please confirm your name.");
        assert_eq!(
            found,
            vec!["please confirm".to_string(), "unusual activity".to_string()]
        );
    }

    #[test]
    fn test_phrase_extend_deduplicates() {
        let mut lexicon = PhraseLexicon::builtin();
        let before = lexicon.phrases().len();
        lexicon.extend(&["VERIFY".to_string(), "act now".to_string()]);

        assert_eq!(lexicon.phrases().len(), before + 1);
        assert_eq!(lexicon.detect("Act now!"), vec!["act now".to_string()]);
    }
}
