//! Synthetic scam-call dataset generation.
//!
//! Samples randomized and weighted fields per record: a fake name and
//! phone number, a weighted response category, a derived
//! gave-information flag, a uniform call length, and a weighted
//! phishing scenario.

pub mod csv;

use crate::config::GeneratorConfig;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;

/// Errors produced while building a generator from configuration.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid {table} weights: {detail}")]
    InvalidWeights {
        table: &'static str,
        detail: String,
    },

    #[error("invalid call length range: min {min} must be below max {max}")]
    InvalidCallRange { min: f64, max: f64 },
}

/// How the callee responded to the scam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    HungUpImmediately,
    AskedQuestions,
    SharedInformation,
    Skeptical,
    Ignored,
}

impl ResponseKind {
    /// All categories, in sampling order.
    pub const ALL: [ResponseKind; 5] = [
        ResponseKind::HungUpImmediately,
        ResponseKind::AskedQuestions,
        ResponseKind::SharedInformation,
        ResponseKind::Skeptical,
        ResponseKind::Ignored,
    ];

    /// Whether this response means sensitive information was given up.
    pub fn gave_information(&self) -> bool {
        matches!(self, ResponseKind::SharedInformation)
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKind::HungUpImmediately => write!(f, "Hung up immediately"),
            ResponseKind::AskedQuestions => write!(f, "Asked questions but didn't share info"),
            ResponseKind::SharedInformation => write!(f, "Shared sensitive information"),
            ResponseKind::Skeptical => {
                write!(f, "Was skeptical but continued conversation")
            }
            ResponseKind::Ignored => write!(f, "Ignored the call"),
        }
    }
}

/// Phishing scenario the call pretends to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    BankFraud,
    TechSupport,
    IrsTax,
    Prize,
}

impl Scenario {
    /// All categories, in sampling order.
    pub const ALL: [Scenario; 4] = [
        Scenario::BankFraud,
        Scenario::TechSupport,
        Scenario::IrsTax,
        Scenario::Prize,
    ];
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::BankFraud => write!(f, "Bank Fraud"),
            Scenario::TechSupport => write!(f, "Tech Support Scam"),
            Scenario::IrsTax => write!(f, "IRS/Tax Scam"),
            Scenario::Prize => write!(f, "Prize Scam"),
        }
    }
}

/// A single synthetic call record.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub name: String,
    pub phone_number: String,
    pub response: ResponseKind,
    pub call_length_secs: f64,
    pub scenario: Scenario,
}

/// First name pool for fake callees.
const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Karen",
    "Charles", "Sarah", "Christopher", "Lisa", "Daniel", "Nancy", "Matthew", "Sandra", "Anthony",
    "Betty", "Mark", "Ashley", "Donald", "Emily", "Steven", "Kimberly", "Andrew", "Margaret",
    "Paul", "Donna", "Joshua", "Michelle",
];

/// Last name pool for fake callees.
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores",
];

/// Phone number shape; each `#` becomes a random digit.
const PHONE_PATTERN: &str = "(###) ###-####";

/// Configured synthetic call generator.
pub struct CallGenerator {
    rng: StdRng,
    response_dist: WeightedIndex<f64>,
    scenario_dist: WeightedIndex<f64>,
    min_call_secs: f64,
    max_call_secs: f64,
}

impl CallGenerator {
    /// Build a generator from configuration.
    ///
    /// Omitted weight tables sample uniformly. Seeded generation is
    /// deterministic; without a seed the generator seeds from OS
    /// entropy.
    pub fn from_config(
        config: &GeneratorConfig,
        seed: Option<u64>,
    ) -> Result<Self, GeneratorError> {
        if !(config.min_call_secs >= 0.0 && config.min_call_secs < config.max_call_secs) {
            return Err(GeneratorError::InvalidCallRange {
                min: config.min_call_secs,
                max: config.max_call_secs,
            });
        }

        let response_weights = config
            .response_weights
            .map(|w| w.as_array())
            .unwrap_or([1.0; 5]);
        let scenario_weights = config
            .scenario_weights
            .map(|w| w.as_array())
            .unwrap_or([1.0; 4]);

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            rng,
            response_dist: build_dist("response", &response_weights)?,
            scenario_dist: build_dist("scenario", &scenario_weights)?,
            min_call_secs: config.min_call_secs,
            max_call_secs: config.max_call_secs,
        })
    }

    /// Sample the next record.
    pub fn next_record(&mut self) -> CallRecord {
        let name = format!(
            "{} {}",
            pick(&mut self.rng, FIRST_NAMES),
            pick(&mut self.rng, LAST_NAMES)
        );
        let phone_number = numerify(&mut self.rng, PHONE_PATTERN);
        let response = ResponseKind::ALL[self.response_dist.sample(&mut self.rng)];
        let scenario = Scenario::ALL[self.scenario_dist.sample(&mut self.rng)];

        let raw_secs = self
            .rng
            .random_range(self.min_call_secs..=self.max_call_secs);
        let call_length_secs = (raw_secs * 100.0).round() / 100.0;

        CallRecord {
            name,
            phone_number,
            response,
            call_length_secs,
            scenario,
        }
    }

    /// Sample `count` records.
    #[allow(dead_code)] // Utility for batch generation
    pub fn generate(&mut self, count: usize) -> Vec<CallRecord> {
        (0..count).map(|_| self.next_record()).collect()
    }
}

/// Validate weights and build a sampling distribution.
fn build_dist(
    table: &'static str,
    weights: &[f64],
) -> Result<WeightedIndex<f64>, GeneratorError> {
    if let Some(bad) = weights.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
        return Err(GeneratorError::InvalidWeights {
            table,
            detail: format!("weight {} is not a positive finite number", bad),
        });
    }

    WeightedIndex::new(weights.iter().copied()).map_err(|e| GeneratorError::InvalidWeights {
        table,
        detail: e.to_string(),
    })
}

/// Pick a random element from a non-empty pool.
fn pick<'a>(rng: &mut StdRng, pool: &'a [&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

/// Replace each `#` in the pattern with a random digit.
fn numerify(rng: &mut StdRng, pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| {
            if c == '#' {
                char::from_digit(rng.random_range(0..10), 10).unwrap_or('0')
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, ResponseWeights};

    fn seeded(config: &GeneratorConfig) -> CallGenerator {
        CallGenerator::from_config(config, Some(42)).unwrap()
    }

    #[test]
    fn test_generates_requested_row_count() {
        let records = seeded(&GeneratorConfig::default()).generate(250);
        assert_eq!(records.len(), 250);
    }

    #[test]
    fn test_gave_information_matches_response() {
        let records = seeded(&GeneratorConfig::default()).generate(500);

        for record in &records {
            assert_eq!(
                record.response.gave_information(),
                record.response == ResponseKind::SharedInformation
            );
        }
    }

    #[test]
    fn test_call_length_stays_in_range() {
        let config = GeneratorConfig::default();
        let records = seeded(&config).generate(500);

        for record in &records {
            assert!(record.call_length_secs >= config.min_call_secs);
            assert!(record.call_length_secs <= config.max_call_secs);
        }
    }

    #[test]
    fn test_phone_number_shape() {
        let records = seeded(&GeneratorConfig::default()).generate(50);

        for record in &records {
            let phone = &record.phone_number;
            assert_eq!(phone.len(), PHONE_PATTERN.len());
            assert!(phone.starts_with('('));
            assert_eq!(&phone[4..6], ") ");
            assert_eq!(&phone[9..10], "-");
            assert_eq!(phone.chars().filter(|c| c.is_ascii_digit()).count(), 10);
        }
    }

    #[test]
    fn test_name_comes_from_pools() {
        let records = seeded(&GeneratorConfig::default()).generate(50);

        for record in &records {
            let (first, last) = record.name.split_once(' ').unwrap();
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let config = GeneratorConfig::default();
        let a = CallGenerator::from_config(&config, Some(7)).unwrap().generate(20);
        let b = CallGenerator::from_config(&config, Some(7)).unwrap().generate(20);

        assert_eq!(a, b);
    }

    #[test]
    fn test_weighted_frequencies_approximate_weights() {
        let config = GeneratorConfig {
            response_weights: Some(ResponseWeights {
                hung_up_immediately: 8.0,
                asked_questions: 1.0,
                shared_information: 1.0,
                skeptical: 1.0,
                ignored: 1.0,
            }),
            ..GeneratorConfig::default()
        };

        let records = seeded(&config).generate(5000);
        let hung_up = records
            .iter()
            .filter(|r| r.response == ResponseKind::HungUpImmediately)
            .count();

        let observed = hung_up as f64 / records.len() as f64;
        let expected = 8.0 / 12.0;
        assert!(
            (observed - expected).abs() < 0.05,
            "observed {} vs expected {}",
            observed,
            expected
        );
    }

    #[test]
    fn test_uniform_default_covers_all_categories() {
        let records = seeded(&GeneratorConfig::default()).generate(2000);

        for kind in ResponseKind::ALL {
            assert!(records.iter().any(|r| r.response == kind), "{:?} never sampled", kind);
        }
        for scenario in Scenario::ALL {
            assert!(
                records.iter().any(|r| r.scenario == scenario),
                "{:?} never sampled",
                scenario
            );
        }
    }

    #[test]
    fn test_non_positive_weight_is_rejected() {
        let config = GeneratorConfig {
            response_weights: Some(ResponseWeights {
                hung_up_immediately: 0.0,
                asked_questions: 1.0,
                shared_information: 1.0,
                skeptical: 1.0,
                ignored: 1.0,
            }),
            ..GeneratorConfig::default()
        };

        assert!(matches!(
            CallGenerator::from_config(&config, None),
            Err(GeneratorError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_inverted_call_range_is_rejected() {
        let config = GeneratorConfig {
            min_call_secs: 300.0,
            max_call_secs: 5.0,
            ..GeneratorConfig::default()
        };

        assert!(matches!(
            CallGenerator::from_config(&config, None),
            Err(GeneratorError::InvalidCallRange { .. })
        ));
    }

    #[test]
    fn test_numerify_replaces_only_hashes() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = numerify(&mut rng, "(###) ###-####");

        assert_eq!(result.len(), 14);
        assert!(!result.contains('#'));
        assert!(result.starts_with('('));
    }
}
