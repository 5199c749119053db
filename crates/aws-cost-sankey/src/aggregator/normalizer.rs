//! Label normalization, rounding and threshold rules.

use crate::utils::config::{ENVIRONMENT_TAG_PREFIX, UNKNOWN_ENVIRONMENT_SUFFIX};
use log::warn;
use serde::{Deserialize, Serialize};

/// Turn a raw environment tag group key into an environment label
///
/// Cost Explorer reports tag groups as `environment$<value>`, and just
/// `environment$` for untagged resources. Only a value longer than the
/// marker carries a name; anything else (bare marker, empty, or a value
/// without the marker) is attributed to `<account>-unknown` so it stays
/// separated per account.
///
/// Labels with whitespace are kept but cannot be replayed from a text dump,
/// where a parent label is a single token.
pub fn normalize_environment(account: &str, raw_tag: &str) -> String {
    let environment = match raw_tag.strip_prefix(ENVIRONMENT_TAG_PREFIX) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{}{}", account, UNKNOWN_ENVIRONMENT_SUFFIX),
    };

    if environment.chars().any(char::is_whitespace) {
        warn!(
            "Environment `{}` contains whitespace, a text dump of this run cannot be replayed",
            environment
        );
    }

    environment
}

/// How live amounts are rounded before accumulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Round to the nearest whole currency unit (half away from zero)
    #[default]
    Nearest,

    /// Keep the amount as reported
    None,
}

impl RoundingPolicy {
    pub fn apply(self, amount: f64) -> f64 {
        match self {
            RoundingPolicy::Nearest => amount.round(),
            RoundingPolicy::None => amount,
        }
    }
}

/// Whether an edge survives into the rendered view
///
/// Inclusive: an edge exactly at the threshold is kept.
pub fn passes_threshold(amount: f64, threshold: f64) -> bool {
    amount >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_prefix_is_stripped() {
        assert_eq!(normalize_environment("account1", "environment$prod"), "prod");
    }

    #[test]
    fn test_bare_marker_falls_back() {
        assert_eq!(
            normalize_environment("account1", "environment$"),
            "account1-unknown"
        );
        assert_eq!(normalize_environment("account1", ""), "account1-unknown");
    }

    #[test]
    fn test_value_without_marker_falls_back() {
        assert_eq!(
            normalize_environment("account1", "staging"),
            "account1-unknown"
        );
        assert_eq!(
            normalize_environment("account2", "production-east"),
            "account2-unknown"
        );
    }

    #[test]
    fn test_whitespace_label_is_kept() {
        assert_eq!(
            normalize_environment("account1", "environment$my env"),
            "my env"
        );
    }

    #[test]
    fn test_rounding_policy() {
        assert_eq!(RoundingPolicy::Nearest.apply(150.40), 150.0);
        assert_eq!(RoundingPolicy::Nearest.apply(49.60), 50.0);
        assert_eq!(RoundingPolicy::Nearest.apply(2.5), 3.0);
        assert_eq!(RoundingPolicy::None.apply(49.60), 49.60);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(passes_threshold(100.0, 100.0));
        assert!(!passes_threshold(99.99, 100.0));
        assert!(passes_threshold(0.0, 0.0));
    }
}
