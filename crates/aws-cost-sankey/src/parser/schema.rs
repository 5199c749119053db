//! Record types flowing from the sources into the aggregator.

use crate::utils::error::ParseError;
use serde::{Deserialize, Serialize};

/// One raw observation before aggregation
///
/// `source` and `target` are plain labels; which tier they belong to
/// (root, account, environment, category) is a convention of the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub source: String,
    pub target: String,
    pub amount: f64,
}

impl CostRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, amount: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            amount,
        }
    }
}

/// A grouped cost entry as returned by the billing API
///
/// The amount is kept as the decimal string the API sent; it is parsed
/// during ingestion so a malformed value aborts the whole source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCostGroup {
    /// Tag group key, e.g. "environment$prod" or "environment$"
    pub environment_tag_raw: String,

    /// Service or usage type name
    pub category: String,

    /// Decimal amount as sent by the API
    pub amount: String,
}

impl RawCostGroup {
    pub fn new(
        environment_tag_raw: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            environment_tag_raw: environment_tag_raw.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }
}

/// Parse a decimal amount string
///
/// Non-finite values are rejected since they would poison every sum
/// they flow into.
pub fn parse_amount(value: &str) -> Result<f64, ParseError> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| ParseError::InvalidAmount {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

    if !amount.is_finite() {
        return Err(ParseError::InvalidAmount {
            value: value.to_string(),
            reason: "amount is not a finite number".to_string(),
        });
    }

    Ok(amount)
}
