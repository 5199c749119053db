//! Query parameters shared by record sources.

use crate::utils::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Billing period, start inclusive and end exclusive (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Create a validated date range
    ///
    /// # Errors
    /// * `ConfigError::InvalidField` - a date does not parse or start is not before end
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self, ConfigError> {
        let start = start.into();
        let end = end.into();

        let start_date = parse_date("startDate", &start)?;
        let end_date = parse_date("endDate", &end)?;

        if start_date >= end_date {
            return Err(ConfigError::InvalidField {
                field: "endDate",
                reason: format!("{} is not after startDate {}", end, start),
            });
        }

        Ok(Self { start, end })
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ConfigError::InvalidField {
        field,
        reason: format!("`{}` is not a YYYY-MM-DD date: {}", value, e),
    })
}

/// Cost Explorer dimension used for the category tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryDimension {
    /// AWS service, e.g. "Amazon Elastic Compute Cloud - Compute"
    #[default]
    Service,

    /// Usage type, e.g. "USE1-BoxUsage:t3.medium"
    UsageType,
}

impl CategoryDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryDimension::Service => "SERVICE",
            CategoryDimension::UsageType => "USAGE_TYPE",
        }
    }
}
