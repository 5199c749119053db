//! Record sources feeding the aggregator.
//!
//! A source returns one account's grouped cost entries for a period.
//! The live implementation queries AWS Cost Explorer; tests plug in
//! fakes through the `RecordSource` trait.

pub mod client;
pub mod types;

// Re-export main types
pub use client::CostExplorerSource;
pub use types::{CategoryDimension, DateRange};

use crate::parser::schema::RawCostGroup;
use crate::settings::Account;
use crate::utils::error::SourceError;

/// Produces grouped cost entries for one account
pub trait RecordSource {
    fn fetch(
        &self,
        account: &Account,
        range: &DateRange,
        dimension: CategoryDimension,
    ) -> Result<Vec<RawCostGroup>, SourceError>;
}
