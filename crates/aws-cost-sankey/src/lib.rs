//! AWS Cost Sankey library
//!
//! Fetches AWS billing data, aggregates it into an
//! `all -> account -> environment -> service` graph and renders it as a
//! text edge list or an interactive Sankey chart.
//!
//! This exposes the internal modules for the CLI and for testing

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod sankey;
pub mod settings;
pub mod source;
pub mod summary;
pub mod utils;
