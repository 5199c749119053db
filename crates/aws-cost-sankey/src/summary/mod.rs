//! LLM summarization of the text projection.

pub mod openai;

// Re-export main types
pub use openai::OpenAiSummarizer;

use crate::utils::error::SummaryError;

/// Produces a natural-language analysis of a cost dump
pub trait TextSummarizer {
    fn summarize(&self, text: &str) -> Result<String, SummaryError>;
}
