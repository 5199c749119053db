//! Parser for replayed text dumps.
//!
//! A dump is the text projection of a previous run, one edge per line:
//! `<parent> [<amount>] <child...>`
//!
//! The child label is everything after the amount token, re-joined with
//! single spaces, so service names like "Amazon Simple Storage Service"
//! survive the round trip. The parent is always a single token, so a
//! parent label with spaces fails to parse.

use super::schema::{parse_amount, CostRecord};
use crate::utils::error::ParseError;
use log::debug;

/// Parse a whole dump into records
///
/// **Public** - main entry point for the replay path
///
/// Blank lines are skipped. Any malformed line fails the whole dump; no
/// record is returned in that case.
pub fn parse_replay(input: &str) -> Result<Vec<CostRecord>, ParseError> {
    let mut records = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if let Some(record) = parse_replay_line(line, index + 1)? {
            records.push(record);
        }
    }

    debug!("Parsed {} replay records", records.len());
    Ok(records)
}

/// Parse one dump line
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_replay_line(line: &str, line_number: usize) -> Result<Option<CostRecord>, ParseError> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::InvalidLine {
            line_number,
            line: line.to_string(),
        });
    }

    let amount = parse_amount(parts[1].trim_matches(|c| c == '[' || c == ']'))?;
    let child = parts[2..].join(" ");

    Ok(Some(CostRecord::new(parts[0], child, amount)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_line() {
        let record = parse_replay_line("prod [200.00] EC2", 1).unwrap().unwrap();
        assert_eq!(record, CostRecord::new("prod", "EC2", 200.0));
    }

    #[test]
    fn test_child_keeps_inner_whitespace() {
        let record = parse_replay_line("prod [12.50] Amazon   Simple Storage Service", 1)
            .unwrap()
            .unwrap();
        assert_eq!(record.target, "Amazon Simple Storage Service");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let records = parse_replay("\nall [1.00] acct1\n   \nacct1 [1.00] prod\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_short_line_is_fatal() {
        let err = parse_replay("all [1.00] acct1\nacct1 [2.00]\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLine {
                line_number: 2,
                line: "acct1 [2.00]".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_amount_is_fatal() {
        let err = parse_replay("acct1 [notanumber] svc").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount { ref value, .. } if value == "notanumber"));
    }
}
