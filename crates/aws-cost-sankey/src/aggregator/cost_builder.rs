//! Build the three-tier cost graph from source records.
//!
//! Every live cost group contributes to three edges:
//! - `all -> account`
//! - `account -> environment`
//! - `environment -> category`
//!
//! Live groups accumulate: one account spans several monthly buckets and
//! several accounts share the root. Replayed records overwrite instead,
//! because a dump line already holds the final value of its edge.

use super::graph::CostGraph;
use super::normalizer::{normalize_environment, RoundingPolicy};
use crate::parser::schema::{parse_amount, CostRecord, RawCostGroup};
use crate::utils::config::ROOT_LABEL;
use crate::utils::error::ParseError;
use log::debug;

/// Convert one account's cost groups into tier records
///
/// **Public** - used by `ingest_cost_groups` and by tests
///
/// Returns three records per group, in root, account, environment order.
/// The first malformed amount fails the whole batch.
pub fn build_cost_records(
    account: &str,
    groups: &[RawCostGroup],
    rounding: RoundingPolicy,
) -> Result<Vec<CostRecord>, ParseError> {
    let mut records = Vec::with_capacity(groups.len() * 3);

    for group in groups {
        let amount = rounding.apply(parse_amount(&group.amount)?);
        let environment = normalize_environment(account, &group.environment_tag_raw);

        records.push(CostRecord::new(ROOT_LABEL, account, amount));
        records.push(CostRecord::new(account, environment.clone(), amount));
        records.push(CostRecord::new(environment, group.category.clone(), amount));
    }

    Ok(records)
}

/// Accumulate one account's live cost groups into the graph
///
/// **Public** - main entry point for the live-fetch path
///
/// All amounts are parsed before the graph is touched, so a parse error
/// leaves the graph exactly as it was.
pub fn ingest_cost_groups(
    graph: &mut CostGraph,
    account: &str,
    groups: &[RawCostGroup],
    rounding: RoundingPolicy,
) -> Result<(), ParseError> {
    let records = build_cost_records(account, groups, rounding)?;

    for record in &records {
        graph.add(&record.source, &record.target, record.amount);
    }

    debug!(
        "Ingested {} cost groups for {} ({} edges in graph)",
        groups.len(),
        account,
        graph.edge_count()
    );

    Ok(())
}

/// Load replayed records into the graph, last value wins per edge
///
/// **Public** - main entry point for the replay path
pub fn apply_replay(graph: &mut CostGraph, records: &[CostRecord]) {
    for record in records {
        graph.set(&record.source, &record.target, record.amount);
    }

    debug!(
        "Replayed {} records ({} edges in graph)",
        records.len(),
        graph.edge_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<RawCostGroup> {
        vec![
            RawCostGroup::new("environment$prod", "EC2", "150.40"),
            RawCostGroup::new("environment$prod", "EC2", "49.60"),
        ]
    }

    #[test]
    fn test_three_tiers_accumulate() {
        let mut graph = CostGraph::new();
        ingest_cost_groups(&mut graph, "account1", &groups(), RoundingPolicy::Nearest).unwrap();

        assert_eq!(graph.get("prod", "EC2"), Some(200.0));
        assert_eq!(graph.get("account1", "prod"), Some(200.0));
        assert_eq!(graph.get("all", "account1"), Some(200.0));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_unrounded_accumulation() {
        let mut graph = CostGraph::new();
        let groups = vec![
            RawCostGroup::new("environment$prod", "S3", "0.25"),
            RawCostGroup::new("environment$prod", "S3", "0.25"),
        ];
        ingest_cost_groups(&mut graph, "account1", &groups, RoundingPolicy::None).unwrap();
        assert_eq!(graph.get("prod", "S3"), Some(0.5));

        let mut rounded = CostGraph::new();
        ingest_cost_groups(&mut rounded, "account1", &groups, RoundingPolicy::Nearest).unwrap();
        assert_eq!(rounded.get("prod", "S3"), Some(0.0));
    }

    #[test]
    fn test_untagged_goes_to_unknown() {
        let mut graph = CostGraph::new();
        let groups = vec![RawCostGroup::new("environment$", "Lambda", "10")];
        ingest_cost_groups(&mut graph, "account1", &groups, RoundingPolicy::Nearest).unwrap();

        assert_eq!(graph.get("account1", "account1-unknown"), Some(10.0));
        assert_eq!(graph.get("account1-unknown", "Lambda"), Some(10.0));
    }

    #[test]
    fn test_accounts_share_root() {
        let mut graph = CostGraph::new();
        let groups = vec![RawCostGroup::new("environment$prod", "EC2", "10")];
        ingest_cost_groups(&mut graph, "a", &groups, RoundingPolicy::Nearest).unwrap();
        ingest_cost_groups(&mut graph, "b", &groups, RoundingPolicy::Nearest).unwrap();

        assert_eq!(graph.get("all", "a"), Some(10.0));
        assert_eq!(graph.get("all", "b"), Some(10.0));
        assert_eq!(graph.get("prod", "EC2"), Some(20.0));
    }

    #[test]
    fn test_malformed_amount_leaves_graph_untouched() {
        let mut graph = CostGraph::new();
        let groups = vec![
            RawCostGroup::new("environment$prod", "EC2", "10"),
            RawCostGroup::new("environment$prod", "S3", "ten"),
        ];
        let result = ingest_cost_groups(&mut graph, "account1", &groups, RoundingPolicy::Nearest);

        assert!(result.is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_replay_overwrites() {
        let mut graph = CostGraph::new();
        apply_replay(
            &mut graph,
            &[
                CostRecord::new("prod", "EC2", 150.0),
                CostRecord::new("prod", "EC2", 200.0),
            ],
        );
        assert_eq!(graph.get("prod", "EC2"), Some(200.0));
    }
}
