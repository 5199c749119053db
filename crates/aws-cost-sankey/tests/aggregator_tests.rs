use aws_cost_sankey::aggregator::{
    apply_replay, calculate_cost_summary, ingest_cost_groups, CostGraph, RoundingPolicy,
};
use aws_cost_sankey::parser::{parse_replay, RawCostGroup};
use pretty_assertions::assert_eq;

fn example_groups() -> Vec<RawCostGroup> {
    vec![
        RawCostGroup::new("environment$prod", "EC2", "150.40"),
        RawCostGroup::new("environment$prod", "EC2", "49.60"),
    ]
}

#[test]
fn test_example_scenario_aggregates_all_tiers() {
    let mut graph = CostGraph::new();
    ingest_cost_groups(&mut graph, "account1", &example_groups(), RoundingPolicy::Nearest)
        .unwrap();

    assert_eq!(graph.get("prod", "EC2"), Some(200.0));
    assert_eq!(graph.get("account1", "prod"), Some(200.0));
    assert_eq!(graph.get("all", "account1"), Some(200.0));
}

#[test]
fn test_accumulation_matches_sum_without_rounding() {
    let amounts = ["12.34", "0.66", "7.00", "80.25"];
    let groups: Vec<RawCostGroup> = amounts
        .iter()
        .map(|a| RawCostGroup::new("environment$dev", "S3", *a))
        .collect();

    let mut graph = CostGraph::new();
    ingest_cost_groups(&mut graph, "account1", &groups, RoundingPolicy::None).unwrap();

    let expected: f64 = amounts.iter().map(|a| a.parse::<f64>().unwrap()).sum();
    let actual = graph.get("dev", "S3").unwrap();
    assert!((actual - expected).abs() < 1e-9);
}

#[test]
fn test_accumulation_matches_sum_of_rounded_amounts() {
    let groups = vec![
        RawCostGroup::new("environment$dev", "S3", "0.49"),
        RawCostGroup::new("environment$dev", "S3", "0.51"),
        RawCostGroup::new("environment$dev", "S3", "10.5"),
    ];

    let mut graph = CostGraph::new();
    ingest_cost_groups(&mut graph, "account1", &groups, RoundingPolicy::Nearest).unwrap();

    // 0 + 1 + 11
    assert_eq!(graph.get("dev", "S3"), Some(12.0));
}

#[test]
fn test_environment_fallback_and_prefix() {
    let groups = vec![
        RawCostGroup::new("environment$", "Lambda", "5"),
        RawCostGroup::new("environment$prod", "Lambda", "7"),
    ];

    let mut graph = CostGraph::new();
    ingest_cost_groups(&mut graph, "account1", &groups, RoundingPolicy::Nearest).unwrap();

    assert_eq!(graph.get("account1", "account1-unknown"), Some(5.0));
    assert_eq!(graph.get("account1", "prod"), Some(7.0));
    assert_eq!(graph.get("all", "account1"), Some(12.0));
}

#[test]
fn test_replay_overwrites_while_live_accumulates() {
    let records = parse_replay("prod [10.00] EC2\nprod [30.00] EC2\n").unwrap();

    let mut graph = CostGraph::new();
    apply_replay(&mut graph, &records);

    assert_eq!(graph.get("prod", "EC2"), Some(30.0));
}

#[test]
fn test_independent_graphs_do_not_share_state() {
    let mut first = CostGraph::new();
    let mut second = CostGraph::new();
    ingest_cost_groups(&mut first, "account1", &example_groups(), RoundingPolicy::Nearest)
        .unwrap();
    ingest_cost_groups(&mut second, "account2", &example_groups(), RoundingPolicy::Nearest)
        .unwrap();

    assert_eq!(first.get("all", "account2"), None);
    assert_eq!(second.get("all", "account1"), None);
}

#[test]
fn test_summary_over_live_graph() {
    let mut graph = CostGraph::new();
    ingest_cost_groups(&mut graph, "account1", &example_groups(), RoundingPolicy::Nearest)
        .unwrap();

    let summary = calculate_cost_summary(&graph, 5);
    assert_eq!(summary.total, 200.0);
    assert_eq!(summary.account_count, 1);
    assert_eq!(summary.environment_count, 1);
    assert_eq!(summary.top_categories.len(), 1);
    assert_eq!(summary.top_categories[0].target, "EC2");
}
