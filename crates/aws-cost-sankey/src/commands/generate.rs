//! Generate command implementation.
//!
//! The generate command:
//! 1. Loads and validates the config
//! 2. Builds the cost graph from a replay dump or from Cost Explorer
//! 3. Projects the graph (text lines or Sankey nodes/links)
//! 4. Optionally asks the LLM for an analysis
//! 5. Writes the output file
//!
//! Any failure aborts the run before the output file is created.

use crate::aggregator::{
    apply_replay, calculate_cost_summary, ingest_cost_groups, CostGraph, CostSummary,
};
use crate::commands::models::{GenerateArgs, OutputFormat};
use crate::output::{write_html, write_text};
use crate::parser::parse_replay;
use crate::sankey::{GraphRenderer, SankeyHtmlRenderer};
use crate::settings::{load_config, Config};
use crate::source::{CostExplorerSource, RecordSource};
use crate::summary::{OpenAiSummarizer, TextSummarizer};
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Number of category edges listed by `--summary`
const SUMMARY_TOP_CATEGORIES: usize = 10;

/// Result of a generate run
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// File that was written
    pub output_path: PathBuf,

    /// LLM analysis (text+ai only)
    pub analysis: Option<String>,

    /// Totals of the aggregated graph
    pub summary: CostSummary,
}

/// Execute the generate command with the live collaborators
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Config file missing or invalid
/// * Cost Explorer failures
/// * Malformed amounts or replay lines
/// * LLM failures (text+ai)
/// * File write errors
pub fn execute_generate(args: GenerateArgs) -> Result<GenerateOutcome> {
    let start_time = Instant::now();

    info!("Loading config from: {}", args.config_path.display());
    let config = load_config(&args.config_path).context("Failed to load config")?;

    // Everything the run needs is checked before the first request
    let summarizer = match args.format {
        OutputFormat::TextAi => {
            let llm = config
                .llm_config()
                .context("The text+ai format needs LLM settings")?;
            Some(OpenAiSummarizer::new(llm).context("Failed to create LLM client")?)
        }
        _ => None,
    };

    let source = if args.input.is_none() {
        config
            .require_accounts()
            .context("Live fetching needs accounts and a billing period")?;
        Some(CostExplorerSource::new().context("Failed to create Cost Explorer client")?)
    } else {
        None
    };

    let outcome = run_generate(
        &args,
        &config,
        source.as_ref().map(|s| s as &dyn RecordSource),
        &SankeyHtmlRenderer::new(),
        summarizer.as_ref().map(|s| s as &dyn TextSummarizer),
    )?;

    info!(
        "Generate completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(outcome)
}

/// Run the pipeline with explicit collaborators
///
/// **Public** - lets callers (and tests) swap the source, renderer and
/// summarizer
pub fn run_generate(
    args: &GenerateArgs,
    config: &Config,
    source: Option<&dyn RecordSource>,
    renderer: &dyn GraphRenderer,
    summarizer: Option<&dyn TextSummarizer>,
) -> Result<GenerateOutcome> {
    let graph = build_graph(args, config, source)?;

    let summary = calculate_cost_summary(&graph, SUMMARY_TOP_CATEGORIES);
    info!("Cost graph: {}", summary.summary());

    let output_path = args.output_path();
    let analysis = write_outputs(args, config, &graph, renderer, summarizer, &output_path)?;

    if let Some(text) = &analysis {
        info!("LLM analysis:\n{}", text);
        println!("{}", text);
    }

    if args.print_summary {
        print_cost_summary(&summary);
    }

    Ok(GenerateOutcome {
        output_path,
        analysis,
        summary,
    })
}

/// Build the cost graph from the replay dump or the record source
///
/// **Public** - the graph is returned fully populated, never partially
pub fn build_graph(
    args: &GenerateArgs,
    config: &Config,
    source: Option<&dyn RecordSource>,
) -> Result<CostGraph> {
    let mut graph = CostGraph::new();

    if let Some(input) = &args.input {
        info!("Reading data from {}", input.display());
        let records = read_replay_file(input)?;
        apply_replay(&mut graph, &records);
        return Ok(graph);
    }

    let source = source.context("No record source configured for live fetching")?;
    let range = config.date_range().context("Invalid billing period")?;

    for account in &config.accounts {
        let groups = source
            .fetch(account, &range, args.dimension)
            .with_context(|| format!("Failed to get cost data for {}", account.name))?;

        ingest_cost_groups(&mut graph, &account.name, &groups, config.rounding)
            .with_context(|| format!("Failed to parse cost data for {}", account.name))?;
    }

    debug!("Built cost graph with {} edges", graph.edge_count());
    Ok(graph)
}

/// Read and parse a replay dump
pub(crate) fn read_replay_file(path: &Path) -> Result<Vec<crate::parser::CostRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;

    let records = parse_replay(&contents)
        .with_context(|| format!("Failed to parse input file {}", path.display()))?;

    Ok(records)
}

/// Project the graph and write the output file
///
/// **Private** - internal helper for run_generate
///
/// The analysis is requested before writing so a failed LLM call leaves
/// no output behind.
fn write_outputs(
    args: &GenerateArgs,
    config: &Config,
    graph: &CostGraph,
    renderer: &dyn GraphRenderer,
    summarizer: Option<&dyn TextSummarizer>,
    output_path: &Path,
) -> Result<Option<String>> {
    match args.format {
        OutputFormat::Text | OutputFormat::TextAi => {
            info!("Generating text output...");
            let lines = graph.emit_text();

            let analysis = if args.format == OutputFormat::TextAi {
                let summarizer =
                    summarizer.context("The text+ai format needs an LLM summarizer")?;
                let mut text = lines.join("\n");
                text.push('\n');
                Some(summarizer.summarize(&text).context("LLM analysis failed")?)
            } else {
                None
            };

            write_text(&lines, output_path).context("Failed to write text output")?;
            info!("✓ Text output written to: {}", output_path.display());
            Ok(analysis)
        }
        OutputFormat::Chart => {
            info!("Generating chart output...");
            let view = graph.emit_graph_view(config.threshold);
            let html = renderer
                .render(&view, &config.chart_options())
                .context("Failed to render chart")?;

            write_html(&html, output_path).context("Failed to write chart")?;
            info!("✓ Chart written to: {}", output_path.display());
            Ok(None)
        }
    }
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    if args.config_path.as_os_str().is_empty() {
        anyhow::bail!("Config path cannot be empty");
    }

    if args.output_stem.as_os_str().is_empty() {
        anyhow::bail!("Output name cannot be empty");
    }

    if let Some(input) = &args.input {
        if !input.is_file() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }
    }

    Ok(())
}

/// Print a human-readable cost breakdown to stdout.
///
/// **Private** - internal helper for run_generate
fn print_cost_summary(summary: &CostSummary) {
    println!("\n{}", "━".repeat(80));
    println!("  {}", "AWS COST SUMMARY".bold());
    println!("{}", "━".repeat(80));
    println!("  Total:        {}", format!("${:.2}", summary.total).green().bold());
    println!("  Accounts:     {}", summary.account_count);
    println!("  Environments: {}", summary.environment_count);
    println!("  Edges:        {}", summary.edge_count);
    println!();

    if !summary.top_categories.is_empty() {
        println!("  {}", "TOP CATEGORIES".bold());
        for record in &summary.top_categories {
            let share = if summary.total > 0.0 {
                record.amount / summary.total * 100.0
            } else {
                0.0
            };
            println!(
                "  {:>12} {:>6.1}%  {} {} {}",
                format!("${:.2}", record.amount).yellow(),
                share,
                record.source.cyan(),
                "→".dimmed(),
                record.target
            );
        }
    }
    println!("{}\n", "━".repeat(80));
}
