use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pid_graph::graph::canonical_key;
use pid_graph::prelude::*;
use pid_graph::schema::{self, Document};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "pid-cli")]
#[command(about = "Validate and batch-optimize P&ID graphs over their JSON schema")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Load a graph and report dropped entities plus invariant violations.
    Validate { path: PathBuf },
    /// Load, run OptimizeAllBadEdges, and save the result.
    OptimizeAll { input: PathBuf, output: PathBuf },
    /// Print node/edge counts and perpendicularity statistics.
    Stats { path: PathBuf },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let name = match &cmd.action {
        Action::Validate { .. } => "validate",
        Action::OptimizeAll { .. } => "optimize-all",
        Action::Stats { .. } => "stats",
    };

    let result = match &cmd.action {
        Action::Validate { path } => validate(path),
        Action::OptimizeAll { input, output } => optimize_all(input, output),
        Action::Stats { path } => stats(path),
    };

    match &result {
        Ok(()) => tracing::info!(command = name, "command succeeded"),
        Err(e) => tracing::error!(command = name, error = %e, "command failed"),
    }
    result
}

fn load_document(path: &PathBuf) -> Result<Document> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {} as a graph document", path.display()))
}

fn log_load_warnings(warnings: &[schema::LoadWarning]) {
    for warning in warnings {
        tracing::warn!(entity = %warning.entity, reason = %warning.reason, "dropped at load");
    }
}

fn print_stats(stats: &Stats) {
    println!("edges scored: {}", stats.total);
    println!("good: {}  bad: {}", stats.good, stats.bad);
    println!("mean perpendicularity score: {:.4}", stats.mean_score);
}

/// `validate <in.json>`: reports dropped entities plus the boundary-contact
/// and key-canonicity invariants, and prints perpendicularity stats.
fn validate(path: &PathBuf) -> Result<()> {
    let doc = load_document(path)?;
    let tol = Tolerances::default();
    let (graph, warnings) = schema::load(&doc, tol);
    log_load_warnings(&warnings);
    println!("dropped entities: {}", warnings.len());

    let mut boundary_violations = 0usize;
    let mut key_violations = 0usize;
    for edge in graph.edges() {
        if edge.key() != canonical_key(&edge.source, &edge.target) {
            key_violations += 1;
            tracing::warn!(source = %edge.source, target = %edge.target, "edge key is not canonical");
        }
        let (Some(source), Some(target)) = (graph.node(&edge.source), graph.node(&edge.target)) else {
            continue;
        };
        // Fallback edges are exempt: their contacts are centroid-centroid
        // by construction, not boundary points (spec.md §8).
        if edge.metadata.fallback {
            continue;
        }
        if !source.shape.contains_on_boundary(edge.source_contact, tol) {
            boundary_violations += 1;
            tracing::warn!(node = %edge.source, "source contact is off the shape boundary");
        }
        if !target.shape.contains_on_boundary(edge.target_contact, tol) {
            boundary_violations += 1;
            tracing::warn!(node = %edge.target, "target contact is off the shape boundary");
        }
    }
    println!("boundary contact violations: {boundary_violations}");
    println!("key canonicity violations: {key_violations}");

    let stats = Stats::compute(graph.edges().map(|e| (e.source_contact, e.target_contact)));
    print_stats(&stats);

    if boundary_violations > 0 || key_violations > 0 {
        bail!("graph failed validation");
    }
    Ok(())
}

/// `optimize-all <in.json> <out.json>`: loads, runs `OptimizeAllBadEdges`,
/// saves, and prints the count optimized.
fn optimize_all(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let doc = load_document(input)?;
    let tol = Tolerances::default();
    let (mut graph, warnings) = schema::load(&doc, tol);
    log_load_warnings(&warnings);

    let mut undo = UndoJournal::default();
    let optimized = commands::optimize_all_bad_edges(&mut graph, &mut undo, tol);
    tracing::info!(optimized, "ran optimize-all");
    println!("optimized {optimized} edge(s)");

    let saved = schema::save(&graph);
    let text = serde_json::to_string_pretty(&saved)?;
    fs::write(output, text).with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

/// `stats <in.json>`: node/edge counts plus the perpendicularity aggregate.
fn stats(path: &PathBuf) -> Result<()> {
    let doc = load_document(path)?;
    let tol = Tolerances::default();
    let (graph, warnings) = schema::load(&doc, tol);
    log_load_warnings(&warnings);

    println!("nodes: {}", graph.node_count());
    println!("edges: {}", graph.edge_count());
    println!("isolated nodes: {}", graph.isolated_node_count());
    let stats = Stats::compute(graph.edges().map(|e| (e.source_contact, e.target_contact)));
    print_stats(&stats);
    Ok(())
}
