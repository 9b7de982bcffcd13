use clap::{Parser, Subcommand};
use flowgraph::prelude::*;
use itertools::Itertools;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect, validate and replay edits against flow snapshots
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional session config JSON (id prefixes, default viewport)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run structural checks over a snapshot
    Lint {
        /// Path to the flow snapshot JSON file
        snapshot_path: String,
        /// Treat cycles as errors
        #[arg(long)]
        acyclic: bool,
        /// Skip the unreachable-node check
        #[arg(long)]
        no_reachability: bool,
    },
    /// Replay a JSON list of editor commands against a snapshot
    Apply {
        /// Path to the flow snapshot JSON file
        snapshot_path: String,
        /// Path to the JSON array of editor commands
        commands_path: String,
        /// Where to write the resulting snapshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print node and edge counts
    Stats {
        /// Path to the flow snapshot JSON file
        snapshot_path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => SessionConfig::default(),
    };

    match cli.command {
        Command::Lint {
            snapshot_path,
            acyclic,
            no_reachability,
        } => run_lint(&snapshot_path, acyclic, !no_reachability),
        Command::Apply {
            snapshot_path,
            commands_path,
            output,
        } => run_apply(&snapshot_path, &commands_path, output.as_deref(), &config),
        Command::Stats { snapshot_path } => run_stats(&snapshot_path),
    }
}

fn load_snapshot(path: &str) -> FlowSnapshot {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read snapshot file '{}': {}", path, e))
    });
    FlowSnapshot::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse snapshot JSON: {}", e)))
}

fn run_lint(snapshot_path: &str, require_acyclic: bool, check_reachability: bool) {
    let snapshot = load_snapshot(snapshot_path);
    let options = LintOptions {
        require_acyclic,
        check_reachability,
    };
    let report = lint(&snapshot, options);

    if report.is_clean() {
        println!("No issues found.");
        return;
    }
    for issue in &report.issues {
        println!("{:>7}: {}", issue.severity(), issue);
    }
    println!(
        "\n{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
    if report.has_errors() {
        std::process::exit(1);
    }
}

fn run_apply(
    snapshot_path: &str,
    commands_path: &str,
    output: Option<&str>,
    config: &SessionConfig,
) {
    let snapshot = load_snapshot(snapshot_path);
    let commands_json = fs::read_to_string(commands_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read commands file '{}': {}",
            commands_path, e
        ))
    });
    let commands: Vec<EditorCommand> = serde_json::from_str(&commands_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse commands JSON: {}", e)));

    let mut session = EditorSession::new("cli", config.clone());
    session.state_mut().hydrate_snapshot(snapshot);

    let start = Instant::now();
    let count = commands.len();
    EditorCommand::apply_all(commands, session.state_mut());
    tracing::info!(commands = count, elapsed = ?start.elapsed(), "replayed commands");

    let json = session
        .state()
        .snapshot()
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize snapshot: {}", e)));
    match output {
        Some(path) => {
            fs::write(path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output '{}': {}", path, e))
            });
            eprintln!("Applied {} command(s), wrote '{}'", count, path);
        }
        None => println!("{}", json),
    }
}

fn run_stats(snapshot_path: &str) {
    let snapshot = load_snapshot(snapshot_path);

    println!("--- Flow Summary ---");
    println!("Nodes: {}", snapshot.nodes.len());
    for (node_type, count) in snapshot
        .nodes
        .iter()
        .counts_by(|n| n.node_type)
        .into_iter()
        .sorted_by_key(|(t, _)| t.as_str())
    {
        println!("  {:<10} {}", node_type, count);
    }
    println!("Edges: {}", snapshot.edges.len());
    if let Some(viewport) = snapshot.viewport {
        println!(
            "Viewport: x={} y={} zoom={}",
            viewport.x, viewport.y, viewport.zoom
        );
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
