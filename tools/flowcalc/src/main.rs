//! flowcalc - run a calculator flow node from the command line
//!
//! Loads a node configuration (or takes a formula directly), then feeds
//! `<slot> <value>` deliveries read from stdin to the node and prints one
//! line per completed round.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use flowcalc_node::{
    load_config, runtime, CalcNode, InputMessage, NodeConfig, Payload,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "flowcalc",
    version,
    about = "Evaluate a calculator flow node against deliveries read from stdin"
)]
struct Cli {
    /// Node configuration file (yaml or json)
    #[arg(short, long, default_value = "flowcalc.yaml")]
    config: PathBuf,

    /// Use this formula directly instead of a configuration file
    #[arg(short, long, conflicts_with = "config")]
    formula: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// Parse a `<slot> <value>` line into a delivery.
///
/// Integer values become `integer64` payloads, decimal values `float`,
/// anything else a `string` payload that the node will drop.
fn parse_delivery(line: &str) -> Option<InputMessage> {
    let mut parts = line.split_whitespace();
    let index = parts.next()?.parse::<u32>().ok()?;
    let raw = parts.next()?;

    let payload = if let Ok(value) = raw.parse::<i64>() {
        Payload::Integer64(value)
    } else if let Ok(value) = raw.parse::<f64>() {
        Payload::Float(value)
    } else {
        Payload::String(raw.to_string())
    };

    Some(InputMessage { index, payload })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let config = match cli.formula {
        Some(formula) => NodeConfig {
            name: None,
            formula,
        },
        None => load_config(&cli.config)
            .with_context(|| format!("failed to load {}", cli.config.display()))?,
    };

    let node =
        Arc::new(CalcNode::new(config).context("failed to initialize calculator node")?);
    println!(
        "{} node '{}' with formula '{}', slots {:?}",
        "Running".green().bold(),
        node.name(),
        node.formula(),
        node.used_slots()
    );
    println!("Enter deliveries as '<slot> <value>' lines, EOF to stop.");

    let (input_tx, input_rx) = mpsc::channel(64);
    let (output_tx, mut output_rx) = mpsc::channel(64);
    let worker = runtime::spawn(Arc::clone(&node), input_rx, output_tx);

    let printer = tokio::spawn(async move {
        while let Some(result) = output_rx.recv().await {
            println!("{} {}", "=".green().bold(), result.payload);
        }
    });

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_delivery(line) {
            Some(message) => {
                if input_tx.send(message).await.is_err() {
                    break;
                }
            }
            None => {
                eprintln!("{} cannot parse delivery '{}'", "WARN".yellow(), line);
            }
        }
    }
    drop(input_tx);

    worker.await?;
    printer.await?;
    Ok(())
}
