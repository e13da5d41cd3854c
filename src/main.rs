use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tourism_agent::config::LoggingConfig;
use tourism_agent::format::render;
use tourism_agent::{QueryResult, TourismAgent, TourismConfig, web};

/// Plan a trip in plain words: weather and attractions for the place you mention
#[derive(Debug, Parser)]
#[command(name = "tourism-agent", version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Print results as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Serve the HTTP API on this port instead of answering queries
    #[arg(long, value_name = "PORT")]
    serve: Option<u16>,

    /// The query, e.g. "I'm going to Bangalore, let's plan my trip".
    /// Read line by line from stdin when omitted.
    query: Vec<String>,
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tourism_agent={level},warn")));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_result(result: &QueryResult, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(result).context("Failed to serialize result")?
        );
    } else {
        print!("{}", render(result));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TourismConfig::load_from_path(cli.config.clone())?;
    init_tracing(&config.logging, cli.verbose);

    let agent = Arc::new(
        TourismAgent::new(&config).context("Failed to create the tourism agent")?,
    );

    if let Some(port) = cli.serve {
        return web::run(agent, port).await;
    }

    if !cli.query.is_empty() {
        let result = agent.process(&cli.query.join(" ")).await;
        print_result(&result, cli.json)?;
        if !result.success {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let result = agent.process(line).await;
        print_result(&result, cli.json)?;
        println!();
    }

    Ok(())
}
