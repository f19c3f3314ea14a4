//! Command-line client for a pool of time-series database hosts.
//!
//! ```text
//! tsdb-pool --host http://db1:8086 --host http://db2:8086 ping
//! tsdb-pool --config pool.toml query --db metrics "SELECT * FROM cpu LIMIT 1"
//! tsdb-pool --config pool.toml write --db metrics "cpu,host=a value=0.5"
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use tsdb_pool::config::{load_config, validate_config, ConfigError, HostConfig, PoolConfig};
use tsdb_pool::observability::{logging, metrics};
use tsdb_pool::{HostPool, PoolRequest};

#[derive(Parser)]
#[command(name = "tsdb-pool")]
#[command(about = "Query a pool of time-series database hosts with failover", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host base URL; repeat for several hosts. Replaces the configured hosts.
    #[arg(long = "host")]
    hosts: Vec<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every host and print reachability
    Ping {
        /// Path to probe instead of the configured one
        #[arg(long)]
        path: Option<String>,
    },
    /// Run a query and print the JSON result
    Query {
        #[arg(long)]
        db: String,
        q: String,
    },
    /// Write line protocol
    Write {
        #[arg(long)]
        db: String,
        #[arg(long)]
        precision: Option<String>,
        line: String,
    },
    /// Show which hosts are in rotation
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if let Err(e) = logging::init_logging(&config.observability.log_level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let pool = HostPool::from_config(&config)?;
    tracing::debug!(hosts = pool.hosts().len(), "Pool ready");

    match cli.command {
        Commands::Ping { path } => {
            let path = path.unwrap_or_else(|| config.ping.path.clone());
            let results = pool.ping(config.ping.timeout(), Some(&path)).await;
            let report: Vec<Value> = results
                .iter()
                .map(|stats| {
                    json!({
                        "url": stats.url.as_str(),
                        "online": stats.online,
                        "rtt_ms": stats.rtt.map(|rtt| rtt.as_secs_f64() * 1000.0),
                        "version": stats.version,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Query { db, q } => {
            let request = PoolRequest::get("/query").query("db", db).query("q", q);
            let body: Value = pool.json(&request).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Write { db, precision, line } => {
            let mut request = PoolRequest::post("/write").query("db", db);
            if let Some(precision) = precision {
                request = request.query("precision", precision);
            }
            pool.discard(&request.body(line)).await?;
            println!("ok");
        }
        Commands::Status => {
            let status = json!({
                "available": pool.hosts_available().iter().map(|h| h.url().to_string()).collect::<Vec<_>>(),
                "disabled": pool.hosts_disabled().iter().map(|h| h.url().to_string()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

/// Configuration from file (or defaults) with command-line overrides applied.
fn build_config(cli: &Cli) -> Result<PoolConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PoolConfig::default(),
    };

    if !cli.hosts.is_empty() {
        config.hosts = cli.hosts.iter().map(HostConfig::new).collect();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeouts.request_ms = timeout_ms;
    }
    if config.hosts.is_empty() {
        config.hosts.push(HostConfig::new("http://127.0.0.1:8086"));
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
