//! Redash CLI: list, inspect, and edit dashboards, queries, and visualizations.

mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use redash_lib::{Client, Config, Dashboard, Query, Visualization};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DASHBOARD_COLUMNS: &[&str] = &["id", "name", "slug", "version", "is_archived"];
const QUERY_COLUMNS: &[&str] = &["id", "name", "data_source_id", "version", "is_draft"];

#[derive(Parser)]
#[command(name = "redash")]
#[command(about = "Redash CLI: list, inspect, and edit dashboards, queries, and visualizations", long_about = None)]
struct Cli {
    /// Redash base URL, e.g. https://redash.example.com
    #[arg(long, env = redash_lib::config::ENV_URL, global = true)]
    url: Option<String>,

    /// API key (user or admin key from the Redash profile page)
    #[arg(long, env = redash_lib::config::ENV_API_KEY, hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = redash_lib::config::ENV_TIMEOUT_SECS, default_value = "15", global = true)]
    timeout: u64,

    /// Output format: plain (human-readable), json (structured).
    #[arg(short, long, default_value = "plain", value_enum, global = true)]
    output: OutputFormatArg,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Plain,
    Json,
}

#[derive(Args)]
struct PayloadArg {
    /// JSON payload file ("-" reads stdin)
    #[arg(long, short)]
    file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboards
    #[command(subcommand)]
    Dashboards(DashboardCommand),
    /// Queries
    #[command(subcommand)]
    Queries(QueryCommand),
    /// Visualizations
    #[command(subcommand)]
    Visualizations(VisualizationCommand),
    /// Show version
    Version,
}

#[derive(Subcommand)]
enum DashboardCommand {
    /// List one page of dashboards
    List,
    /// Show one dashboard
    Get { id: u64 },
    /// Search dashboards by name
    Search { term: String },
    /// Create a dashboard from a JSON payload
    Create(PayloadArg),
    /// Update a dashboard from a JSON payload
    Update {
        id: u64,
        #[command(flatten)]
        payload: PayloadArg,
    },
}

#[derive(Subcommand)]
enum QueryCommand {
    /// List one page of queries
    List,
    /// Show one query with its visualizations
    Get { id: u64 },
    /// Search queries
    Search { term: String },
    /// Create a query from a JSON payload
    Create(PayloadArg),
    /// Update a query from a JSON payload
    Update {
        id: u64,
        #[command(flatten)]
        payload: PayloadArg,
    },
    /// Delete (archive) a query
    Delete { id: u64 },
    /// Mark a query as favorite
    Favorite { id: u64 },
    /// Remove a query from favorites
    Unfavorite { id: u64 },
}

#[derive(Subcommand)]
enum VisualizationCommand {
    /// Show a visualization embedded in a query
    Get { query_id: u64, id: u64 },
    /// Create a visualization from a JSON payload
    Create(PayloadArg),
    /// Update a visualization from a JSON payload
    Update {
        id: u64,
        #[command(flatten)]
        payload: PayloadArg,
    },
    /// Delete a visualization
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if matches!(cli.command, Commands::Version) {
        println!("redash {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let format = match cli.output {
        OutputFormatArg::Plain => output::OutputFormat::Plain,
        OutputFormatArg::Json => output::OutputFormat::Json,
    };

    match run(&client, cli.command, format).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_client(cli: &Cli) -> Result<Client, String> {
    let url = cli.url.as_deref().ok_or_else(|| {
        format!(
            "Redash URL not set. Pass --url or set {}.",
            redash_lib::config::ENV_URL
        )
    })?;
    let key = cli.api_key.clone().ok_or_else(|| {
        format!(
            "API key not set. Pass --api-key or set {}.",
            redash_lib::config::ENV_API_KEY
        )
    })?;
    let config = Config::new(url, key)
        .map_err(|e| e.to_string())?
        .with_timeout(Duration::from_secs(cli.timeout));
    tracing::debug!(?config, "client configured");
    Client::new(config).map_err(|e| e.to_string())
}

fn read_payload<T: DeserializeOwned>(arg: &PayloadArg) -> Result<T, String> {
    let raw = if arg.file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(&arg.file)
            .map_err(|e| format!("failed to read {}: {}", arg.file.display(), e))?
    };
    serde_json::from_str(&raw).map_err(|e| format!("invalid payload: {}", e))
}

fn to_value<T: Serialize>(v: &T) -> Result<serde_json::Value, String> {
    serde_json::to_value(v).map_err(|e| e.to_string())
}

/// Printed without the `Error:` prefix; the command still exits 1.
fn visualization_not_found(query_id: u64, id: u64) -> String {
    format!("Visualization {} not found in query {}", id, query_id)
}

async fn run(
    client: &Client,
    cmd: Commands,
    format: output::OutputFormat,
) -> Result<ExitCode, String> {
    let print_value = |v: &serde_json::Value| -> Result<(), String> {
        match format {
            output::OutputFormat::Plain => print!("{}", output::format_plain(v)),
            output::OutputFormat::Json => {
                println!("{}", output::format_json(v).map_err(|e| e.to_string())?)
            }
        }
        Ok(())
    };
    let print_page = |v: &serde_json::Value, columns: &[&str]| -> Result<(), String> {
        match format {
            output::OutputFormat::Plain => print!("{}", output::format_page(v, columns)),
            output::OutputFormat::Json => {
                println!("{}", output::format_json(v).map_err(|e| e.to_string())?)
            }
        }
        Ok(())
    };

    match cmd {
        Commands::Dashboards(cmd) => match cmd {
            DashboardCommand::List => {
                let page = client.list_dashboards().await.map_err(|e| e.to_string())?;
                print_page(&to_value(&page)?, DASHBOARD_COLUMNS)?;
            }
            DashboardCommand::Get { id } => {
                let d = client.get_dashboard(id).await.map_err(|e| e.to_string())?;
                print_value(&to_value(&d)?)?;
            }
            DashboardCommand::Search { term } => {
                let page = client
                    .search_dashboards(&term)
                    .await
                    .map_err(|e| e.to_string())?;
                print_page(&to_value(&page)?, DASHBOARD_COLUMNS)?;
            }
            DashboardCommand::Create(payload) => {
                let payload: Dashboard = read_payload(&payload)?;
                let d = client
                    .create_dashboard(&payload)
                    .await
                    .map_err(|e| e.to_string())?;
                print_value(&to_value(&d)?)?;
            }
            DashboardCommand::Update { id, payload } => {
                let payload: Dashboard = read_payload(&payload)?;
                let d = client
                    .update_dashboard(id, &payload)
                    .await
                    .map_err(|e| e.to_string())?;
                print_value(&to_value(&d)?)?;
            }
        },
        Commands::Queries(cmd) => match cmd {
            QueryCommand::List => {
                let page = client.list_queries().await.map_err(|e| e.to_string())?;
                print_page(&to_value(&page)?, QUERY_COLUMNS)?;
            }
            QueryCommand::Get { id } => {
                let q = client.get_query(id).await.map_err(|e| e.to_string())?;
                print_value(&to_value(&q)?)?;
            }
            QueryCommand::Search { term } => {
                let page = client
                    .search_queries(&term)
                    .await
                    .map_err(|e| e.to_string())?;
                print_page(&to_value(&page)?, QUERY_COLUMNS)?;
            }
            QueryCommand::Create(payload) => {
                let payload: Query = read_payload(&payload)?;
                let q = client
                    .create_query(&payload)
                    .await
                    .map_err(|e| e.to_string())?;
                print_value(&to_value(&q)?)?;
            }
            QueryCommand::Update { id, payload } => {
                let payload: Query = read_payload(&payload)?;
                let q = client
                    .update_query(id, &payload)
                    .await
                    .map_err(|e| e.to_string())?;
                print_value(&to_value(&q)?)?;
            }
            QueryCommand::Delete { id } => {
                client.delete_query(id).await.map_err(|e| e.to_string())?;
                eprintln!("Deleted query {}", id);
            }
            QueryCommand::Favorite { id } => {
                client.favorite_query(id).await.map_err(|e| e.to_string())?;
            }
            QueryCommand::Unfavorite { id } => {
                client
                    .unfavorite_query(id)
                    .await
                    .map_err(|e| e.to_string())?;
            }
        },
        Commands::Visualizations(cmd) => match cmd {
            VisualizationCommand::Get { query_id, id } => {
                match client
                    .get_visualization(query_id, id)
                    .await
                    .map_err(|e| e.to_string())?
                {
                    Some(v) => print_value(&to_value(&v)?)?,
                    None => {
                        eprintln!("{}", visualization_not_found(query_id, id));
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
            VisualizationCommand::Create(payload) => {
                let payload: Visualization = read_payload(&payload)?;
                let v = client
                    .create_visualization(&payload)
                    .await
                    .map_err(|e| e.to_string())?;
                print_value(&to_value(&v)?)?;
            }
            VisualizationCommand::Update { id, payload } => {
                let payload: Visualization = read_payload(&payload)?;
                let v = client
                    .update_visualization(id, &payload)
                    .await
                    .map_err(|e| e.to_string())?;
                print_value(&to_value(&v)?)?;
            }
            VisualizationCommand::Delete { id } => {
                client
                    .delete_visualization(id)
                    .await
                    .map_err(|e| e.to_string())?;
                eprintln!("Deleted visualization {}", id);
            }
        },
        Commands::Version => {}
    }
    Ok(ExitCode::SUCCESS)
}
