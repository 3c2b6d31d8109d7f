//! Command-line interface: a thin HTTP client over `aeo-api`, with no
//! audit logic of its own.

use aeo_cli::{commands, AeoClient};
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "aeo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AEO/GEO audit CLI", long_about = None)]
struct Cli {
    /// aeo-api server URL.
    #[arg(long, env = "AEO_API_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Output raw JSON instead of formatted tables.
    #[arg(long, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Audit a single page synchronously.
    Page {
        url: String,
    },
    /// Submit a domain audit and optionally watch its progress.
    Domain {
        domain: String,
        #[arg(long)]
        max_pages: Option<usize>,
        #[arg(long)]
        watch: bool,
    },
    /// Fetch a domain audit's current status/result for a known job-id.
    Result {
        job_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = AeoClient::new(cli.url)?;

    match cli.command {
        Commands::Page { url } => commands::page_audit(&client, &url, cli.json).await,
        Commands::Domain { domain, max_pages, watch } => commands::domain_audit(&client, &domain, max_pages, watch, cli.json).await,
        Commands::Result { job_id } => commands::domain_result(&client, &job_id, cli.json).await,
    }
}
