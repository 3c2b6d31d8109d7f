use aeo_api::{build_router, ApiConfig, AppState};
use clap::Parser;

#[derive(Parser)]
#[command(name = "aeo-api")]
#[command(about = "AEO/GEO audit core HTTP surface")]
struct Args {
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut config = ApiConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind = bind.parse()?;
    }

    tracing::info!(bind = %config.bind, fetcher_mode = ?config.app.fetch.mode, "starting aeo-api");

    let state = AppState::new(config.clone())?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
