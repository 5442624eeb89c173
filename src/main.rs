use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coopmon::client::CoopClient;
use coopmon::config::Config;
use coopmon::poller::Poller;
use coopmon::state::DashboardState;
use coopmon::view;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Terminal polling client for the coop monitoring backend", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Live dashboard (default)
    Watch,

    /// Fetch both endpoints once and print them
    Status,

    /// Push a manual moisture override to the backend
    SetMoisture {
        /// New moisture level
        value: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.service.log_filter()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting coop monitor: {}", config.service.name);
    info!("Backend URL: {}", config.server.base_url);

    let client = CoopClient::new(&config.server)?;

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => run_watch(client).await?,
        Command::Status => run_status(client).await?,
        Command::SetMoisture { value } => {
            client.update_moisture(value).await?;
            println!("Moisture override sent: {}", value);
        },
    }

    Ok(())
}

/// Start the polling tasks and hand the shared state to the dashboard
async fn run_watch(client: CoopClient) -> anyhow::Result<()> {
    let poller = Poller::new(client);
    let handles = poller.spawn();

    let result = view::run_dashboard(poller.state()).await;

    poller.stop();
    for handle in handles {
        let _ = handle.await;
    }
    info!("Coop monitor stopped");

    result?;
    Ok(())
}

/// One polling cycle, rendered to the console
async fn run_status(client: CoopClient) -> anyhow::Result<()> {
    let reading = client.fetch_sensor_data().await?;
    let status = client.fetch_chicken_status().await?;

    let mut state = DashboardState::new();
    state.apply_sensor_reading(&reading, Utc::now());
    state.apply_chicken_status(&status, Utc::now());

    view::print_status(&state);
    Ok(())
}
