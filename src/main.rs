use bandhub::config::Config;
use bandhub::graphql::GraphQLService;
use bandhub::storage::{InMemoryStorage, MongoStorage, Storage};
use bandhub::{logging, metrics, server};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "bandhub")]
#[command(about = "GraphQL API server for bands and musicians")]
#[command(version = "0.1.0")]
struct Cli {
    /// Port to run the server on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML config file (defaults to ./bandhub.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use in-memory storage instead of MongoDB (data will not persist)
    #[arg(long)]
    in_memory: bool,

    /// Serve Prometheus metrics on this address, e.g. 127.0.0.1:9464
    #[arg(long)]
    metrics_addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let _log_guard = logging::init_logging(&config.logging);

    if let Some(addr) = cli.metrics_addr {
        metrics::init_metrics(addr);
    }

    let storage: Arc<dyn Storage> = if cli.in_memory {
        info!("Using in-memory storage");
        Arc::new(InMemoryStorage::new())
    } else {
        // Connection is opened lazily by the first request
        info!("Using MongoDB database '{}'", config.database.name);
        Arc::new(MongoStorage::from_config(&config.database))
    };

    let service = GraphQLService::new(storage);
    server::start_server(service, &config.server).await
}
