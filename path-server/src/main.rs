use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use path_server::arrivals::ArrivalsClient;
use path_server::cache::CachedArrivalsClient;
use path_server::commute::CommuteStore;
use path_server::config::ServerConfig;
use path_server::planner::Planner;
use path_server::poller::spawn_poller;
use path_server::topology::{Topology, path_topology};
use path_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "path_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let topology = match &config.topology_file {
        Some(path) => {
            let topology = Topology::load(path)?;
            info!(path = %path.display(), "loaded topology from file");
            topology
        }
        None => path_topology(),
    };
    info!(
        stations = topology.stations().len(),
        lines = topology.lines().len(),
        "network ready"
    );
    let planner = Planner::new(Arc::new(topology));

    if config.feed_urls.is_empty() {
        warn!("no arrivals sources configured; live arrivals will be unavailable");
    }
    let client = ArrivalsClient::new(config.arrivals_config())?;
    let arrivals = Arc::new(CachedArrivalsClient::new(client, &config.cache_config()));
    let poller = spawn_poller(arrivals.clone(), config.poll_interval);

    let store = CommuteStore::new(config.commute_store_config());
    match store.load_for(planner.topology()) {
        Some(pair) => info!(home = %pair.home(), work = %pair.work(), "loaded saved commute"),
        None => info!(path = %store.path().display(), "no saved commute"),
    }

    let state = AppState::new(planner, arrivals, store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "PATH commute planner listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
