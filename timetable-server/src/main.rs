use std::process::ExitCode;

use timetable_server::catalog::CatalogLoader;
use timetable_server::config::ServerConfig;
use timetable_server::directory::StopDirectory;
use timetable_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Built once for the lifetime of the process.
static CATALOG: CatalogLoader = CatalogLoader::new();

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.is_dev());
    info!(dev = config.is_dev(), data_path = %config.data_path.display(), "starting bus timetable server");

    // Load stops and groups (fail fast if unavailable)
    let directory = match StopDirectory::load(&config.bus_stops_path(), &config.bus_stop_groups_path()) {
        Ok(directory) => directory,
        Err(e) => {
            error!(error = %e, "failed to load stop directory");
            return ExitCode::FAILURE;
        }
    };
    info!(
        stops = directory.stops().len(),
        groups = directory.groups().len(),
        "stop directory loaded"
    );

    // Load the service catalog (fail fast if malformed)
    let catalog = match CATALOG.load_from_dir(&config.data_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "failed to load service catalog");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(catalog, directory, &config.cache_config());
    let app = create_router(state, &config.allowed_origins());

    let addr = config.addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("Bus timetable server listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    info!("server stopped");
    ExitCode::SUCCESS
}

/// Log to stdout, filtered by `RUST_LOG` (default `info`).
fn init_tracing(dev: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if dev {
        builder.pretty().init();
    } else {
        builder.compact().init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
