//! Features API Server
//!
//! OGC API - Features implementation over an RDF graph.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use features_api::build_router;
use features_api::config::ApiConfig;
use features_api::state::AppState;

/// Features API Server
#[derive(Parser, Debug)]
#[command(name = "features-api")]
#[command(about = "OGC API - Features server for feature collections held in RDF")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "FEATURES_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "FEATURES_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, default_value = "config/features.yaml", env = "FEATURES_CONFIG")]
    config: PathBuf,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(async move {
        run_server(args).await;
    });
}

async fn run_server(args: Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting features API server");

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    let config = match ApiConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!(
        base_url = config.base_url(),
        data_file = %config.data_file.display(),
        sparql_endpoint = config.sparql_endpoint.as_deref().unwrap_or("none"),
        "Configuration loaded"
    );

    let state = match AppState::new(config).await {
        Ok(state) => Arc::new(state.with_metrics(prometheus_handle)),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = build_router(state);

    let addr: SocketAddr = args.listen.parse().expect("Invalid listen address");

    info!("Features API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server failed");
}
