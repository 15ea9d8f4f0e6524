use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nyaa_addon_core::{
    load_config, validate_config, CombinedResolver, KitsuResolver, NyaaSearcher, Searcher,
    StreamHandler, TitleResolver, TmdbResolver,
};
use nyaa_addon_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Nyaa addon v{}", VERSION);

    // Determine config path
    let config_path = std::env::var("NYAA_ADDON_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Index: {}", config.index.base_url);

    // Create index searcher
    let searcher: Arc<dyn Searcher> = Arc::new(
        NyaaSearcher::new(config.index.clone()).context("Failed to create index searcher")?,
    );
    info!("Using searcher: {}", searcher.name());

    // Create title resolvers; IMDb ids need TMDB credentials
    let tmdb: Option<Arc<dyn TitleResolver>> = match &config.resolver.tmdb {
        Some(tmdb_config) => match TmdbResolver::new(tmdb_config.clone()) {
            Ok(resolver) => {
                info!("TMDB resolver initialized");
                Some(Arc::new(resolver) as Arc<dyn TitleResolver>)
            }
            Err(e) => {
                error!("Failed to initialize TMDB resolver: {}", e);
                None
            }
        },
        None => {
            warn!("No TMDB credentials configured, IMDb ids rely on request names");
            None
        }
    };

    let kitsu: Arc<dyn TitleResolver> = Arc::new(
        KitsuResolver::new(config.resolver.kitsu.clone())
            .context("Failed to create Kitsu resolver")?,
    );
    info!("Kitsu resolver initialized");

    let resolver = Arc::new(CombinedResolver::new(tmdb, Some(kitsu)));

    let handler = Arc::new(StreamHandler::from_config(&config, searcher, resolver));
    info!(
        "Ranking: french_subs={}, max_results={}, max_candidates={}",
        config.ranking.require_french_subs,
        config.ranking.max_results,
        config.search.max_candidates
    );

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::new(config, handler));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);
    info!("Install in Stremio: http://{}/manifest.json", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
