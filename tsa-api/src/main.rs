//! tsa-api - Turkish sentiment analysis service
//!
//! Loads configuration, connects to the classifier endpoint, and serves the
//! HTTP API until Ctrl+C / SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tsa_api::classifier::{Classifier, HttpClassifier};
use tsa_api::{build_router, Analyzer, AppState};
use tsa_common::config::{
    load_toml_config, resolve_config_path, ConfigSource, Overrides, ServiceConfig,
};
use tsa_common::{FusionEngine, Lexicon};

/// Delay between warm-up attempts while the model is still loading
const WARM_UP_RETRY_INTERVAL: Duration = Duration::from_secs(15);

/// Command-line arguments for tsa-api
#[derive(Parser, Debug)]
#[command(name = "tsa-api")]
#[command(about = "Turkish sentiment analysis service")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/tsa/config.toml); also TSA_CONFIG
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "TSA_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TSA_PORT")]
    port: Option<u16>,

    /// Text-classification inference endpoint
    #[arg(long, env = "TSA_CLASSIFIER_URL")]
    classifier_url: Option<String>,

    /// Bearer token for the inference endpoint
    #[arg(long, env = "TSA_CLASSIFIER_TOKEN", hide_env_values = true)]
    classifier_token: Option<String>,

    /// Model name reported in responses
    #[arg(long, env = "TSA_MODEL_NAME")]
    model_name: Option<String>,

    /// Replacement lexicon file (TOML)
    #[arg(long, env = "TSA_LEXICON")]
    lexicon: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            classifier_url: self.classifier_url.clone(),
            classifier_token: self.classifier_token.clone(),
            model_name: self.model_name.clone(),
            lexicon_path: self.lexicon.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // TOML is read first so its log level can seed the filter
    let config_source = resolve_config_path(args.config.as_deref());
    let toml_config = load_toml_config(&config_source).context("Failed to load config file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level)),
        )
        .init();

    // Build identification first, before any slow startup work
    info!(
        "Starting TSA API (tsa-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_source {
        ConfigSource::Explicit(path) => info!("Config file: {}", path.display()),
        ConfigSource::Default(path) if path.exists() => info!("Config file: {}", path.display()),
        ConfigSource::Default(path) => {
            warn!("No config file at {}, using defaults", path.display())
        }
        ConfigSource::None => warn!("No config directory on this platform, using defaults"),
    }

    let config = ServiceConfig::resolve(args.overrides(), toml_config)
        .context("Invalid configuration")?;

    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::load(path)
            .with_context(|| format!("Failed to load lexicon {}", path.display()))?,
        None => {
            info!("Using built-in Turkish lexicon");
            Lexicon::turkish()
        }
    };

    let classifier = connect_classifier(&config).await?;
    let analyzer = Analyzer::new(classifier, FusionEngine::new(lexicon));

    let state = AppState::new(analyzer);
    let app = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("tsa-api listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the classifier and start warming it up
///
/// The service starts even if the endpoint is unreachable; analysis calls
/// return "classifier unavailable" until a warm-up succeeds.
async fn connect_classifier(config: &ServiceConfig) -> Result<Option<Arc<dyn Classifier>>> {
    let Some(endpoint) = &config.classifier_endpoint else {
        warn!("No classifier endpoint configured; analysis requests will fail");
        return Ok(None);
    };

    let classifier = Arc::new(
        HttpClassifier::new(
            endpoint.clone(),
            config.classifier_token.clone(),
            config.model_name.clone(),
            config.classifier_timeout,
        )
        .context("Failed to create classifier client")?,
    );
    info!(model = %config.model_name, endpoint = %endpoint, "Loading classifier");

    if let Err(e) = classifier.warm_up().await {
        error!("Classifier warm-up failed: {}", e);
        tokio::spawn(retry_warm_up(Arc::clone(&classifier)));
    }

    let classifier: Arc<dyn Classifier> = classifier;
    Ok(Some(classifier))
}

async fn retry_warm_up(classifier: Arc<HttpClassifier>) {
    let mut attempt = 1u32;
    loop {
        tokio::time::sleep(WARM_UP_RETRY_INTERVAL).await;
        attempt += 1;
        match classifier.warm_up().await {
            Ok(()) => return,
            Err(e) => warn!(
                attempt,
                endpoint = classifier.endpoint(),
                "Classifier still unavailable: {}",
                e
            ),
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
