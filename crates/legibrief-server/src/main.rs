//! Legibrief Server
//!
//! HTTP boundary for the legislative analysis pipeline. Exposes REST
//! endpoints for:
//!
//! - Bill summarization from an uploaded PDF
//! - Bill search from sparse parameters
//! - Health probing
//!
//! ## Architecture
//!
//! The server owns process lifecycle concerns only: the provider client
//! handle, the uploads directory, CORS policy, and error-to-status
//! mapping. All analysis lives in `legibrief-analyst`, and everything a
//! client receives has passed through `legibrief-normalizer`, so
//! responses are rendering-safe by construction.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{request::Parts, HeaderValue},
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use legibrief_analyst::{AnalystConfig, BillSearcher, DocumentAnalyst};
use legibrief_domain::LlmProvider;
use legibrief_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use legibrief_llm::OpenAiProvider;

mod api;
mod error;
mod upload;

use api::{handle_health, handle_search, handle_summarize};

/// Upload size cap: 10 MiB
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Command-line arguments for the legibrief server
#[derive(Parser, Debug)]
#[command(name = "legibrief-server")]
#[command(about = "Legislative bill summarization and search server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "10000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory for transient upload storage
    #[arg(long, default_value = "uploads")]
    uploads_dir: PathBuf,

    /// API key for the generation provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Generation provider endpoint
    #[arg(long, env = "OPENAI_API_BASE", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model to use for analysis
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Per-call generation timeout in seconds
    #[arg(long, default_value = "60")]
    timeout_secs: u64,

    /// Origins allowed by the CORS policy, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://127.0.0.1:3000,http://localhost:5000,http://127.0.0.1:5000"
    )]
    allowed_origins: Vec<String>,

    /// Additional frontend origin to allow
    #[arg(long, env = "FRONTEND_URL")]
    frontend_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state: the two workflow handles and the uploads
/// root, constructed once at startup and injected into every handler
pub struct AppState<L>
where
    L: LlmProvider,
{
    /// Document analysis workflow
    pub analyst: Arc<DocumentAnalyst<L>>,
    /// Bill search workflow
    pub searcher: Arc<BillSearcher<L>>,
    /// Transient upload storage root
    pub uploads_dir: PathBuf,
}

// Derived Clone would demand L: Clone; the fields are all shared handles
impl<L: LlmProvider> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            analyst: Arc::clone(&self.analyst),
            searcher: Arc::clone(&self.searcher),
            uploads_dir: self.uploads_dir.clone(),
        }
    }
}

impl<L> AppState<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
{
    /// Build state around one shared provider handle
    pub fn new(provider: L, config: AnalystConfig, uploads_dir: PathBuf) -> Self {
        let provider = Arc::new(provider);
        Self {
            analyst: Arc::new(DocumentAnalyst::new(Arc::clone(&provider), config.clone())),
            searcher: Arc::new(BillSearcher::new(provider, config)),
            uploads_dir,
        }
    }
}

/// Build the application router over any provider implementation
pub fn router<L>(state: AppState<L>) -> Router
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
{
    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/summarize", post(handle_summarize::<L>))
        .route("/api/search", post(handle_search::<L>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Decide whether a cross-origin request may proceed.
///
/// Requests with no Origin header never reach this check. Anything on
/// the configured allow-list passes, as does any https origin under the
/// static-hosting domain the frontend deploys to.
fn origin_allowed(origin: &str, allow_list: &[String]) -> bool {
    if allow_list.iter().any(|allowed| allowed == origin) {
        return true;
    }
    origin.starts_with("https://") && origin.contains(".github.io")
}

/// CORS layer over the configured allow-list
fn cors_layer(allow_list: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| origin_allowed(o, &allow_list))
                    .unwrap_or(false)
            },
        ))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting legibrief server on {}:{}", args.host, args.port);

    // Make sure the uploads directory exists before the first request
    std::fs::create_dir_all(&args.uploads_dir)?;

    let config = AnalystConfig {
        generation_timeout_secs: args.timeout_secs,
        ..AnalystConfig::default()
    };
    config.validate().map_err(anyhow::Error::msg)?;

    let provider = OpenAiProvider::new(args.endpoint.clone(), args.api_key.clone(), args.model.clone());
    let state = AppState::new(provider, config, args.uploads_dir.clone());

    let mut origins = args.allowed_origins.clone();
    if let Some(frontend) = args.frontend_url.clone() {
        origins.push(frontend);
    }

    let app = router(state).layer(cors_layer(origins));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Model: {} at {}", args.model, args.endpoint);
    info!("API endpoints available at:");
    info!("- POST /api/summarize (for bill analysis)");
    info!("- POST /api/search (for bill search)");
    info!("- GET /api/health (for server health check)");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod origin_tests {
    use super::origin_allowed;

    fn allow_list() -> Vec<String> {
        vec![
            "http://localhost:3000".to_string(),
            "https://app.example.com".to_string(),
        ]
    }

    #[test]
    fn test_allow_list_origin_passes() {
        assert!(origin_allowed("http://localhost:3000", &allow_list()));
        assert!(origin_allowed("https://app.example.com", &allow_list()));
    }

    #[test]
    fn test_github_pages_origin_passes() {
        assert!(origin_allowed("https://someone.github.io", &allow_list()));
    }

    #[test]
    fn test_insecure_github_pages_origin_rejected() {
        assert!(!origin_allowed("http://someone.github.io", &allow_list()));
    }

    #[test]
    fn test_unknown_origin_rejected() {
        assert!(!origin_allowed("https://evil.example.net", &allow_list()));
        assert!(!origin_allowed("http://localhost:8080", &allow_list()));
    }
}
