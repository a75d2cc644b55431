//! Outflow Web Server
//!
//! Axum-based REST API serving expense summaries for a bank statement export.
//!
//! Every request re-reads the statement from disk; there is no cache and no
//! shared mutable state between requests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use outflow_core::LoadOptions;

mod handlers;

/// Default location of the statement export, relative to the working directory
pub const DEFAULT_STATEMENT_PATH: &str = "data/statement.csv";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Statement export read on every request
    pub statement_path: PathBuf,
    /// How the statement is parsed
    pub load_options: LoadOptions,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            statement_path: PathBuf::from(DEFAULT_STATEMENT_PATH),
            load_options: LoadOptions::default(),
            allowed_origins: vec![],
        }
    }
}

/// Shared application state (read-only)
pub struct AppState {
    pub config: ServerConfig,
}

/// Parse a comma-separated list of CORS origins
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Create the application router
pub fn create_router(config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        config: config.clone(),
    });

    let routes = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // Statement table
        .route("/data", get(handlers::read_statement))
        // Expense summaries
        .route("/daily_expenses", get(handlers::daily_expenses))
        .route("/weekly_expenses", get(handlers::weekly_expenses))
        .route("/monthly_expenses", get(handlers::monthly_expenses))
        .route("/category_expenses", get(handlers::category_expenses))
        .route("/expenses/:granularity", get(handlers::expenses_by));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve(config: ServerConfig, host: &str, port: u16) -> anyhow::Result<()> {
    if !config.statement_path.exists() {
        warn!(
            "⚠️  Statement {} not found - requests will fail until it exists",
            config.statement_path.display()
        );
    }

    let app = create_router(config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unprocessable(msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a statement load failure to a response
    ///
    /// A missing or unreadable source is 503; a source that exists but cannot
    /// be interpreted is 422 with the reason; anything else is a sanitized 500.
    pub fn from_load(err: outflow_core::Error) -> Self {
        use outflow_core::Error;

        match err {
            Error::SourceUnavailable { .. } => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "Statement source unavailable".to_string(),
                internal: Some(err.into()),
            },
            Error::Format(_) | Error::InvalidData(_) | Error::MissingColumn(_) | Error::Csv(_) => {
                warn!(error = %err, "Statement could not be loaded");
                Self::unprocessable(&err.to_string())
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
