//! SoleStack order service.
//!
//! This binary serves orders on port 4004.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - DynamoDB for order storage (`Orders` table with a `userId-index` GSI)
//! - Bearer tokens resolved against auth-service; stock decremented through
//!   inventory-service during placement

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solestack_order::config::OrderConfig;
use solestack_order::routes;
use solestack_order::state::AppState;
use solestack_order::store;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = OrderConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "solestack_order=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize the DynamoDB client
    let client = store::create_client(&config.aws_region, config.ddb_endpoint_url.as_deref()).await;
    tracing::info!(table = %config.orders_table, "DynamoDB client ready");

    // Build application state
    let state = AppState::new(config.clone(), client);
    tracing::info!(
        auth = %config.auth_service_url,
        inventory = %config.inventory_service_url,
        "Upstream service clients ready"
    );

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(cors_layer(&state.config().allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("order-service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Health check response body.
#[derive(Serialize)]
struct HealthBody {
    service: &'static str,
    status: &'static str,
}

/// Liveness health check endpoint.
///
/// Reports the server is running. Does not check dependencies.
async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        service: "order-service",
        status: "ok",
    })
}

/// Readiness health check endpoint.
///
/// Verifies the order table is reachable before returning OK.
/// Returns 503 Service Unavailable if DynamoDB is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state
        .client()
        .describe_table()
        .table_name(&state.config().orders_table)
        .send()
        .await
    {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Build the CORS layer from the configured origin list.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| tracing::warn!(%origin, "Ignoring unparseable CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
