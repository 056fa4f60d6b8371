use std::{net::IpAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    enrichment::{EnrichmentPipeline, QueryResult},
    upstream::Fetch,
    InitializationError, ServiceError,
};

pub const NO_DATA_MESSAGE: &str = "There isn't any query recorded.";
pub const CLEARED_MESSAGE: &str = "Stats cleared!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    countries: usize,
}

type ApiState<F> = Arc<EnrichmentPipeline<F>>;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

fn no_data() -> Response {
    (StatusCode::OK, Json(MessageResponse::new(NO_DATA_MESSAGE))).into_response()
}

async fn where_ip_handler<F: Fetch>(
    State(state): State<ApiState<F>>,
    Path(ip): Path<String>,
) -> Result<Json<QueryResult>, ServiceError> {
    if ip.parse::<IpAddr>().is_err() {
        return Err(ServiceError::InvalidAddress(ip));
    }

    let result = state.enrich(&ip).await?;
    Ok(Json(result))
}

async fn stats_handler<F: Fetch>(
    State(state): State<ApiState<F>>,
) -> Result<Response, ServiceError> {
    Ok(match state.stats().summary().await? {
        Some(summary) => (StatusCode::OK, Json(summary)).into_response(),
        None => no_data(),
    })
}

async fn full_stats_handler<F: Fetch>(
    State(state): State<ApiState<F>>,
) -> Result<Response, ServiceError> {
    Ok(match state.stats().list_all().await? {
        Some(stats) => (StatusCode::OK, Json(stats)).into_response(),
        None => no_data(),
    })
}

async fn clear_stats_handler<F: Fetch>(
    State(state): State<ApiState<F>>,
) -> Result<Json<MessageResponse>, ServiceError> {
    state.stats().clear().await?;
    Ok(Json(MessageResponse::new(CLEARED_MESSAGE)))
}

async fn health_handler<F: Fetch>(
    State(state): State<ApiState<F>>,
) -> Result<impl IntoResponse, ServiceError> {
    let response = HealthResponse {
        status: "ok",
        countries: state.stats().country_count().await?,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Routes answer with and without a trailing slash
pub fn router<F: Fetch>(state: ApiState<F>) -> Router {
    Router::new()
        .route("/whereip/:ip", get(where_ip_handler::<F>))
        .route("/whereip/:ip/", get(where_ip_handler::<F>))
        .route("/stats", get(stats_handler::<F>))
        .route("/stats/", get(stats_handler::<F>))
        .route("/fullstats", get(full_stats_handler::<F>))
        .route("/fullstats/", get(full_stats_handler::<F>))
        .route("/clearstats", get(clear_stats_handler::<F>))
        .route("/clearstats/", get(clear_stats_handler::<F>))
        .route("/health", get(health_handler::<F>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_http_server(
    address: String,
    app: Router,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<(), ServiceError> {
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| InitializationError::Bind {
            addr: address.clone(),
            source,
        })?;

    info!("HTTP server listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            info!("HTTP server shutting down");
        })
        .await
        .map_err(ServiceError::Server)?;

    Ok(())
}
