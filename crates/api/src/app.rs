use std::time::Duration;

use async_graphql_axum::{GraphQLProtocol, GraphQLWebSocket};
use axum::{
    extract::{Request, State, WebSocketUpgrade},
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the Axum router: GraphQL over HTTP and websockets, the bundled SDL,
/// and a liveness probe.
pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config()
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    Router::new()
        .route("/health", get(health))
        .route("/sdl", get(sdl))
        .route("/graphql", get(graphql_ws_handler).post(graphql_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true),
        )
}

async fn graphql_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, AppError> {
    let (_parts, body) = req.into_parts();
    let body_bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read request body: {}", e)))?;

    let gql_request: async_graphql::Request = serde_json::from_slice(&body_bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid GraphQL request: {}", e)))?;

    let gql_response = state.schema.execute(gql_request).await;

    Ok(Json(gql_response).into_response())
}

/// WebSocket handler for GraphQL subscriptions.
async fn graphql_ws_handler(
    State(state): State<AppState>,
    protocol: GraphQLProtocol,
    upgrade: WebSocketUpgrade,
) -> Response {
    let schema = state.schema.clone();

    upgrade
        .protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |stream| GraphQLWebSocket::new(stream, schema, protocol).serve())
}

/// The bundled type definitions, as served to clients.
async fn sdl(State(state): State<AppState>) -> String {
    state.bundle().type_defs.clone()
}

async fn health() -> &'static str {
    "ok"
}
