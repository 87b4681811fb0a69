//! HTTP surface: `GET /` status and `POST /ask-weather`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    error::ChatError,
    model::{AskRequest, AskResponse, ErrorResponse, StatusResponse},
    router::QueryRouter,
};

pub const SERVICE_NAME: &str = "Weatherbot";

#[derive(Clone)]
struct ApiState {
    router: QueryRouter,
}

/// Build the axum application with permissive CORS and request tracing.
pub fn app(router: QueryRouter) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/ask-weather", post(ask_weather))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ApiState { router })
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    router: QueryRouter,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "weatherbot listening");
    }

    axum::serve(listener, app(router)).with_graceful_shutdown(shutdown).await
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: format!("{SERVICE_NAME} running") })
}

async fn ask_weather(
    State(state): State<ApiState>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let response = state.router.answer(&body.query).await?;
    Ok(Json(AskResponse { response }))
}

/// Chat failures become 502 with a JSON error body.
struct ApiError(ChatError);

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "chat completion failed");

        let body = ErrorResponse { error: self.0.to_string() };
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}
