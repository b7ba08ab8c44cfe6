use std::any::Any;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::{ApiError, HttpErrorResponse, INTERNAL_ERROR_MESSAGE};
use crate::generation::EmailGenerator;

pub(crate) mod email;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) generator: Arc<EmailGenerator>,
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) fn router(state: AppState, static_dir: &str) -> Router {
    let email_router = Router::new().route("/generate", post(email::handle_generate_email));

    Router::new()
        .nest("/api/email", email_router)
        .route("/health", get(handle_health))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", details);

    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: HttpErrorResponse::from(INTERNAL_ERROR_MESSAGE),
    }
    .into_response()
}
