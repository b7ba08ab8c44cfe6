use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::AppState;
use crate::bail_api;
use crate::error::ApiResult;
use crate::generation::{GenerationRequest, GenerationResult};

pub const MISSING_FIELDS_MESSAGE: &str = "purpose, recipient_name and tone are required";

/// Body of `POST /api/email/generate`. Every field is optional here so that
/// missing ones end up as a 400 with the fixed message instead of a rejection.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmailGenerateRequest {
    #[serde(default)]
    pub(crate) purpose: Option<String>,
    #[serde(default)]
    pub(crate) recipient_name: Option<String>,
    #[serde(default)]
    pub(crate) tone: Option<String>,
}

impl EmailGenerateRequest {
    /// Trimmed triple, or `None` when any field is absent or blank.
    fn into_generation_request(self) -> Option<GenerationRequest> {
        let request = GenerationRequest::new(self.purpose?, self.recipient_name?, self.tone?);
        request.validate().ok().map(|_| request)
    }
}

#[axum_macros::debug_handler]
pub(crate) async fn handle_generate_email(
    State(state): State<AppState>,
    payload: Result<Json<EmailGenerateRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GenerationResult>)> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!("Rejected email request body: {}", rejection);
            bail_api!(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE);
        }
    };

    let Some(request) = payload.into_generation_request() else {
        bail_api!(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE);
    };

    info!(
        purpose = request.purpose(),
        recipient_name = request.recipient_name(),
        tone = request.tone(),
        "Generating email"
    );

    let result = state.generator.generate(&request).await?;
    Ok((StatusCode::OK, Json(result)))
}
