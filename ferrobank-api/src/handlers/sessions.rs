use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{error::ApiError, response::Envelope, AppState};

#[derive(Debug, Deserialize)]
pub struct RenewAccessRequest {
    pub refresh_token: String,
}

pub async fn renew_access(
    State(state): State<AppState>,
    Json(req): Json<RenewAccessRequest>,
) -> Result<Json<Envelope>, ApiError> {
    if req.refresh_token.is_empty() {
        return Err(ApiError::bad_request("RefreshToken field is required"));
    }

    let (access_token, access_token_expires_at) = state.sessions.renew_access(&req.refresh_token).await?;
    Ok(Json(Envelope::access(access_token, access_token_expires_at)))
}
