use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use ferrobank_auth::TokenPayload;

use crate::{dto::TransferTxDto, error::ApiError, response::Envelope, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: String,
}

#[derive(Debug, serde::Serialize)]
pub struct TransferData {
    pub transfer: TransferTxDto,
}

pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(payload): Extension<TokenPayload>,
    Json(req): Json<CreateTransferRequest>,
) -> Result<Json<Envelope<TransferData>>, ApiError> {
    if req.from_account_id < 1 || req.to_account_id < 1 {
        return Err(ApiError::bad_request("account ids must be at least 1"));
    }
    if req.from_account_id == req.to_account_id {
        return Err(ApiError::bad_request("cannot transfer to the same account"));
    }

    let result = state
        .transfers
        .transfer(&payload.username, req.from_account_id, req.to_account_id, &req.amount)
        .await?;
    Ok(Json(Envelope::data(TransferData { transfer: result.into() })))
}
