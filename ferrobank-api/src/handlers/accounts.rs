use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use ferrobank_auth::TokenPayload;
use ferrobank_core::Currency;

use crate::{dto::AccountDto, error::ApiError, response::Envelope, AppState};

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsParams {
    pub page_id: i64,
    pub page_size: i64,
}

#[derive(Debug, serde::Serialize)]
pub struct AccountData {
    pub account: AccountDto,
}

#[derive(Debug, serde::Serialize)]
pub struct AccountsData {
    pub accounts: Vec<AccountDto>,
}

pub async fn create_account(
    State(state): State<AppState>,
    Extension(payload): Extension<TokenPayload>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<Envelope<AccountData>>, ApiError> {
    let currency = req
        .currency
        .parse::<Currency>()
        .map_err(|_| ApiError::bad_request("Currency is not supported"))?;

    let account = state.accounts.create(&payload.username, currency).await?;
    Ok(Json(Envelope::data(AccountData { account: account.into() })))
}

pub async fn get_account(
    State(state): State<AppState>,
    Extension(payload): Extension<TokenPayload>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<AccountData>>, ApiError> {
    if id < 1 {
        return Err(ApiError::bad_request("ID must be at least 1"));
    }

    let account = state.accounts.get(id, &payload.username).await?;
    Ok(Json(Envelope::data(AccountData { account: account.into() })))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    Extension(payload): Extension<TokenPayload>,
    Query(params): Query<ListAccountsParams>,
) -> Result<Json<Envelope<AccountsData>>, ApiError> {
    if params.page_id < 1 {
        return Err(ApiError::bad_request("page_id must be at least 1"));
    }
    if params.page_size < 1 || params.page_size > MAX_PAGE_SIZE {
        return Err(ApiError::bad_request("page_size must be between 1 and 100"));
    }

    let accounts = state
        .accounts
        .list(&payload.username, params.page_id, params.page_size)
        .await?;
    Ok(Json(Envelope::data(AccountsData {
        accounts: accounts.into_iter().map(AccountDto::from).collect(),
    })))
}
