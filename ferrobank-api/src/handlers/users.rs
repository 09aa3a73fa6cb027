use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;

use crate::{
    dto::UserDto,
    error::ApiError,
    response::Envelope,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize)]
pub struct UserData {
    pub user: UserDto,
}

fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.is_empty() {
        return Err(ApiError::bad_request("Username field is required"));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::bad_request("Username accepts only alphanumeric characters"));
    }
    Ok(())
}

fn validate_create(req: &CreateUserRequest) -> Result<(), ApiError> {
    validate_username(&req.username)?;
    if req.password.len() < 6 {
        return Err(ApiError::bad_request("Password must be at least 6 characters"));
    }
    if req.full_name.is_empty() {
        return Err(ApiError::bad_request("FullName field is required"));
    }
    if !req.email.contains('@') {
        return Err(ApiError::bad_request("Email is not valid"));
    }
    Ok(())
}

fn client_of(headers: &HeaderMap) -> (String, String) {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let client_ip = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    (user_agent, client_ip)
}

pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<Envelope<UserData>>, ApiError> {
    validate_create(&req)?;

    let user = state
        .users
        .create(&req.username, &req.password, &req.full_name, &req.email)
        .await?;

    let (user_agent, client_ip) = client_of(&headers);
    let tokens = state.sessions.create(&user.username, &user_agent, &client_ip).await?;

    Ok(Json(Envelope::data(UserData { user: user.into() }).with_session_tokens(&tokens)))
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Envelope<UserData>>, ApiError> {
    validate_username(&req.username)?;
    if req.password.is_empty() {
        return Err(ApiError::bad_request("Password field is required"));
    }

    let user = state.users.login(&req.username, &req.password).await?;

    let (user_agent, client_ip) = client_of(&headers);
    let tokens = state.sessions.create(&user.username, &user_agent, &client_ip).await?;

    Ok(Json(Envelope::data(UserData { user: user.into() }).with_session_tokens(&tokens)))
}
