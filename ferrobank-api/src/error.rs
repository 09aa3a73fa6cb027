use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use ferrobank_core::StoreError;
use ferrobank_service::{AccountError, SessionError, TransferError, UserError};

use crate::response::Envelope;

/// What a failed request answers with. Internal failures are logged in full
/// and reach the client as the fixed string "internal".
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        error!(target: "api", "internal error: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::error(self.message))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound
            | StoreError::AccountNotFound
            | StoreError::EntryNotFound
            | StoreError::TransferNotFound => Self::not_found(err.to_string()),
            // Sessions only surface on token renewal, where a missing row
            // means the credential is no good.
            StoreError::SessionNotFound => Self::unauthorized(err.to_string()),
            StoreError::OwnerNotFound | StoreError::InvalidAmount => Self::bad_request(err.to_string()),
            StoreError::CurrencyAlreadyExists | StoreError::UsernameAlreadyExists | StoreError::EmailAlreadyExists => {
                Self::conflict(err.to_string())
            }
            StoreError::Internal(source) => Self::internal(source),
        }
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::InvalidOwner => Self::unauthorized(err.to_string()),
            TransferError::InvalidAmount
            | TransferError::NegativeAmount
            | TransferError::SameAccount
            | TransferError::InsufficientBalance
            | TransferError::CurrencyMismatch => Self::bad_request(err.to_string()),
            TransferError::Store(source) => source.into(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Token(source) => Self::unauthorized(source.to_string()),
            SessionError::BlockedSession
            | SessionError::InvalidUser
            | SessionError::MismatchedRefreshToken
            | SessionError::ExpiredSession => Self::unauthorized(err.to_string()),
            SessionError::Store(source) => source.into(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::OwnerMismatch => Self::unauthorized(err.to_string()),
            AccountError::Store(source) => source.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::WrongPassword => Self::unauthorized(err.to_string()),
            UserError::Password(source) => Self::internal(source),
            UserError::Store(source) => source.into(),
        }
    }
}
