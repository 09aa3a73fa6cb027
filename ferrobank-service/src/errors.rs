use thiserror::Error;

use ferrobank_auth::{PasswordError, TokenError};
use ferrobank_core::StoreError;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("amount is not a valid decimal")]
    InvalidAmount,

    #[error("amount must be greater than zero")]
    NegativeAmount,

    #[error("source and target accounts must differ")]
    SameAccount,

    #[error("account does not belong to the authenticated user")]
    InvalidOwner,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("accounts have different currencies")]
    CurrencyMismatch,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("session is blocked")]
    BlockedSession,

    #[error("session does not belong to this user")]
    InvalidUser,

    #[error("refresh token does not match the session")]
    MismatchedRefreshToken,

    #[error("session has expired")]
    ExpiredSession,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("account does not belong to the authenticated user")]
    OwnerMismatch,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum UserError {
    #[error("wrong password")]
    WrongPassword,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
