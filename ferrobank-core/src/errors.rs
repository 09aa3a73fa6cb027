use thiserror::Error;

/// Typed store failures. Repos classify the constraint and not-found
/// conditions they recognise; everything else collapses into `Internal`,
/// which must never reach a client verbatim.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found")]
    UserNotFound,

    #[error("account not found")]
    AccountNotFound,

    #[error("entry not found")]
    EntryNotFound,

    #[error("transfer not found")]
    TransferNotFound,

    #[error("session not found")]
    SessionNotFound,

    #[error("account owner does not exist")]
    OwnerNotFound,

    #[error("owner already has an account in this currency")]
    CurrencyAlreadyExists,

    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("transfer amount must be positive")]
    InvalidAmount,

    #[error("internal store error: {0}")]
    Internal(#[from] sqlx::Error),
}
