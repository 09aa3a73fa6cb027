use serde::Serialize;
use time::OffsetDateTime;

use ferrobank_service::SessionTokens;

/// The single response envelope; only applicable fields are serialised.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = ()> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_expires_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            access_token: None,
            access_token_expires_at: None,
            refresh_token: None,
            refresh_token_expires_at: None,
            data: Some(data),
            error: None,
        }
    }

    /// Attaches the token pair minted at signup/login.
    pub fn with_session_tokens(mut self, tokens: &SessionTokens) -> Self {
        self.access_token = Some(tokens.access_token.clone());
        self.access_token_expires_at = Some(tokens.access_token_expires_at);
        self.refresh_token = Some(tokens.refresh_token.clone());
        self.refresh_token_expires_at = Some(tokens.refresh_token_expires_at);
        self
    }
}

impl Envelope<()> {
    pub fn access(access_token: String, access_token_expires_at: OffsetDateTime) -> Self {
        Self {
            access_token: Some(access_token),
            access_token_expires_at: Some(access_token_expires_at),
            refresh_token: None,
            refresh_token_expires_at: None,
            data: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            access_token: None,
            access_token_expires_at: None,
            refresh_token: None,
            refresh_token_expires_at: None,
            data: None,
            error: Some(message.into()),
        }
    }
}
