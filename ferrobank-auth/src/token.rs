use std::time::Duration;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mockall::automock;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::TokenError;

/// Minimum length of the symmetric key, in bytes.
pub const MIN_SYMMETRIC_KEY_SIZE: usize = 32;

/// What a verified token carries. `id` is freshly generated per token and
/// doubles as the session id for refresh tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPayload {
    pub id: Uuid,
    pub username: String,
    pub issued_at: OffsetDateTime,
    pub expired_at: OffsetDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    jti: Uuid,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Creates and verifies time-bounded bearer tokens. Tokens are opaque to
/// callers; only the payload crosses this boundary.
#[automock]
pub trait TokenMaker: Send + Sync {
    fn create_token(&self, username: &str, ttl: Duration) -> Result<(String, TokenPayload), TokenError>;
    fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError>;
}

/// Symmetric-key (HS256) token maker. The key is set once at startup and
/// immutable afterwards.
#[derive(Debug)]
pub struct JwtTokenMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenMaker {
    pub fn new(symmetric_key: &str) -> Result<Self, TokenError> {
        if symmetric_key.len() < MIN_SYMMETRIC_KEY_SIZE {
            return Err(TokenError::KeyTooShort(MIN_SYMMETRIC_KEY_SIZE));
        }
        let mut validation = Validation::default();
        validation.leeway = 0;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(symmetric_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(symmetric_key.as_bytes()),
            validation,
        })
    }
}

impl TokenMaker for JwtTokenMaker {
    fn create_token(&self, username: &str, ttl: Duration) -> Result<(String, TokenPayload), TokenError> {
        let issued_at = OffsetDateTime::now_utc();
        let expired_at = issued_at + ttl;
        let claims = Claims {
            jti: Uuid::new_v4(),
            sub: username.to_string(),
            iat: issued_at.unix_timestamp(),
            exp: expired_at.unix_timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Invalid)?;
        let payload = TokenPayload {
            id: claims.jti,
            username: claims.sub,
            issued_at,
            expired_at,
        };
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        let claims = data.claims;
        Ok(TokenPayload {
            id: claims.jti,
            username: claims.sub,
            issued_at: OffsetDateTime::from_unix_timestamp(claims.iat).map_err(|_| TokenError::Invalid)?,
            expired_at: OffsetDateTime::from_unix_timestamp(claims.exp).map_err(|_| TokenError::Invalid)?,
        })
    }
}
