use time::OffsetDateTime;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Server-side record backing a refresh token. The id equals the refresh
/// token's payload id. Never mutated; blocking is an external operation.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Session {
    pub id: Uuid,
    pub username: String,
    pub refresh_token: String,
    pub user_agent: String,
    pub client_ip: String,
    pub is_blocked: bool,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}
