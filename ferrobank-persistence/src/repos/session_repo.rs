use async_trait::async_trait;
use sqlx::{error::ErrorKind, FromRow, PgPool};
use time::OffsetDateTime;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use ferrobank_core::prelude::*;

#[derive(Debug, FromRow)]
pub struct SessionDTO {
    pub id: Uuid,
    pub username: String,
    pub refresh_token: String,
    pub user_agent: String,
    pub client_ip: String,
    pub is_blocked: bool,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl From<SessionDTO> for Session {
    fn from(dto: SessionDTO) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            refresh_token: dto.refresh_token,
            user_agent: dto.user_agent,
            client_ip: dto.client_ip,
            is_blocked: dto.is_blocked,
            expires_at: dto.expires_at,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct SessionRepo {
    pool: PgPool,
}

fn classify_create(err: sqlx::Error) -> StoreError {
    let kind = match &err {
        sqlx::Error::Database(db) => Some(db.kind()),
        _ => None,
    };
    match kind {
        Some(ErrorKind::ForeignKeyViolation) => StoreError::UserNotFound,
        _ => StoreError::Internal(err),
    }
}

#[async_trait]
impl SessionStore for SessionRepo {
    async fn create(&self, session: NewSession) -> Result<Session, StoreError> {
        let session = sqlx::query_as::<_, SessionDTO>(
            r#"
            INSERT INTO sessions (id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at
            "#,
        )
        .bind(session.id)
        .bind(session.username)
        .bind(session.refresh_token)
        .bind(session.user_agent)
        .bind(session.client_ip)
        .bind(session.is_blocked)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_create)?;
        Ok(session.into())
    }

    async fn get(&self, id: Uuid) -> Result<Session, StoreError> {
        let session = sqlx::query_as::<_, SessionDTO>(
            r#"
            SELECT id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match session {
            Some(session) => Ok(session.into()),
            None => Err(StoreError::SessionNotFound),
        }
    }
}
