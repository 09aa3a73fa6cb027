use async_trait::async_trait;
use sqlx::{error::ErrorKind, FromRow, PgPool};
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

use ferrobank_core::prelude::*;

#[derive(Debug, FromRow)]
pub struct UserDTO {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

impl From<UserDTO> for User {
    fn from(dto: UserDTO) -> Self {
        Self {
            username: dto.username,
            hashed_password: dto.hashed_password,
            full_name: dto.full_name,
            email: dto.email,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct UserRepo {
    pool: PgPool,
}

fn classify_create(err: sqlx::Error) -> StoreError {
    let (kind, constraint) = match &err {
        sqlx::Error::Database(db) => (Some(db.kind()), db.constraint().map(str::to_owned)),
        _ => (None, None),
    };
    match (kind, constraint.as_deref()) {
        (Some(ErrorKind::UniqueViolation), Some("users_email_key")) => StoreError::EmailAlreadyExists,
        (Some(ErrorKind::UniqueViolation), _) => StoreError::UsernameAlreadyExists,
        _ => StoreError::Internal(err),
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, UserDTO>(
            r#"
            INSERT INTO users (username, hashed_password, full_name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING username, hashed_password, full_name, email, created_at
            "#,
        )
        .bind(user.username)
        .bind(user.hashed_password)
        .bind(user.full_name)
        .bind(user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_create)?;
        Ok(user.into())
    }

    async fn get(&self, username: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, UserDTO>(
            r#"
            SELECT username, hashed_password, full_name, email, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match user {
            Some(user) => Ok(user.into()),
            None => Err(StoreError::UserNotFound),
        }
    }
}
