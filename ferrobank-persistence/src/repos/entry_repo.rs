use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{error::ErrorKind, FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

use ferrobank_core::prelude::*;

#[derive(Debug, FromRow)]
pub struct EntryDTO {
    pub id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub created_at: OffsetDateTime,
}

impl From<EntryDTO> for Entry {
    fn from(dto: EntryDTO) -> Self {
        Self {
            id: dto.id,
            account_id: dto.account_id,
            amount: dto.amount,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct EntryRepo {
    pool: PgPool,
}

pub(crate) async fn insert(conn: &mut PgConnection, account_id: i64, amount: Decimal) -> Result<EntryDTO, sqlx::Error> {
    sqlx::query_as::<_, EntryDTO>(
        r#"
        INSERT INTO entries (account_id, amount)
        VALUES ($1, $2)
        RETURNING id, account_id, amount, created_at
        "#,
    )
    .bind(account_id)
    .bind(amount)
    .fetch_one(conn)
    .await
}

pub(crate) fn classify_insert(err: sqlx::Error) -> StoreError {
    let kind = match &err {
        sqlx::Error::Database(db) => Some(db.kind()),
        _ => None,
    };
    match kind {
        Some(ErrorKind::ForeignKeyViolation) => StoreError::AccountNotFound,
        _ => StoreError::Internal(err),
    }
}

#[async_trait]
impl EntryStore for EntryRepo {
    async fn create(&self, account_id: i64, amount: Decimal) -> Result<Entry, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let entry = insert(&mut conn, account_id, amount).await.map_err(classify_insert)?;
        Ok(entry.into())
    }

    async fn get(&self, id: i64) -> Result<Entry, StoreError> {
        let entry = sqlx::query_as::<_, EntryDTO>(
            r#"
            SELECT id, account_id, amount, created_at
            FROM entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match entry {
            Some(entry) => Ok(entry.into()),
            None => Err(StoreError::EntryNotFound),
        }
    }

    async fn list(&self, account_id: i64, limit: i64, offset: i64) -> Result<Vec<Entry>, StoreError> {
        let entries = sqlx::query_as::<_, EntryDTO>(
            r#"
            SELECT id, account_id, amount, created_at
            FROM entries
            WHERE account_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries.into_iter().map(Entry::from).collect())
    }
}
