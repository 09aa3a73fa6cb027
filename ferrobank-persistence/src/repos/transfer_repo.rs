use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{error::ErrorKind, FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use tracing::debug;
use typed_builder::TypedBuilder;

use ferrobank_core::prelude::*;

use crate::repos::{account_repo, entry_repo};

#[derive(Debug, FromRow)]
pub struct TransferDTO {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: Decimal,
    pub created_at: OffsetDateTime,
}

impl From<TransferDTO> for Transfer {
    fn from(dto: TransferDTO) -> Self {
        Self {
            id: dto.id,
            from_account_id: dto.from_account_id,
            to_account_id: dto.to_account_id,
            amount: dto.amount,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct TransferRepo {
    pool: PgPool,
}

async fn insert(
    conn: &mut PgConnection,
    from_account_id: i64,
    to_account_id: i64,
    amount: Decimal,
) -> Result<TransferDTO, sqlx::Error> {
    sqlx::query_as::<_, TransferDTO>(
        r#"
        INSERT INTO transfers (from_account_id, to_account_id, amount)
        VALUES ($1, $2, $3)
        RETURNING id, from_account_id, to_account_id, amount, created_at
        "#,
    )
    .bind(from_account_id)
    .bind(to_account_id)
    .bind(amount)
    .fetch_one(conn)
    .await
}

fn classify_insert(err: sqlx::Error) -> StoreError {
    let kind = match &err {
        sqlx::Error::Database(db) => Some(db.kind()),
        _ => None,
    };
    match kind {
        Some(ErrorKind::ForeignKeyViolation) => StoreError::AccountNotFound,
        Some(ErrorKind::CheckViolation) => StoreError::InvalidAmount,
        _ => StoreError::Internal(err),
    }
}

#[async_trait]
impl TransferStore for TransferRepo {
    async fn create(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: Decimal,
    ) -> Result<Transfer, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let transfer = insert(&mut conn, from_account_id, to_account_id, amount)
            .await
            .map_err(classify_insert)?;
        Ok(transfer.into())
    }

    async fn get(&self, id: i64) -> Result<Transfer, StoreError> {
        let transfer = sqlx::query_as::<_, TransferDTO>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match transfer {
            Some(transfer) => Ok(transfer.into()),
            None => Err(StoreError::TransferNotFound),
        }
    }

    async fn list(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, StoreError> {
        let transfers = sqlx::query_as::<_, TransferDTO>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers
            WHERE from_account_id = $1 OR to_account_id = $2
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(transfers.into_iter().map(Transfer::from).collect())
    }

    async fn transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: Decimal,
    ) -> Result<TransferTxResult, StoreError> {
        let mut tx = self.pool.begin().await?;

        let transfer = insert(&mut tx, from_account_id, to_account_id, amount)
            .await
            .map_err(classify_insert)?;
        let from_entry = entry_repo::insert(&mut tx, from_account_id, -amount)
            .await
            .map_err(entry_repo::classify_insert)?;
        let to_entry = entry_repo::insert(&mut tx, to_account_id, amount)
            .await
            .map_err(entry_repo::classify_insert)?;

        // Row locks in ascending account-id order; two concurrent transfers
        // over the same pair cannot form a lock cycle.
        let (from_account, to_account) = if from_account_id < to_account_id {
            let from = account_repo::add_balance(&mut tx, from_account_id, -amount)
                .await?
                .ok_or(StoreError::AccountNotFound)?;
            let to = account_repo::add_balance(&mut tx, to_account_id, amount)
                .await?
                .ok_or(StoreError::AccountNotFound)?;
            (from, to)
        } else {
            let to = account_repo::add_balance(&mut tx, to_account_id, amount)
                .await?
                .ok_or(StoreError::AccountNotFound)?;
            let from = account_repo::add_balance(&mut tx, from_account_id, -amount)
                .await?
                .ok_or(StoreError::AccountNotFound)?;
            (from, to)
        };

        tx.commit().await?;
        debug!(target: "persistence", "committed transfer {}: {} from account {} to account {}",
            transfer.id, amount, from_account_id, to_account_id);

        Ok(TransferTxResult::builder()
            .transfer(transfer.into())
            .from_account(from_account.into())
            .to_account(to_account.into())
            .from_entry(from_entry.into())
            .to_entry(to_entry.into())
            .build())
    }
}
