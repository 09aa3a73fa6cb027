use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{error::ErrorKind, FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

use ferrobank_core::prelude::*;

#[derive(Debug, FromRow)]
pub struct AccountDTO {
    pub id: i64,
    pub owner: String,
    pub balance: Decimal,
    pub currency: Currency,
    pub created_at: OffsetDateTime,
}

impl From<AccountDTO> for Account {
    fn from(dto: AccountDTO) -> Self {
        Self {
            id: dto.id,
            owner: dto.owner,
            balance: dto.balance,
            currency: dto.currency,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct AccountRepo {
    pool: PgPool,
}

/// Atomic `balance <- balance + delta`; the UPDATE takes the row lock. Shared
/// with the transfer transaction, which runs it against its own connection.
pub(crate) async fn add_balance(
    conn: &mut PgConnection,
    id: i64,
    delta: Decimal,
) -> Result<Option<AccountDTO>, sqlx::Error> {
    sqlx::query_as::<_, AccountDTO>(
        r#"
        UPDATE accounts
        SET balance = balance + $1
        WHERE id = $2
        RETURNING id, owner, balance, currency, created_at
        "#,
    )
    .bind(delta)
    .bind(id)
    .fetch_optional(conn)
    .await
}

fn classify_create(err: sqlx::Error) -> StoreError {
    let kind = match &err {
        sqlx::Error::Database(db) => Some(db.kind()),
        _ => None,
    };
    match kind {
        Some(ErrorKind::ForeignKeyViolation) => StoreError::OwnerNotFound,
        Some(ErrorKind::UniqueViolation) => StoreError::CurrencyAlreadyExists,
        _ => StoreError::Internal(err),
    }
}

#[async_trait]
impl AccountStore for AccountRepo {
    async fn create(&self, owner: &str, balance: Decimal, currency: Currency) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, AccountDTO>(
            r#"
            INSERT INTO accounts (owner, balance, currency)
            VALUES ($1, $2, $3)
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(owner)
        .bind(balance)
        .bind(currency)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_create)?;
        Ok(account.into())
    }

    async fn get(&self, id: i64) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, AccountDTO>(
            r#"
            SELECT id, owner, balance, currency, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match account {
            Some(account) => Ok(account.into()),
            None => Err(StoreError::AccountNotFound),
        }
    }

    async fn list(&self, owner: &str, limit: i64, offset: i64) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, AccountDTO>(
            r#"
            SELECT id, owner, balance, currency, created_at
            FROM accounts
            WHERE owner = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts.into_iter().map(Account::from).collect())
    }

    async fn add_balance(&self, id: i64, delta: Decimal) -> Result<Account, StoreError> {
        let mut conn = self.pool.acquire().await?;
        match add_balance(&mut conn, id, delta).await? {
            Some(account) => Ok(account.into()),
            None => Err(StoreError::AccountNotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::AccountNotFound);
        }
        Ok(())
    }
}
