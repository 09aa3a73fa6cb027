use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::{Account, Currency, Entry, Session, StoreError, Transfer, TransferTxResult, User};

#[derive(Debug, Clone, TypedBuilder)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct NewSession {
    pub id: Uuid,
    pub username: String,
    pub refresh_token: String,
    pub user_agent: String,
    pub client_ip: String,
    #[builder(default = false)]
    pub is_blocked: bool,
    pub expires_at: OffsetDateTime,
}

#[automock]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn get(&self, username: &str) -> Result<User, StoreError>;
}

#[automock]
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, owner: &str, balance: Decimal, currency: Currency) -> Result<Account, StoreError>;
    async fn get(&self, id: i64) -> Result<Account, StoreError>;
    /// Pages are translated to `LIMIT`/`OFFSET` by the caller; rows come back
    /// ordered by id ascending.
    async fn list(&self, owner: &str, limit: i64, offset: i64) -> Result<Vec<Account>, StoreError>;
    /// Atomic `balance <- balance + delta`, returns the post-image. The delta
    /// may be negative.
    async fn add_balance(&self, id: i64, delta: Decimal) -> Result<Account, StoreError>;
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[automock]
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn create(&self, account_id: i64, amount: Decimal) -> Result<Entry, StoreError>;
    async fn get(&self, id: i64) -> Result<Entry, StoreError>;
    async fn list(&self, account_id: i64, limit: i64, offset: i64) -> Result<Vec<Entry>, StoreError>;
}

#[automock]
#[async_trait]
pub trait TransferStore: Send + Sync {
    async fn create(&self, from_account_id: i64, to_account_id: i64, amount: Decimal)
        -> Result<Transfer, StoreError>;
    async fn get(&self, id: i64) -> Result<Transfer, StoreError>;
    /// Rows where `from_account_id` matches `from` or `to_account_id` matches
    /// `to`, ordered by id.
    async fn list(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, StoreError>;
    /// The transfer transaction: inserts the transfer row and both entries,
    /// applies both balance deltas under row locks taken in ascending
    /// account-id order, all inside one database transaction.
    async fn transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: Decimal,
    ) -> Result<TransferTxResult, StoreError>;
}

#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: NewSession) -> Result<Session, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Session, StoreError>;
}
