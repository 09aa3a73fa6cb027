use std::sync::Arc;

use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use ferrobank_core::prelude::*;

use crate::AccountError;

#[derive(Clone, TypedBuilder)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

impl AccountService {
    /// New accounts open with a zero balance; money only enters through
    /// transfers.
    pub async fn create(&self, owner: &str, currency: Currency) -> Result<Account, AccountError> {
        Ok(self.accounts.create(owner, Decimal::ZERO, currency).await?)
    }

    pub async fn get(&self, id: i64, requester: &str) -> Result<Account, AccountError> {
        let account = self.accounts.get(id).await?;
        if account.owner != requester {
            return Err(AccountError::OwnerMismatch);
        }
        Ok(account)
    }

    /// Pages are 1-based: `offset = (page_id - 1) * page_size`.
    pub async fn list(&self, owner: &str, page_id: i64, page_size: i64) -> Result<Vec<Account>, AccountError> {
        let offset = (page_id - 1) * page_size;
        Ok(self.accounts.list(owner, page_size, offset).await?)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rust_decimal::dec;
    use test_log::test;
    use time::OffsetDateTime;

    use super::*;

    fn test_account(id: i64, owner: &str) -> Account {
        Account::builder()
            .id(id)
            .owner(owner.to_string())
            .balance(dec!(0))
            .currency(Currency::Usd)
            .created_at(OffsetDateTime::now_utc())
            .build()
    }

    fn service(accounts: MockAccountStore) -> AccountService {
        let accounts: Arc<dyn AccountStore> = Arc::new(accounts);
        AccountService::builder().accounts(accounts).build()
    }

    #[test(tokio::test)]
    async fn creates_with_zero_balance() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_create()
            .with(eq("alice1"), eq(Decimal::ZERO), eq(Currency::Usd))
            .returning(|_, _, _| Ok(test_account(1, "alice1")));

        let account = service(accounts).create("alice1", Currency::Usd).await.unwrap();
        assert_eq!(account.id, 1);
        assert_eq!(account.balance, dec!(0));
    }

    #[test(tokio::test)]
    async fn get_rejects_foreign_owner() {
        let mut accounts = MockAccountStore::new();
        accounts.expect_get().with(eq(1)).returning(|_| Ok(test_account(1, "alice1")));

        let err = service(accounts).get(1, "bob2").await.unwrap_err();
        assert!(matches!(err, AccountError::OwnerMismatch));
    }

    #[test(tokio::test)]
    async fn list_translates_pages_to_offsets() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_list()
            .with(eq("alice1"), eq(5), eq(10))
            .returning(|_, _, _| Ok(vec![test_account(1, "alice1")]));

        let listed = service(accounts).list("alice1", 3, 5).await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
