use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;
use typed_builder::TypedBuilder;

use ferrobank_core::prelude::*;

use crate::TransferError;

/// Validates transfer preconditions, then hands off to the store's
/// transfer transaction.
#[derive(Clone, TypedBuilder)]
pub struct TransferService {
    accounts: Arc<dyn AccountStore>,
    transfers: Arc<dyn TransferStore>,
}

impl TransferService {
    pub async fn transfer(
        &self,
        from_username: &str,
        from_account_id: i64,
        to_account_id: i64,
        amount: &str,
    ) -> Result<TransferTxResult, TransferError> {
        let amount = money::parse(amount).map_err(|_| TransferError::InvalidAmount)?;
        if amount <= Decimal::ZERO {
            return Err(TransferError::NegativeAmount);
        }
        if from_account_id == to_account_id {
            return Err(TransferError::SameAccount);
        }

        let from_account = self.accounts.get(from_account_id).await?;
        if from_account.owner != from_username {
            return Err(TransferError::InvalidOwner);
        }
        if from_account.balance < amount {
            return Err(TransferError::InsufficientBalance);
        }

        let to_account = self.accounts.get(to_account_id).await?;
        if from_account.currency != to_account.currency {
            return Err(TransferError::CurrencyMismatch);
        }

        debug!(target: "service", "applying transfer of {} from account {} to account {}",
            amount, from_account_id, to_account_id);
        Ok(self.transfers.transfer(from_account_id, to_account_id, amount).await?)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rust_decimal::dec;
    use test_log::test;
    use time::OffsetDateTime;

    use super::*;

    fn test_account(id: i64, owner: &str, balance: Decimal, currency: Currency) -> Account {
        Account::builder()
            .id(id)
            .owner(owner.to_string())
            .balance(balance)
            .currency(currency)
            .created_at(OffsetDateTime::now_utc())
            .build()
    }

    fn service(accounts: MockAccountStore, transfers: MockTransferStore) -> TransferService {
        let accounts: Arc<dyn AccountStore> = Arc::new(accounts);
        let transfers: Arc<dyn TransferStore> = Arc::new(transfers);
        TransferService::builder().accounts(accounts).transfers(transfers).build()
    }

    #[test(tokio::test)]
    async fn rejects_malformed_amount() {
        let svc = service(MockAccountStore::new(), MockTransferStore::new());
        let err = svc.transfer("alice1", 1, 2, "abc").await.unwrap_err();
        assert!(matches!(err, TransferError::InvalidAmount));
    }

    #[test(tokio::test)]
    async fn rejects_non_positive_amounts() {
        let svc = service(MockAccountStore::new(), MockTransferStore::new());
        for amount in ["0", "-1"] {
            let err = svc.transfer("alice1", 1, 2, amount).await.unwrap_err();
            assert!(matches!(err, TransferError::NegativeAmount), "amount {amount:?}");
        }
    }

    #[test(tokio::test)]
    async fn rejects_transfer_to_same_account() {
        let svc = service(MockAccountStore::new(), MockTransferStore::new());
        let err = svc.transfer("alice1", 7, 7, "10").await.unwrap_err();
        assert!(matches!(err, TransferError::SameAccount));
    }

    #[test(tokio::test)]
    async fn rejects_foreign_owner() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_get()
            .with(eq(1))
            .returning(|_| Ok(test_account(1, "alice1", dec!(1000), Currency::Usd)));

        let svc = service(accounts, MockTransferStore::new());
        let err = svc.transfer("bob2", 1, 2, "100").await.unwrap_err();
        assert!(matches!(err, TransferError::InvalidOwner));
    }

    #[test(tokio::test)]
    async fn rejects_insufficient_balance() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_get()
            .with(eq(1))
            .returning(|_| Ok(test_account(1, "alice1", dec!(50), Currency::Usd)));

        let svc = service(accounts, MockTransferStore::new());
        let err = svc.transfer("alice1", 1, 2, "100").await.unwrap_err();
        assert!(matches!(err, TransferError::InsufficientBalance));
    }

    #[test(tokio::test)]
    async fn rejects_currency_mismatch() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_get()
            .with(eq(1))
            .returning(|_| Ok(test_account(1, "alice1", dec!(1000), Currency::Usd)));
        accounts
            .expect_get()
            .with(eq(3))
            .returning(|_| Ok(test_account(3, "bob2", dec!(1000), Currency::Eur)));

        let svc = service(accounts, MockTransferStore::new());
        let err = svc.transfer("alice1", 1, 3, "100").await.unwrap_err();
        assert!(matches!(err, TransferError::CurrencyMismatch));
    }

    #[test(tokio::test)]
    async fn propagates_missing_source_account() {
        let mut accounts = MockAccountStore::new();
        accounts.expect_get().with(eq(99)).returning(|_| Err(StoreError::AccountNotFound));

        let svc = service(accounts, MockTransferStore::new());
        let err = svc.transfer("alice1", 99, 2, "100").await.unwrap_err();
        assert!(matches!(err, TransferError::Store(StoreError::AccountNotFound)));
    }

    #[test(tokio::test)]
    async fn happy_path_delegates_to_the_transfer_transaction() {
        let mut accounts = MockAccountStore::new();
        accounts
            .expect_get()
            .with(eq(1))
            .returning(|_| Ok(test_account(1, "alice1", dec!(1000), Currency::Usd)));
        accounts
            .expect_get()
            .with(eq(2))
            .returning(|_| Ok(test_account(2, "bob2", dec!(1000), Currency::Usd)));

        let mut transfers = MockTransferStore::new();
        transfers
            .expect_transfer()
            .with(eq(1), eq(2), eq(dec!(100)))
            .returning(|from, to, amount| {
                let now = OffsetDateTime::now_utc();
                Ok(TransferTxResult::builder()
                    .transfer(
                        Transfer::builder()
                            .id(1)
                            .from_account_id(from)
                            .to_account_id(to)
                            .amount(amount)
                            .created_at(now)
                            .build(),
                    )
                    .from_account(test_account(from, "alice1", dec!(900), Currency::Usd))
                    .to_account(test_account(to, "bob2", dec!(1100), Currency::Usd))
                    .from_entry(Entry::builder().id(1).account_id(from).amount(-amount).created_at(now).build())
                    .to_entry(Entry::builder().id(2).account_id(to).amount(amount).created_at(now).build())
                    .build())
            });

        let svc = service(accounts, transfers);
        let result = svc.transfer("alice1", 1, 2, "100").await.unwrap();
        assert_eq!(result.from_account.balance, dec!(900));
        assert_eq!(result.to_account.balance, dec!(1100));
        assert_eq!(result.from_entry.amount, dec!(-100));
        assert_eq!(result.to_entry.amount, dec!(100));
    }
}
