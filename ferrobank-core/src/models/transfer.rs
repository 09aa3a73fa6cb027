use std::fmt;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

use crate::{Account, Entry};

/// An atomic movement of money between two same-currency accounts.
/// Append-only; the amount is strictly positive.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: Decimal,
    pub created_at: OffsetDateTime,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "transfer {}: {} from account {} to account {}",
            self.id, self.amount, self.from_account_id, self.to_account_id
        )
    }
}

/// Everything a committed transfer transaction produced: the transfer row,
/// both ledger entries and both account post-images. Accounts are labelled
/// by role, not by the order their row locks were taken.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}
