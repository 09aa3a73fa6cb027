use std::fmt;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

use crate::Currency;

/// A single-currency balance owned by one user. An owner holds at most one
/// account per currency; the balance is only ever mutated by the transfer
/// transaction.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: Decimal,
    pub currency: Currency,
    pub created_at: OffsetDateTime,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "account {} ({}: {} {})", self.id, self.owner, self.balance, self.currency)
    }
}
