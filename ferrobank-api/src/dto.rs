use serde::Serialize;
use time::OffsetDateTime;

use ferrobank_core::prelude::*;

/// Wire representations. Amounts cross the boundary as canonical decimal
/// strings; the hashed password never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountDto {
    pub id: i64,
    pub owner: String,
    pub balance: String,
    pub currency: Currency,
    pub created_at: OffsetDateTime,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            owner: account.owner,
            balance: money::render(account.balance),
            currency: account.currency,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryDto {
    pub id: i64,
    pub account_id: i64,
    pub amount: String,
    pub created_at: OffsetDateTime,
}

impl From<Entry> for EntryDto {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            account_id: entry.account_id,
            amount: money::render(entry.amount),
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransferDto {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: String,
    pub created_at: OffsetDateTime,
}

impl From<Transfer> for TransferDto {
    fn from(transfer: Transfer) -> Self {
        Self {
            id: transfer.id,
            from_account_id: transfer.from_account_id,
            to_account_id: transfer.to_account_id,
            amount: money::render(transfer.amount),
            created_at: transfer.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransferTxDto {
    pub transfer: TransferDto,
    pub from_account: AccountDto,
    pub to_account: AccountDto,
    pub from_entry: EntryDto,
    pub to_entry: EntryDto,
}

impl From<TransferTxResult> for TransferTxDto {
    fn from(result: TransferTxResult) -> Self {
        Self {
            transfer: result.transfer.into(),
            from_account: result.from_account.into(),
            to_account: result.to_account.into(),
            from_entry: result.from_entry.into(),
            to_entry: result.to_entry.into(),
        }
    }
}
