use rust_decimal::Decimal;
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

/// One side of a double-entry record for a single account. Negative for the
/// debited account, positive for the credited one. Append-only.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub created_at: OffsetDateTime,
}
