use serde::{Deserialize, Serialize};
use sqlx::Type;
use strum::{Display, EnumString};

/// The closed set of currencies the bank supports. Extending it means a new
/// enum variant plus a migration on the `currency` database type.
#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[sqlx(type_name = "currency", rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Rmb,
}

impl Currency {
    pub fn is_supported(code: &str) -> bool {
        code.parse::<Currency>().is_ok()
    }
}
