use serde::{Deserialize, Serialize};

use ferrobank_persistence::DatabaseConfig;

/// Process-wide configuration, set once at startup. Environment keys map
/// directly: `DB_SOURCE`, `SERVER_ADDRESS`, `TOKEN_SYMMETRIC_KEY`,
/// `ACCESS_TOKEN_DURATION`, `REFRESH_TOKEN_DURATION`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_server_address")]
    pub server_address: String,
    pub db_source: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub token_symmetric_key: String,
    /// Access token lifetime, in seconds.
    #[serde(default = "default_access_token_duration")]
    pub access_token_duration: u64,
    /// Refresh token lifetime, in seconds.
    #[serde(default = "default_refresh_token_duration")]
    pub refresh_token_duration: u64,
}

fn default_server_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_access_token_duration() -> u64 {
    900
}

fn default_refresh_token_duration() -> u64 {
    86400
}
