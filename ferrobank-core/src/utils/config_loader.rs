use std::env;

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Layered configuration: optional `<CONFIG_DIR>/<RUN_MODE>.yaml` plus an
/// optional secrets overlay, with plain environment variables on top
/// (`DB_SOURCE`, `SERVER_ADDRESS`, `TOKEN_SYMMETRIC_KEY`, ...).
pub fn load<T: DeserializeOwned>() -> T {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "dev".into());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "configs".into());

    let config = Config::builder()
        .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
        .add_source(File::with_name(&format!("{}/{}_secrets", config_dir, run_mode)).required(false))
        .add_source(Environment::default())
        .build()
        .expect("Failed to build configuration");

    debug!("Loading configuration from: {}", config_dir);

    match config.try_deserialize::<T>() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {:?}", e);
            panic!("Failed to load configuration.");
        }
    }
}
