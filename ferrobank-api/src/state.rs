use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use ferrobank_auth::{JwtTokenMaker, TokenError, TokenMaker};
use ferrobank_core::prelude::*;
use ferrobank_persistence::{AccountRepo, SessionRepo, TransferRepo, UserRepo};
use ferrobank_service::prelude::*;

use crate::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub accounts: AccountService,
    pub transfers: TransferService,
    pub sessions: SessionService,
    pub token_maker: Arc<dyn TokenMaker>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &ApiConfig) -> Result<Self, TokenError> {
        let token_maker: Arc<dyn TokenMaker> = Arc::new(JwtTokenMaker::new(&config.token_symmetric_key)?);

        let users: Arc<dyn UserStore> = Arc::new(UserRepo::builder().pool(pool.clone()).build());
        let accounts: Arc<dyn AccountStore> = Arc::new(AccountRepo::builder().pool(pool.clone()).build());
        let transfers: Arc<dyn TransferStore> = Arc::new(TransferRepo::builder().pool(pool.clone()).build());
        let sessions: Arc<dyn SessionStore> = Arc::new(SessionRepo::builder().pool(pool).build());

        Ok(Self {
            users: UserService::builder().users(users).build(),
            accounts: AccountService::builder().accounts(accounts.clone()).build(),
            transfers: TransferService::builder().accounts(accounts).transfers(transfers).build(),
            sessions: SessionService::builder()
                .sessions(sessions)
                .token_maker(token_maker.clone())
                .access_token_ttl(Duration::from_secs(config.access_token_duration))
                .refresh_token_ttl(Duration::from_secs(config.refresh_token_duration))
                .build(),
            token_maker,
        })
    }
}
