use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use typed_builder::TypedBuilder;

use ferrobank_auth::TokenMaker;
use ferrobank_core::prelude::*;

use crate::SessionError;

/// The full credential set minted at signup/login: a short-lived access
/// token and the long-lived refresh token backing the persisted session.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub access_token_expires_at: OffsetDateTime,
    pub refresh_token: String,
    pub refresh_token_expires_at: OffsetDateTime,
    pub session: Session,
}

#[derive(Clone, TypedBuilder)]
pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    token_maker: Arc<dyn TokenMaker>,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl SessionService {
    /// Issues an access+refresh pair and persists the session under the
    /// refresh payload id.
    pub async fn create(
        &self,
        username: &str,
        user_agent: &str,
        client_ip: &str,
    ) -> Result<SessionTokens, SessionError> {
        let (access_token, access_payload) = self.token_maker.create_token(username, self.access_token_ttl)?;
        let (refresh_token, refresh_payload) = self.token_maker.create_token(username, self.refresh_token_ttl)?;

        let session = self
            .sessions
            .create(
                NewSession::builder()
                    .id(refresh_payload.id)
                    .username(username.to_string())
                    .refresh_token(refresh_token.clone())
                    .user_agent(user_agent.to_string())
                    .client_ip(client_ip.to_string())
                    .expires_at(refresh_payload.expired_at)
                    .build(),
            )
            .await?;

        Ok(SessionTokens {
            access_token,
            access_token_expires_at: access_payload.expired_at,
            refresh_token,
            refresh_token_expires_at: refresh_payload.expired_at,
            session,
        })
    }

    /// Verifies the refresh token against its stored session and mints a
    /// fresh access token.
    pub async fn renew_access(&self, refresh_token: &str) -> Result<(String, OffsetDateTime), SessionError> {
        let payload = self.token_maker.verify_token(refresh_token)?;

        let session = self.sessions.get(payload.id).await?;
        if session.is_blocked {
            return Err(SessionError::BlockedSession);
        }
        if session.username != payload.username {
            return Err(SessionError::InvalidUser);
        }
        if session.refresh_token != refresh_token {
            return Err(SessionError::MismatchedRefreshToken);
        }
        if OffsetDateTime::now_utc() > session.expires_at {
            return Err(SessionError::ExpiredSession);
        }

        let (access_token, access_payload) = self.token_maker.create_token(&payload.username, self.access_token_ttl)?;
        Ok((access_token, access_payload.expired_at))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;
    use uuid::Uuid;

    use ferrobank_auth::{JwtTokenMaker, TokenError};

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn maker() -> Arc<dyn TokenMaker> {
        Arc::new(JwtTokenMaker::new(SECRET).unwrap())
    }

    fn service(sessions: MockSessionStore, token_maker: Arc<dyn TokenMaker>) -> SessionService {
        let sessions: Arc<dyn SessionStore> = Arc::new(sessions);
        SessionService::builder()
            .sessions(sessions)
            .token_maker(token_maker)
            .access_token_ttl(Duration::from_secs(900))
            .refresh_token_ttl(Duration::from_secs(86400))
            .build()
    }

    fn session_for(id: Uuid, username: &str, refresh_token: &str) -> Session {
        let now = OffsetDateTime::now_utc();
        Session::builder()
            .id(id)
            .username(username.to_string())
            .refresh_token(refresh_token.to_string())
            .user_agent("test-agent".to_string())
            .client_ip("127.0.0.1".to_string())
            .is_blocked(false)
            .expires_at(now + Duration::from_secs(86400))
            .created_at(now)
            .build()
    }

    #[test(tokio::test)]
    async fn create_persists_session_under_refresh_payload_id() {
        let token_maker = maker();
        let mut sessions = MockSessionStore::new();
        sessions.expect_create().returning(|new| {
            Ok(Session::builder()
                .id(new.id)
                .username(new.username)
                .refresh_token(new.refresh_token)
                .user_agent(new.user_agent)
                .client_ip(new.client_ip)
                .is_blocked(new.is_blocked)
                .expires_at(new.expires_at)
                .created_at(OffsetDateTime::now_utc())
                .build())
        });

        let svc = service(sessions, token_maker.clone());
        let tokens = svc.create("alice1", "test-agent", "127.0.0.1").await.unwrap();

        let refresh_payload = token_maker.verify_token(&tokens.refresh_token).unwrap();
        assert_eq!(tokens.session.id, refresh_payload.id);
        assert_eq!(tokens.session.refresh_token, tokens.refresh_token);
        assert!(!tokens.session.is_blocked);

        let access_payload = token_maker.verify_token(&tokens.access_token).unwrap();
        assert_eq!(access_payload.username, "alice1");
        let expected = OffsetDateTime::now_utc() + Duration::from_secs(900);
        assert!((tokens.access_token_expires_at - expected).abs() < time::Duration::seconds(1));
    }

    #[test(tokio::test)]
    async fn renew_mints_a_verifying_access_token() {
        let token_maker = maker();
        let (refresh_token, payload) = token_maker.create_token("alice1", Duration::from_secs(86400)).unwrap();

        let mut sessions = MockSessionStore::new();
        let stored = session_for(payload.id, "alice1", &refresh_token);
        sessions.expect_get().returning(move |_| Ok(stored.clone()));

        let svc = service(sessions, token_maker.clone());
        let (access_token, expires_at) = svc.renew_access(&refresh_token).await.unwrap();

        let access_payload = token_maker.verify_token(&access_token).unwrap();
        assert_eq!(access_payload.username, "alice1");
        let expected = OffsetDateTime::now_utc() + Duration::from_secs(900);
        assert!((expires_at - expected).abs() < time::Duration::seconds(1));
    }

    #[test(tokio::test)]
    async fn renew_rejects_invalid_refresh_token() {
        let svc = service(MockSessionStore::new(), maker());
        let err = svc.renew_access("garbage").await.unwrap_err();
        assert!(matches!(err, SessionError::Token(TokenError::Invalid)));
    }

    #[test(tokio::test)]
    async fn renew_rejects_unknown_session() {
        let token_maker = maker();
        let (refresh_token, _) = token_maker.create_token("alice1", Duration::from_secs(86400)).unwrap();

        let mut sessions = MockSessionStore::new();
        sessions.expect_get().returning(|_| Err(StoreError::SessionNotFound));

        let svc = service(sessions, token_maker);
        let err = svc.renew_access(&refresh_token).await.unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::SessionNotFound)));
    }

    #[test(tokio::test)]
    async fn renew_rejects_blocked_session() {
        let token_maker = maker();
        let (refresh_token, payload) = token_maker.create_token("alice1", Duration::from_secs(86400)).unwrap();

        let mut sessions = MockSessionStore::new();
        let mut stored = session_for(payload.id, "alice1", &refresh_token);
        stored.is_blocked = true;
        sessions.expect_get().returning(move |_| Ok(stored.clone()));

        let svc = service(sessions, token_maker);
        let err = svc.renew_access(&refresh_token).await.unwrap_err();
        assert!(matches!(err, SessionError::BlockedSession));
    }

    #[test(tokio::test)]
    async fn renew_rejects_foreign_session_user() {
        let token_maker = maker();
        let (refresh_token, payload) = token_maker.create_token("alice1", Duration::from_secs(86400)).unwrap();

        let mut sessions = MockSessionStore::new();
        let stored = session_for(payload.id, "mallory3", &refresh_token);
        sessions.expect_get().returning(move |_| Ok(stored.clone()));

        let svc = service(sessions, token_maker);
        let err = svc.renew_access(&refresh_token).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidUser));
    }

    #[test(tokio::test)]
    async fn renew_rejects_mismatched_refresh_token() {
        let token_maker = maker();
        let (refresh_token, payload) = token_maker.create_token("alice1", Duration::from_secs(86400)).unwrap();

        let mut sessions = MockSessionStore::new();
        let stored = session_for(payload.id, "alice1", "another-refresh-token");
        sessions.expect_get().returning(move |_| Ok(stored.clone()));

        let svc = service(sessions, token_maker);
        let err = svc.renew_access(&refresh_token).await.unwrap_err();
        assert!(matches!(err, SessionError::MismatchedRefreshToken));
    }

    #[test(tokio::test)]
    async fn renew_rejects_expired_session() {
        let token_maker = maker();
        let (refresh_token, payload) = token_maker.create_token("alice1", Duration::from_secs(86400)).unwrap();

        let mut sessions = MockSessionStore::new();
        let mut stored = session_for(payload.id, "alice1", &refresh_token);
        stored.expires_at = OffsetDateTime::now_utc() - time::Duration::hours(1);
        sessions.expect_get().returning(move |_| Ok(stored.clone()));

        let svc = service(sessions, token_maker);
        let err = svc.renew_access(&refresh_token).await.unwrap_err();
        assert!(matches!(err, SessionError::ExpiredSession));
    }
}
