use std::sync::Arc;

use typed_builder::TypedBuilder;

use ferrobank_auth::password;
use ferrobank_core::prelude::*;

use crate::UserError;

#[derive(Clone, TypedBuilder)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        email: &str,
    ) -> Result<User, UserError> {
        let hashed_password = password::hash(password)?;
        Ok(self
            .users
            .create(
                NewUser::builder()
                    .username(username.to_string())
                    .hashed_password(hashed_password)
                    .full_name(full_name.to_string())
                    .email(email.to_string())
                    .build(),
            )
            .await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, UserError> {
        let user = self.users.get(username).await?;
        password::verify(password, &user.hashed_password).map_err(|_| UserError::WrongPassword)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;
    use time::OffsetDateTime;

    use super::*;

    fn stored_user(username: &str, raw_password: &str) -> User {
        User::builder()
            .username(username.to_string())
            .hashed_password(password::hash(raw_password).unwrap())
            .full_name("Test User".to_string())
            .email(format!("{username}@example.com"))
            .created_at(OffsetDateTime::now_utc())
            .build()
    }

    fn service(users: MockUserStore) -> UserService {
        let users: Arc<dyn UserStore> = Arc::new(users);
        UserService::builder().users(users).build()
    }

    #[test(tokio::test)]
    async fn create_stores_a_verifiable_hash() {
        let mut users = MockUserStore::new();
        users
            .expect_create()
            .withf(|new| {
                new.hashed_password != "pass1234" && password::verify("pass1234", &new.hashed_password).is_ok()
            })
            .returning(|new| {
                Ok(User::builder()
                    .username(new.username)
                    .hashed_password(new.hashed_password)
                    .full_name(new.full_name)
                    .email(new.email)
                    .created_at(OffsetDateTime::now_utc())
                    .build())
            });

        let user = service(users)
            .create("alice1", "pass1234", "Alice One", "alice1@example.com")
            .await
            .unwrap();
        assert_eq!(user.username, "alice1");
    }

    #[test(tokio::test)]
    async fn login_accepts_the_right_password() {
        let mut users = MockUserStore::new();
        users.expect_get().returning(|_| Ok(stored_user("alice1", "pass1234")));

        let user = service(users).login("alice1", "pass1234").await.unwrap();
        assert_eq!(user.username, "alice1");
    }

    #[test(tokio::test)]
    async fn login_rejects_a_wrong_password() {
        let mut users = MockUserStore::new();
        users.expect_get().returning(|_| Ok(stored_user("alice1", "pass1234")));

        let err = service(users).login("alice1", "nope").await.unwrap_err();
        assert!(matches!(err, UserError::WrongPassword));
    }

    #[test(tokio::test)]
    async fn login_propagates_unknown_user() {
        let mut users = MockUserStore::new();
        users.expect_get().returning(|_| Err(StoreError::UserNotFound));

        let err = service(users).login("ghost9", "pass1234").await.unwrap_err();
        assert!(matches!(err, UserError::Store(StoreError::UserNotFound)));
    }
}
