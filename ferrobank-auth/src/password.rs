use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::PasswordError;

pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

pub fn verify(password: &str, hashed: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hashed).map_err(|_| PasswordError::Hash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn hash_verify_round_trip() {
        let hashed = hash("s3cret-pass").unwrap();
        assert_ne!(hashed, "s3cret-pass");
        verify("s3cret-pass", &hashed).unwrap();
    }

    #[test]
    fn rejects_wrong_password() {
        let hashed = hash("s3cret-pass").unwrap();
        assert_eq!(verify("other-pass", &hashed).unwrap_err(), PasswordError::Mismatch);
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(hash("same").unwrap(), hash("same").unwrap());
    }
}
