//! Argon2 password hashing for the admin credential

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::utils::{AppError, AppResult};

/// Hash a password into a PHC string (`$argon2id$...`)
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC string; a malformed hash never verifies
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`verify_password`] on the blocking thread pool
pub async fn verify_password_blocking(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password check failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("S3cret", &hash));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("s3cret", "not-a-phc-string"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_blocking_verify_on_single_thread_runtime() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password_blocking("s3cret".into(), hash.clone()).await.unwrap());
        assert!(!verify_password_blocking("nope".into(), hash).await.unwrap());
        assert!(!verify_password_blocking("s3cret".into(), "bad".into()).await.unwrap());
    }
}
