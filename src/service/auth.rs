//! Password hashing and credential checks for staff accounts.

use crate::error::AppError;
use crate::model::User;
use crate::store::CatalogStore;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

/// Verified against when no usable account exists, so a miss costs the same
/// Argon2 work as a wrong password.
fn dummy_hash() -> Result<&'static str, AppError> {
    static DUMMY: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DUMMY.get() {
        return Ok(hash.as_str());
    }
    let hash = hash_password("somemart-unused-account")?;
    Ok(DUMMY.get_or_init(|| hash).as_str())
}

/// Hash a plain-text password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".into()));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// Check `password` against a stored PHC string. A malformed stored hash is an internal error.
pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("invalid stored password hash: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("password verification failed: {}", e))),
    }
}

/// Look up an active account and check its password. `None` means the
/// credentials do not identify anyone; the caller decides how to reject.
pub async fn authenticate(
    store: &dyn CatalogStore,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = match store.find_user(username).await? {
        Some(user) if user.is_active => user,
        _ => {
            verify_password(dummy_hash()?, password)?;
            return Ok(None);
        }
    };
    if verify_password(&user.password_hash, password)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Create or update a staff account with a freshly hashed password.
pub async fn ensure_staff_user(store: &dyn CatalogStore, username: &str, password: &str) -> Result<i64, AppError> {
    let hash = hash_password(password)?;
    let id = store.upsert_user(username, &hash, true).await?;
    tracing::info!(username, "staff account ready");
    Ok(id)
}
