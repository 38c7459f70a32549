use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{
    db::Directory,
    domain::{Account, Email, Password},
    services::ServiceError,
};

fn hash_password(password: &Password, hasher: &Argon2<'_>) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|_| anyhow!("failed to hash password"))?;

    Ok(hash.to_string())
}

/// Returns None when the email is already taken.
#[tracing::instrument(name = "services::create_account", skip_all)]
pub async fn create_account(
    email: Email,
    password: Password,
    display_name: &str,
    hasher: &Argon2<'_>,
    directory: &dyn Directory,
) -> Result<Option<Account>, ServiceError> {
    let hash = hash_password(&password, hasher)?;

    let rec_opt = directory
        .create_user(email.as_str(), display_name, &hash)
        .await?;

    Ok(rec_opt.map(|rec| Account::new(rec.id, rec.email, rec.display_name)))
}

/// Verifies credentials against the stored hash. Takes the raw password:
/// strength rules only apply when an account is created.
#[tracing::instrument(name = "services::authenticate", skip_all)]
pub async fn authenticate(
    email: Email,
    password: &str,
    hasher: &Argon2<'_>,
    directory: &dyn Directory,
) -> Result<Account, ServiceError> {
    let rec = directory.user_by_email(email.as_str()).await?;

    let Some(rec) = rec else {
        return Err(ServiceError::AuthError);
    };

    let hash = PasswordHash::new(&rec.password_hash)
        .map_err(|e| anyhow::anyhow!("invalid password hash: {e}"))
        .map_err(ServiceError::Other)?;

    if hasher
        .verify_password(password.as_bytes(), &hash)
        .is_err()
    {
        return Err(ServiceError::AuthError);
    }

    Ok(Account::new(rec.id, rec.email, rec.display_name))
}
