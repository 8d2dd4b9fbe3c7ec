use actix_web::web;

use crate::error::{AppError, Result};

/// Hash a password with bcrypt (random salt embedded in the output).
///
/// Runs on the blocking thread pool; bcrypt is deliberately slow.
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_owned();
    web::block(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {e}")))?
        .map_err(AppError::from)
}

/// Check a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();
    match web::block(move || bcrypt::verify(password, &hash)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            tracing::warn!("Stored password hash could not be verified: {e}");
            false
        }
        Err(e) => {
            tracing::error!("Blocking task failed while verifying password: {e}");
            false
        }
    }
}
