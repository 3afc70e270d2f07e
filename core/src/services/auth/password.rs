//! Password hashing on the blocking thread pool

use crate::errors::Failure;

/// Hash `password` with bcrypt at `cost`
pub async fn hash_password(password: String, cost: u32) -> Result<String, Failure> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(anyhow::Error::from)?
        .map_err(anyhow::Error::from)?;
    Ok(hash)
}

/// Check `password` against a stored bcrypt hash
pub async fn verify_password(password: String, hash: String) -> Result<bool, Failure> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(anyhow::Error::from)?
        .map_err(anyhow::Error::from)?;
    Ok(matches)
}
