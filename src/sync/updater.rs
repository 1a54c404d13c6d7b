use crate::crypto::sealed_box;
use crate::error::AppError;
use crate::github::{EncryptedSecret, GitHubClient};
use crate::security::SecureString;
use tracing::debug;

/// Result of pushing a new secret value to one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The API confirmed the write with 201 or 204
    Updated,
    /// The API answered with any other status
    Failed,
    /// No public key was available, so the repository was skipped
    MissingPublicKey,
}

/// Seal the value against the repository public key and write the secret
///
/// A repository without a readable public key is skipped, not failed: the
/// token simply lacks admin access there. A key that cannot be decoded is a
/// different matter and aborts with a `CryptoError`.
pub async fn update_repository_secret(
    client: &GitHubClient,
    full_name: &str,
    secret_name: &str,
    value: &SecureString,
) -> Result<UpdateOutcome, AppError> {
    let key = match client.get_repository_public_key(full_name).await? {
        Some(key) => key,
        None => {
            debug!("No public key for {}, skipping", full_name);
            return Ok(UpdateOutcome::MissingPublicKey);
        }
    };

    let payload = EncryptedSecret {
        encrypted_value: sealed_box::seal(&key.key, value.as_bytes())?,
        key_id: key.key_id,
    };

    let updated = client
        .put_repository_secret(full_name, secret_name, &payload)
        .await?;

    if updated {
        Ok(UpdateOutcome::Updated)
    } else {
        Ok(UpdateOutcome::Failed)
    }
}
