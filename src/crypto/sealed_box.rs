use crate::error::CryptoError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, KEY_SIZE};

/// Bytes a sealed box adds on top of the plaintext: a 32-byte ephemeral
/// public key plus a 16-byte authentication tag
pub const SEALED_BOX_OVERHEAD: usize = 48;

/// Decode a base64-encoded X25519 public key as served by the secrets API
pub fn decode_public_key(encoded: &str) -> Result<PublicKey, CryptoError> {
    let raw = STANDARD
        .decode(encoded)
        .map_err(|_| CryptoError::InvalidPublicKey)?;

    let bytes: [u8; KEY_SIZE] = raw
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength { length: raw.len() })?;

    Ok(PublicKey::from(bytes))
}

/// Seal a plaintext against a repository public key
///
/// Produces an anonymous sealed box: an ephemeral key pair is generated per
/// call, so sealing the same value twice never yields the same ciphertext.
/// The result is base64-encoded, ready for the secrets-update payload.
///
/// # Arguments
/// * `recipient_key` - Base64-encoded public key of the repository
/// * `plaintext` - The raw secret value to protect
///
/// # Returns
/// * `Ok(String)` - Base64-encoded ciphertext
/// * `Err(CryptoError)` - Error if the key is malformed or sealing fails
pub fn seal(recipient_key: &str, plaintext: &[u8]) -> Result<String, CryptoError> {
    let public_key = decode_public_key(recipient_key)?;

    let sealed = public_key
        .seal(&mut OsRng, plaintext)
        .map_err(|_| CryptoError::SealFailed)?;

    Ok(STANDARD.encode(sealed))
}
