//! Decryption of the `github_token` cookie.
//!
//! Cookie values are base64 encodings of a 12-byte AES-GCM nonce followed by
//! the ciphertext and tag. Both the standard and URL-safe alphabets are
//! accepted.

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, OsRng};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};

use crate::error::ServiceError;
use crate::github::locator::AccessToken;

/// Required AES-256 key length in bytes.
pub const COOKIE_KEY_LENGTH: usize = 32;

const NONCE_LENGTH: usize = 12;

/// Turns an opaque cookie value into a GitHub bearer token.
pub trait TokenDecryptor: Send + Sync {
    /// Decrypts `sealed`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidToken`] when the value cannot be decoded
    /// or authenticated.
    fn decrypt(&self, sealed: &str) -> Result<AccessToken, ServiceError>;
}

/// AES-256-GCM implementation of [`TokenDecryptor`].
#[derive(Clone)]
pub struct AesGcmTokenDecryptor {
    cipher: Aes256Gcm,
}

impl AesGcmTokenDecryptor {
    /// Creates a decryptor from a raw 32-byte key.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] when the key is not 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, ServiceError> {
        let cipher =
            Aes256Gcm::new_from_slice(key).map_err(|_invalid| ServiceError::Configuration {
                message: format!(
                    "cookie key must be {COOKIE_KEY_LENGTH} bytes, got {}",
                    key.len()
                ),
            })?;
        Ok(Self { cipher })
    }

    /// Seals a token into a cookie value accepted by [`TokenDecryptor::decrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Encode`] if encryption fails.
    pub fn encrypt(&self, token: &AccessToken) -> Result<String, ServiceError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, token.value().as_bytes())
            .map_err(|error| ServiceError::Encode {
                what: "token cookie".to_owned(),
                message: error.to_string(),
            })?;
        let mut sealed = nonce.to_vec();
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }
}

impl std::fmt::Debug for AesGcmTokenDecryptor {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AesGcmTokenDecryptor(***)")
    }
}

fn invalid(message: &str) -> ServiceError {
    ServiceError::InvalidToken {
        message: message.to_owned(),
    }
}

impl TokenDecryptor for AesGcmTokenDecryptor {
    fn decrypt(&self, sealed: &str) -> Result<AccessToken, ServiceError> {
        let trimmed = sealed.trim();
        let raw = STANDARD
            .decode(trimmed)
            .or_else(|_standard| URL_SAFE.decode(trimmed))
            .map_err(|_decode| invalid("cookie is not base64"))?;
        let (nonce, ciphertext) = raw
            .split_at_checked(NONCE_LENGTH)
            .ok_or_else(|| invalid("cookie is shorter than a nonce"))?;
        let plaintext = self
            .cipher
            .decrypt(Nonce::<Aes256Gcm>::from_slice(nonce), ciphertext)
            .map_err(|_aead| invalid("cookie failed authentication"))?;
        let token =
            String::from_utf8(plaintext).map_err(|_utf8| invalid("token is not UTF-8"))?;
        AccessToken::new(token).map_err(|_blank| invalid("token is blank"))
    }
}
