//! Identifier guard: turns a video identifier into an opaque
//! `<iv-hex>:<ciphertext-hex>` token and back.

use chrono::Utc;
use thiserror::Error;

use crate::crypto::aes::{self, CipherError, IV_SIZE, SecureKey};
use crate::crypto::checksum::descriptor_checksum;
use crate::error::{AppError, Result};
use crate::models::token::GuardedDescriptor;

/// Separator between the IV and the ciphertext in a token.
pub const TOKEN_SEPARATOR: char = ':';

/// Why a token was rejected. Never shown to clients.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuardError {
    /// No `:` between the IV and the ciphertext.
    #[error("token has no separator")]
    MissingSeparator,
    /// Either half is not hex.
    #[error("token is not valid hex")]
    InvalidHex,
    /// The IV decoded to the wrong number of bytes.
    #[error("IV must be 16 bytes, got {0}")]
    InvalidIvLength(usize),
    /// Unaligned ciphertext or bad padding.
    #[error("cipher rejected the token: {0}")]
    Cipher(#[from] CipherError),
    /// Decryption succeeded but the bytes are not a string.
    #[error("plaintext is not UTF-8")]
    NotUtf8,
}

/// Encrypts and decrypts video identifiers with the process-wide key.
pub struct IdentifierGuard {
    key: SecureKey,
}

impl IdentifierGuard {
    /// Builds a guard whose key is derived from `secret`.
    ///
    /// # Arguments
    ///
    /// * `secret` - The configured secret; hashed with SHA-256 into the key.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            key: SecureKey::derive(secret),
        }
    }

    /// Encrypts `plaintext` under a fresh random IV.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - A non-empty identifier.
    ///
    /// # Returns
    ///
    /// A `<iv-hex>:<ciphertext-hex>` token, different on every call.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Err(AppError::Encryption("Refusing to encrypt an empty identifier".to_string()));
        }

        let (ciphertext, iv) = aes::encrypt(&self.key, plaintext.as_bytes());
        Ok(format!(
            "{}{}{}",
            hex::encode(iv),
            TOKEN_SEPARATOR,
            hex::encode(ciphertext)
        ))
    }

    /// Decrypts a token produced by [`IdentifierGuard::encrypt`].
    ///
    /// # Arguments
    ///
    /// * `token` - The `<iv-hex>:<ciphertext-hex>` string, taken verbatim.
    ///
    /// # Returns
    ///
    /// The plaintext, or a `GuardError` naming why the token was rejected.
    pub fn decrypt(&self, token: &str) -> std::result::Result<String, GuardError> {
        let (iv_hex, ciphertext_hex) = token
            .split_once(TOKEN_SEPARATOR)
            .ok_or(GuardError::MissingSeparator)?;

        let iv = hex::decode(iv_hex).map_err(|_| GuardError::InvalidHex)?;
        if iv.len() != IV_SIZE {
            return Err(GuardError::InvalidIvLength(iv.len()));
        }
        let ciphertext = hex::decode(ciphertext_hex).map_err(|_| GuardError::InvalidHex)?;

        let plaintext = aes::decrypt(&self.key, &ciphertext, &iv)?;
        String::from_utf8(plaintext).map_err(|_| GuardError::NotUtf8)
    }

    /// Encrypts `plaintext` and stamps the result with the issue time and a
    /// checksum.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - A non-empty identifier.
    ///
    /// # Returns
    ///
    /// A `GuardedDescriptor` carrying the token, timestamp and checksum.
    pub fn issue_descriptor(&self, plaintext: &str) -> Result<GuardedDescriptor> {
        let token = self.encrypt(plaintext)?;
        let timestamp = Utc::now().timestamp_millis();
        let checksum = descriptor_checksum(&token, timestamp);

        Ok(GuardedDescriptor {
            encrypted_video_id: token.clone(),
            token,
            timestamp,
            checksum,
        })
    }
}
