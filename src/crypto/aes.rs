use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The size of the AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;
/// The size of the CBC initialization vector in bytes.
pub const IV_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Low-level cipher failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// The IV (or key) has the wrong length.
    #[error("invalid key or IV length")]
    InvalidLength,
    /// The ciphertext is not block aligned or its padding is wrong.
    #[error("invalid ciphertext or padding")]
    Unpad,
}

/// A secure key wrapper that ensures the key is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecureKey([u8; KEY_SIZE]);

impl SecureKey {
    /// Creates a new `SecureKey` from a byte array.
    ///
    /// # Arguments
    ///
    /// * `key` - A 32-byte array representing the AES-256 key.
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self(key)
    }

    /// Derives an AES-256 key from an arbitrary-length secret with SHA-256.
    ///
    /// # Arguments
    ///
    /// * `secret` - The configured secret, of any length.
    pub fn derive(secret: &str) -> Self {
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&Sha256::digest(secret.as_bytes()));
        Self(key)
    }

    /// Returns a reference to the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Generates a new random CBC initialization vector.
///
/// # Returns
///
/// A 16-byte array from the OS random number generator.
pub fn generate_iv() -> [u8; IV_SIZE] {
    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypts a plaintext using AES-256-CBC with PKCS#7 padding.
///
/// # Arguments
///
/// * `key` - The AES-256 key.
/// * `plaintext` - The data to encrypt.
///
/// # Returns
///
/// A tuple containing the ciphertext and the IV used for encryption.
pub fn encrypt(key: &SecureKey, plaintext: &[u8]) -> (Vec<u8>, [u8; IV_SIZE]) {
    let iv = generate_iv();
    let ciphertext =
        Aes256CbcEnc::new(key.as_bytes().into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    (ciphertext, iv)
}

/// Decrypts a ciphertext using AES-256-CBC with PKCS#7 padding.
///
/// # Arguments
///
/// * `key` - The AES-256 key.
/// * `ciphertext` - The data to decrypt.
/// * `iv` - The IV used for encryption; must be 16 bytes.
///
/// # Returns
///
/// The decrypted plaintext, or a `CipherError` for a bad IV length,
/// unaligned ciphertext or invalid padding.
pub fn decrypt(key: &SecureKey, ciphertext: &[u8], iv: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| CipherError::InvalidLength)?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::Unpad)
}
