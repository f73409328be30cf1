// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-256-GCM channel keyed from an agreed secret
//!
//! **Cipher Text Format**:
//! ```text
//! [nonce (12 bytes) | ciphertext+tag (variable length)]
//! ```
//!
//! - Nonce: fresh from the OS random source on every `encrypt` call
//! - Ciphertext+Tag: GCM seal output, 16-byte authentication tag appended
//! - No Additional Authenticated Data (AAD)
//!
//! **Key Normalization**: the raw secret is cut to its first 32 bytes, or
//! right-padded with zero bytes up to 32. This fixes the length only; it is
//! not a key-derivation function and adds no entropy.

use aes_gcm::{
    aead::{generic_array::typenum::Unsigned, Aead, AeadCore, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use elliptic_curve::rand_core::CryptoRngCore;
use rand::rngs::OsRng;
use subtle::{Choice, ConstantTimeEq};
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::{CryptoError, Result};
use super::symmetric::{SymmetricDecrypter, SymmetricEncrypter};

/// AES-256 key size in bytes
pub const KEY_SIZE: usize = 32;

/// Nonce size required by the GCM construction
pub const NONCE_SIZE: usize = <<Aes256Gcm as AeadCore>::NonceSize as Unsigned>::USIZE;

/// Authentication tag size appended by the GCM construction
pub const TAG_SIZE: usize = <<Aes256Gcm as AeadCore>::TagSize as Unsigned>::USIZE;

/// Fixed-length AES-256 key normalized from an arbitrary-length secret
///
/// Equality runs in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey([u8; KEY_SIZE]);

impl CipherKey {
    /// Normalize `secret` to exactly [`KEY_SIZE`] bytes.
    ///
    /// Longer secrets keep their first 32 bytes; shorter ones are padded with
    /// trailing zeros. Applying it to an already-normalized key is a no-op.
    pub fn normalize(secret: &[u8]) -> Self {
        let mut key = [0u8; KEY_SIZE];
        let len = secret.len().min(KEY_SIZE);
        key[..len].copy_from_slice(&secret[..len]);
        Self(key)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    fn cipher(&self) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.0).map_err(|e| CryptoError::CipherInit(e.to_string()))
    }
}

impl ConstantTimeEq for CipherKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for CipherKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for CipherKey {}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherKey").finish_non_exhaustive()
    }
}

/// AES-GCM decryption under a normalized key
#[derive(Clone, Debug)]
pub struct AesGcmDecrypter {
    key: CipherKey,
}

impl AesGcmDecrypter {
    /// Create a decrypter keyed from `secret` (normalized to 32 bytes)
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: CipherKey::normalize(secret),
        }
    }
}

impl SymmetricDecrypter for AesGcmDecrypter {
    /// Decrypt `[nonce | ciphertext+tag]`
    ///
    /// # Errors
    ///
    /// - `MalformedCipherText` if the input is shorter than one nonce; the
    ///   AEAD is never invoked in that case
    /// - `AuthenticationFailed` if the tag does not verify
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_SIZE {
            return Err(CryptoError::MalformedCipherText {
                expected: NONCE_SIZE,
                actual: ciphertext.len(),
            });
        }

        let (nonce, sealed) = ciphertext.split_at(NONCE_SIZE);
        let cipher = self.key.cipher()?;

        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: b"",
                },
            )
            .map_err(|_| CryptoError::AuthenticationFailed)?;

        trace!(
            "AES-GCM opened {} bytes into {} bytes of plaintext",
            ciphertext.len(),
            plaintext.len()
        );
        Ok(plaintext)
    }
}

/// AES-GCM encryption under a normalized key, paired with its decrypter
#[derive(Clone, Debug)]
pub struct AesGcmEncrypter {
    key: CipherKey,
    decrypter: AesGcmDecrypter,
}

impl AesGcmEncrypter {
    /// Create an encrypter keyed from `secret`, along with its decrypter
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: CipherKey::normalize(secret),
            decrypter: AesGcmDecrypter::new(secret),
        }
    }

    /// Encrypt with nonce bytes drawn from `rng` instead of the OS source
    ///
    /// # Errors
    ///
    /// - `CipherInit` if the key cannot initialize AES-256-GCM
    /// - `RandomSource` if `rng` fails to produce the nonce
    /// - `EncryptionFailed` if the AEAD refuses the plaintext
    pub fn encrypt_with_rng(
        &self,
        plaintext: &[u8],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<Vec<u8>> {
        let cipher = self.key.cipher()?;

        let mut nonce = [0u8; NONCE_SIZE];
        rng.try_fill_bytes(&mut nonce)?;

        let sealed = cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: b"",
                },
            )
            .map_err(|_| CryptoError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);

        trace!(
            "AES-GCM sealed {} bytes of plaintext into {} bytes",
            plaintext.len(),
            out.len()
        );
        Ok(out)
    }
}

impl SymmetricEncrypter for AesGcmEncrypter {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }

    fn get_decrypter(&self) -> &dyn SymmetricDecrypter {
        &self.decrypter
    }
}
