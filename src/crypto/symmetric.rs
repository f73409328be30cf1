// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Symmetric cipher roles
//!
//! Key agreement hands callers a `Box<dyn SymmetricEncrypter>` rather than a
//! concrete cipher, so the authenticated-encryption scheme can change without
//! touching the exchanger layer. Decryption depends on the scheme used to
//! encrypt, so an encrypter always carries its matching decrypter.

use super::error::Result;

/// Encrypting half of an authenticated symmetric scheme
pub trait SymmetricEncrypter: Send + Sync {
    /// Encrypt `plaintext`, returning a self-describing cipher text.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypter configured with the same key as this encrypter.
    fn get_decrypter(&self) -> &dyn SymmetricDecrypter;
}

/// Decrypting half of an authenticated symmetric scheme
pub trait SymmetricDecrypter: Send + Sync {
    /// Decrypt and authenticate `ciphertext`.
    ///
    /// Fails closed: either the full original plaintext or an error.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
