// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Diffie-Hellman key agreement contract
//!
//! Everything above key agreement depends on [`DhExchanger`] alone. A curve
//! family plugs in by implementing it; the key types are associated types,
//! so a private key can never be handed over where a public key is expected.

use super::error::Result;
use super::symmetric::SymmetricEncrypter;

/// Key agreement between two parties, plus a symmetric channel keyed from it
pub trait DhExchanger: Send + Sync {
    type PrivateKey;
    type PublicKey;

    /// Generate a fresh key pair from the secure random source.
    fn new_random_key_pair(&self) -> Result<(Self::PrivateKey, Self::PublicKey)>;

    /// Encode a public key for transport.
    fn marshal_public(&self, key: &Self::PublicKey) -> Result<Vec<u8>>;

    /// Inverse of [`DhExchanger::marshal_public`].
    fn unmarshal_public(&self, bytes: &[u8]) -> Result<Self::PublicKey>;

    /// Compute the shared secret between `self_private` and `other_public`.
    ///
    /// Both parties obtain identical bytes. The peer key should have passed
    /// [`DhExchanger::check`] first.
    fn agree_on_secret(
        &self,
        self_private: &Self::PrivateKey,
        other_public: &Self::PublicKey,
    ) -> Result<Vec<u8>>;

    /// Re-derive the public key belonging to `private`.
    fn public_key(&self, private: &Self::PrivateKey) -> Result<Self::PublicKey>;

    /// Validate a peer's public key before trusting it.
    fn check(&self, peer_public: &Self::PublicKey) -> Result<()>;

    /// Symmetric encrypter keyed from an agreed `secret`.
    fn get_encrypter(&self, secret: &[u8]) -> Box<dyn SymmetricEncrypter>;
}
