// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Exchange Implementation
//!
//! Implements [`DhExchanger`] on top of any [`EllipticCurve`]. The exchanger
//! only orchestrates and validates inputs; all group arithmetic is delegated
//! to the curve collaborator supplied at construction time.
//!
//! ## Caller Obligations
//!
//! `agree_on_secret` does **not** run `check` on the peer's key. Call
//! `check` on every externally supplied public key before agreeing on a
//! secret with it: a point off the curve (or on another curve with the same
//! field size) enables invalid-curve attacks that leak private-scalar bits.

use std::sync::Arc;

use elliptic_curve::rand_core::CryptoRngCore;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use tracing::debug;
use zeroize::Zeroizing;

use super::aes_gcm::AesGcmEncrypter;
use super::curve::{CurveParams, EllipticCurve, Point};
use super::error::{CryptoError, Result};
use super::exchanger::DhExchanger;
use super::sec1::PublicKeyCodec;
use super::symmetric::SymmetricEncrypter;

/// Private scalar as big-endian bytes, zeroized on drop
#[derive(Clone)]
pub struct EcPrivateKey(Zeroizing<Vec<u8>>);

impl EcPrivateKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parse a hex scalar, with or without a "0x" prefix
    ///
    /// # Errors
    ///
    /// `InvalidPrivateKey` if the string is empty or not valid hex
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let trimmed = hex_str.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(CryptoError::InvalidPrivateKey);
        }
        let bytes = hex::decode(digits).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Zeroizing<Vec<u8>>> for EcPrivateKey {
    fn from(bytes: Zeroizing<Vec<u8>>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcPrivateKey").finish_non_exhaustive()
    }
}

/// Diffie-Hellman exchanger over a fixed elliptic curve
///
/// Holds only immutable configuration, so one instance can be shared by
/// reference (or `Arc`) across threads.
///
/// # Example
///
/// ```ignore
/// let exchanger = EllipticCurveExchanger::new(Some(CurveId::P224.curve()?))?;
/// let (alice_private, alice_public) = exchanger.new_random_key_pair()?;
/// let (bob_private, bob_public) = exchanger.new_random_key_pair()?;
///
/// exchanger.check(&bob_public)?;
/// let secret = exchanger.agree_on_secret(&alice_private, &bob_public)?;
/// let sealed = exchanger.get_encrypter(&secret).encrypt(b"hello bob")?;
/// ```
#[derive(Clone, Debug)]
pub struct EllipticCurveExchanger {
    curve: Arc<dyn EllipticCurve>,
    codec: Option<Arc<dyn PublicKeyCodec>>,
}

impl EllipticCurveExchanger {
    /// Create an exchanger over `curve`
    ///
    /// # Errors
    ///
    /// `InvalidCurve` if no curve is supplied
    pub fn new(curve: Option<Arc<dyn EllipticCurve>>) -> Result<Self> {
        let curve = curve.ok_or(CryptoError::InvalidCurve)?;
        debug!("Elliptic-curve exchanger created on {}", curve.params().name);
        Ok(Self { curve, codec: None })
    }

    /// Attach a wire codec used by `marshal_public` / `unmarshal_public`
    pub fn with_codec(mut self, codec: Arc<dyn PublicKeyCodec>) -> Self {
        debug!(
            "Public key codec {:?} attached to {} exchanger",
            codec,
            self.curve.params().name
        );
        self.codec = Some(codec);
        self
    }

    pub fn curve_params(&self) -> &CurveParams {
        self.curve.params()
    }

    /// Generate a key pair with scalar bytes drawn from `rng`
    ///
    /// Random-source failures are returned unchanged.
    pub fn new_random_key_pair_with_rng(
        &self,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(EcPrivateKey, Point)> {
        let (private, public) = self.curve.generate_key(rng)?;
        debug!("Generated {} key pair", self.curve.params().name);
        Ok((EcPrivateKey::from(private), public))
    }

    /// Scalar bytes of `private`, if it has a usable shape for this curve
    fn scalar_bytes<'a>(&self, private: &'a EcPrivateKey) -> Option<&'a [u8]> {
        let bytes = private.as_bytes();
        if bytes.is_empty() || bytes.len() > self.curve.params().byte_len() {
            return None;
        }
        Some(bytes)
    }

    /// Whether both coordinates fit the curve's field width
    fn fits_field(&self, point: &Point) -> bool {
        let max_bits = (self.curve.params().byte_len() * 8) as u64;
        point.x.bits() <= max_bits && point.y.bits() <= max_bits
    }
}

impl DhExchanger for EllipticCurveExchanger {
    type PrivateKey = EcPrivateKey;
    type PublicKey = Point;

    fn new_random_key_pair(&self) -> Result<(EcPrivateKey, Point)> {
        self.new_random_key_pair_with_rng(&mut OsRng)
    }

    /// # Errors
    ///
    /// `NotImplemented` unless a codec was attached with `with_codec`
    fn marshal_public(&self, key: &Point) -> Result<Vec<u8>> {
        match &self.codec {
            Some(codec) => codec.encode(key),
            None => Err(CryptoError::NotImplemented("marshal_public")),
        }
    }

    /// # Errors
    ///
    /// `NotImplemented` unless a codec was attached with `with_codec`
    fn unmarshal_public(&self, bytes: &[u8]) -> Result<Point> {
        match &self.codec {
            Some(codec) => codec.decode(bytes),
            None => Err(CryptoError::NotImplemented("unmarshal_public")),
        }
    }

    /// Shared secret: big-endian bytes of the X-coordinate of
    /// `self_private * other_public`, without leading zero bytes
    ///
    /// `other_public` is not checked against the curve here; callers must run
    /// [`DhExchanger::check`] on it first.
    ///
    /// # Errors
    ///
    /// - `InvalidPrivateKey` if the scalar is empty or wider than the curve
    /// - `InvalidPublicKey` if a coordinate is wider than the field
    /// - whatever the curve's scalar multiplication reports
    fn agree_on_secret(&self, self_private: &EcPrivateKey, other_public: &Point) -> Result<Vec<u8>> {
        let scalar = self
            .scalar_bytes(self_private)
            .ok_or(CryptoError::InvalidPrivateKey)?;
        if !self.fits_field(other_public) {
            return Err(CryptoError::InvalidPublicKey);
        }

        let shared = self.curve.scalar_mult(other_public, scalar)?;
        Ok(shared.x.to_bytes_be())
    }

    /// # Errors
    ///
    /// - `InvalidPrivateKey` if the scalar is empty or wider than the curve
    /// - `PrivateKeyCurveIncompatible` if the scalar is not below N
    fn public_key(&self, private: &EcPrivateKey) -> Result<Point> {
        let scalar = self
            .scalar_bytes(private)
            .ok_or(CryptoError::InvalidPrivateKey)?;

        if BigUint::from_bytes_be(scalar) >= self.curve.params().n {
            return Err(CryptoError::PrivateKeyCurveIncompatible);
        }

        self.curve.scalar_base_mult(scalar)
    }

    /// # Errors
    ///
    /// - `UnexpectedPublicKey` if the value cannot be a point of this curve
    /// - `PointNotOnCurve` if it fails the curve equation
    fn check(&self, peer_public: &Point) -> Result<()> {
        if !self.fits_field(peer_public) {
            return Err(CryptoError::UnexpectedPublicKey);
        }
        if !self.curve.is_on_curve(peer_public) {
            return Err(CryptoError::PointNotOnCurve);
        }
        Ok(())
    }

    fn get_encrypter(&self, secret: &[u8]) -> Box<dyn SymmetricEncrypter> {
        Box::new(AesGcmEncrypter::new(secret))
    }
}
