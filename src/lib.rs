// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Curve-agnostic Diffie-Hellman key agreement with an AES-256-GCM channel
//!
//! Two parties on the same curve each generate a key pair, swap public keys,
//! agree on an identical secret, and key an authenticated cipher from it.

pub mod config;
pub mod crypto;

pub use config::{CurveId, CurveRegistry, ExchangeConfig, PublicKeyEncoding};
pub use crypto::{
    AesGcmDecrypter, AesGcmEncrypter, CipherKey, CryptoError, DhExchanger, EcPrivateKey,
    EllipticCurve, EllipticCurveExchanger, Point, PublicKeyCodec, SymmetricDecrypter,
    SymmetricEncrypter,
};
