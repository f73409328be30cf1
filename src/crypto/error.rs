// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! One error type for key agreement and the symmetric channel. Every failure
//! path returns a distinguishable variant to the immediate caller; errors are
//! never retried or swallowed here.
//!
//! ## Error Variants
//!
//! - **Configuration**: `InvalidCurve`, `UnknownCurve`, `UnknownEncoding`
//! - **Input validation**: `InvalidPrivateKey`, `InvalidPublicKey`,
//!   `PrivateKeyCurveIncompatible`, `UnexpectedPublicKey`, `PointNotOnCurve`,
//!   `PointAtInfinity`, `Encoding`
//! - **Integrity**: `MalformedCipherText`, `AuthenticationFailed`
//! - **Resource**: `RandomSource`, `CipherInit`, `EncryptionFailed`
//! - **Unimplemented**: `NotImplemented`
//!
//! Integrity errors mean tampering or corruption. Callers must treat them as
//! hard failures; no partial plaintext is ever returned alongside them.

use thiserror::Error;

/// Errors produced by key agreement, key validation and the AES-GCM channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// No curve was supplied when constructing an exchanger
    #[error("invalid elliptic curve")]
    InvalidCurve,

    /// Curve name not recognised by the registry or configuration
    #[error("unknown elliptic curve: {0}")]
    UnknownCurve(String),

    /// Public key encoding name not recognised by the configuration
    #[error("unknown public key encoding: {0}")]
    UnknownEncoding(String),

    /// Private scalar is malformed (empty, or wider than the curve allows)
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Public point is malformed for the curve in use
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Private scalar is not strictly below the subgroup order N
    #[error("private key curve incompatible")]
    PrivateKeyCurveIncompatible,

    /// Peer key handed to `check` does not have the shape of a curve point
    #[error("unexpected type of peer's public key")]
    UnexpectedPublicKey,

    /// Point does not satisfy the curve equation
    #[error("peer's public key is not on curve")]
    PointNotOnCurve,

    /// Arithmetic produced (or an encoding named) the identity element
    #[error("point at infinity has no affine coordinates")]
    PointAtInfinity,

    /// Public key wire encoding could not be parsed
    #[error("public key encoding error: {0}")]
    Encoding(String),

    /// Cipher text shorter than the nonce it must start with
    #[error("malformed cipher text: expected at least {expected} bytes, got {actual}")]
    MalformedCipherText {
        /// Minimum length (the AEAD nonce size)
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// GCM tag did not verify (wrong key, tampered or corrupted data)
    #[error("authentication failed: cipher text was tampered with or the key is wrong")]
    AuthenticationFailed,

    /// Secure random source could not deliver bytes
    #[error("secure random source failed: {0}")]
    RandomSource(String),

    /// Block cipher or AEAD construction rejected the key
    #[error("cipher initialization failed: {0}")]
    CipherInit(String),

    /// AEAD refused to seal the plaintext
    #[error("encryption failed")]
    EncryptionFailed,

    /// Operation needs a collaborator that has not been supplied
    #[error("not yet implemented: {0}")]
    NotImplemented(&'static str),
}

impl CryptoError {
    /// True for failures that indicate tampering or corruption of cipher text
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            CryptoError::AuthenticationFailed | CryptoError::MalformedCipherText { .. }
        )
    }

    /// True when caller-supplied data failed a precondition.
    ///
    /// Retrying with the same input cannot succeed.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CryptoError::InvalidPrivateKey
                | CryptoError::InvalidPublicKey
                | CryptoError::PrivateKeyCurveIncompatible
                | CryptoError::UnexpectedPublicKey
                | CryptoError::PointNotOnCurve
                | CryptoError::PointAtInfinity
                | CryptoError::Encoding(_)
        )
    }
}

// Conversion from rand_core errors (OS entropy source)
impl From<rand::Error> for CryptoError {
    fn from(err: rand::Error) -> Self {
        CryptoError::RandomSource(err.to_string())
    }
}

// Conversion from elliptic-curve encoding errors
impl From<elliptic_curve::Error> for CryptoError {
    fn from(err: elliptic_curve::Error) -> Self {
        CryptoError::Encoding(err.to_string())
    }
}

/// Result alias used throughout the crypto module
pub type Result<T> = std::result::Result<T, CryptoError>;
