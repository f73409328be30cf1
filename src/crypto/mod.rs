// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key Agreement and Message Encryption
//!
//! - **Exchanger**: the `DhExchanger` contract every curve family implements
//! - **ECDH**: `EllipticCurveExchanger`, the contract over any `EllipticCurve`
//! - **Curve**: the arithmetic seam, backed by the RustCrypto curve crates
//! - **SEC1**: optional wire codec for public keys
//! - **Symmetric**: `SymmetricEncrypter` / `SymmetricDecrypter` roles
//! - **AES-GCM**: AES-256-GCM implementation of those roles
//!
//! ## Security Considerations
//!
//! - Run `check` on every peer public key before `agree_on_secret`
//! - Agreed secrets are never persisted here; retention is the caller's call
//! - Cipher keys are the agreed secret truncated or zero-padded to 32 bytes,
//!   a length fix rather than a key-derivation function
//! - Each encryption draws a fresh nonce from the OS random source
//!
//! ## Protocol Flow
//!
//! 1. Both parties build an exchanger on the same curve
//! 2. Each generates a key pair and sends the public key to the other
//! 3. Each checks the peer's key and agrees on the shared secret
//! 4. Each obtains an encrypter keyed from that secret
//! 5. Sender encrypts, receiver decrypts with the matching decrypter

pub mod aes_gcm;
pub mod curve;
pub mod ecdh;
pub mod error;
pub mod exchanger;
pub mod sec1;
pub mod symmetric;

pub use self::aes_gcm::{AesGcmDecrypter, AesGcmEncrypter, CipherKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use curve::{CurveParams, EllipticCurve, Point, WeierstrassCurve};
pub use ecdh::{EcPrivateKey, EllipticCurveExchanger};
pub use error::{CryptoError, Result};
pub use exchanger::DhExchanger;
pub use self::sec1::{PublicKeyCodec, Sec1Codec};
pub use symmetric::{SymmetricDecrypter, SymmetricEncrypter};
