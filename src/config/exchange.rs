// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for building a key-agreement exchanger

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use super::curves::CurveId;
use crate::crypto::{CryptoError, EllipticCurveExchanger};

/// How public keys are marshaled for transport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicKeyEncoding {
    /// No codec; marshal/unmarshal report `NotImplemented`
    #[default]
    None,
    Sec1Uncompressed,
    Sec1Compressed,
}

impl FromStr for PublicKeyEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(PublicKeyEncoding::None),
            "sec1" | "sec1-uncompressed" | "uncompressed" => Ok(PublicKeyEncoding::Sec1Uncompressed),
            "sec1-compressed" | "compressed" => Ok(PublicKeyEncoding::Sec1Compressed),
            _ => Err(CryptoError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Exchanger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Curve both parties agree on
    pub curve: CurveId,
    /// Wire encoding for public keys
    pub public_key_encoding: PublicKeyEncoding,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            curve: CurveId::P256,
            public_key_encoding: PublicKeyEncoding::None,
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from environment variables
    ///
    /// - `DH_EXCHANGE_CURVE` (default `P-256`)
    /// - `DH_EXCHANGE_PUBLIC_KEY_ENCODING`: `none`, `sec1-uncompressed` or
    ///   `sec1-compressed` (default `none`)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            curve: env::var("DH_EXCHANGE_CURVE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.curve),
            public_key_encoding: env::var("DH_EXCHANGE_PUBLIC_KEY_ENCODING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.public_key_encoding),
        }
    }

    /// Load configuration from the `[exchange]` table of a TOML file
    ///
    /// A missing table yields the defaults; an unknown curve name is an error.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml_value: toml::Value = toml::from_str(content)?;

        let config: Self = match toml_value.get("exchange") {
            Some(table) => table.clone().try_into()?,
            None => Self::default(),
        };

        Ok(config)
    }

    /// Build the exchanger this configuration describes
    pub fn build_exchanger(&self) -> std::result::Result<EllipticCurveExchanger, CryptoError> {
        let exchanger = EllipticCurveExchanger::new(Some(self.curve.curve()?))?;

        Ok(match self.public_key_encoding {
            PublicKeyEncoding::None => exchanger,
            PublicKeyEncoding::Sec1Uncompressed => {
                exchanger.with_codec(self.curve.sec1_codec(false))
            }
            PublicKeyEncoding::Sec1Compressed => exchanger.with_codec(self.curve.sec1_codec(true)),
        })
    }
}
