// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

use crate::crypto::{CryptoError, EllipticCurve, PublicKeyCodec, Sec1Codec, WeierstrassCurve};

/// Curves the exchanger can be built on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurveId {
    P224,
    P256,
    P384,
    P521,
    Secp256k1,
}

impl CurveId {
    pub const ALL: [CurveId; 5] = [
        CurveId::P224,
        CurveId::P256,
        CurveId::P384,
        CurveId::P521,
        CurveId::Secp256k1,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CurveId::P224 => "P-224",
            CurveId::P256 => "P-256",
            CurveId::P384 => "P-384",
            CurveId::P521 => "P-521",
            CurveId::Secp256k1 => "secp256k1",
        }
    }

    pub fn bit_size(&self) -> usize {
        match self {
            CurveId::P224 => 224,
            CurveId::P256 | CurveId::Secp256k1 => 256,
            CurveId::P384 => 384,
            CurveId::P521 => 521,
        }
    }

    /// Field prime of the curve
    pub fn field_prime(&self) -> BigUint {
        let pow2 = |bits: u32| BigUint::one() << bits;
        match self {
            // 2^224 - 2^96 + 1
            CurveId::P224 => pow2(224) + 1u32 - pow2(96),
            // 2^256 - 2^224 + 2^192 + 2^96 - 1
            CurveId::P256 => pow2(256) + pow2(192) + pow2(96) - pow2(224) - 1u32,
            // 2^384 - 2^128 - 2^96 + 2^32 - 1
            CurveId::P384 => pow2(384) + pow2(32) - pow2(128) - pow2(96) - 1u32,
            // 2^521 - 1
            CurveId::P521 => pow2(521) - 1u32,
            // 2^256 - 2^32 - 977
            CurveId::Secp256k1 => pow2(256) - pow2(32) - 977u32,
        }
    }

    /// Curve-arithmetic collaborator for this curve
    pub fn curve(&self) -> Result<Arc<dyn EllipticCurve>, CryptoError> {
        let (name, p) = (self.name(), self.field_prime());
        Ok(match self {
            CurveId::P224 => Arc::new(WeierstrassCurve::<p224::NistP224>::new(name, p)?),
            CurveId::P256 => Arc::new(WeierstrassCurve::<p256::NistP256>::new(name, p)?),
            CurveId::P384 => Arc::new(WeierstrassCurve::<p384::NistP384>::new(name, p)?),
            CurveId::P521 => Arc::new(WeierstrassCurve::<p521::NistP521>::new(name, p)?),
            CurveId::Secp256k1 => Arc::new(WeierstrassCurve::<k256::Secp256k1>::new(name, p)?),
        })
    }

    /// SEC1 public-key codec for this curve
    pub fn sec1_codec(&self, compress: bool) -> Arc<dyn PublicKeyCodec> {
        fn build<C>(compress: bool) -> Sec1Codec<C> {
            if compress {
                Sec1Codec::compressed()
            } else {
                Sec1Codec::uncompressed()
            }
        }

        match self {
            CurveId::P224 => Arc::new(build::<p224::NistP224>(compress)),
            CurveId::P256 => Arc::new(build::<p256::NistP256>(compress)),
            CurveId::P384 => Arc::new(build::<p384::NistP384>(compress)),
            CurveId::P521 => Arc::new(build::<p521::NistP521>(compress)),
            CurveId::Secp256k1 => Arc::new(build::<k256::Secp256k1>(compress)),
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveId {
    type Err = CryptoError;

    /// Accepts NIST ("P-256"), SEC ("secp256r1") and bare ("p256") spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "p224" | "secp224r1" | "nistp224" => Ok(CurveId::P224),
            "p256" | "secp256r1" | "prime256v1" | "nistp256" => Ok(CurveId::P256),
            "p384" | "secp384r1" | "nistp384" => Ok(CurveId::P384),
            "p521" | "secp521r1" | "nistp521" => Ok(CurveId::P521),
            "secp256k1" | "k256" => Ok(CurveId::Secp256k1),
            _ => Err(CryptoError::UnknownCurve(s.to_string())),
        }
    }
}

impl TryFrom<String> for CurveId {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurveId> for String {
    fn from(id: CurveId) -> Self {
        id.name().to_string()
    }
}

pub struct CurveRegistry {
    curves: HashMap<CurveId, Arc<dyn EllipticCurve>>,
    default_curve: CurveId,
}

impl CurveRegistry {
    pub fn new() -> Self {
        let mut curves = HashMap::new();
        for id in CurveId::ALL {
            match id.curve() {
                Ok(curve) => {
                    curves.insert(id, curve);
                }
                Err(e) => warn!("Curve {} unavailable: {}", id, e),
            }
        }

        CurveRegistry {
            curves,
            default_curve: CurveId::P256,
        }
    }

    /// Curve collaborator for `id`, shared with every other caller
    pub fn get_curve(&self, id: CurveId) -> Option<Arc<dyn EllipticCurve>> {
        self.curves.get(&id).cloned()
    }

    /// Lookup by any spelling `CurveId` parses; `None` for unknown names
    pub fn get_curve_by_name(&self, name: &str) -> Option<Arc<dyn EllipticCurve>> {
        name.parse::<CurveId>()
            .ok()
            .and_then(|id| self.get_curve(id))
    }

    pub fn default_curve(&self) -> CurveId {
        self.default_curve
    }

    pub fn list_supported_curves(&self) -> Vec<CurveId> {
        let mut ids: Vec<CurveId> = self.curves.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn is_curve_supported(&self, id: CurveId) -> bool {
        self.curves.contains_key(&id)
    }
}

impl Default for CurveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
