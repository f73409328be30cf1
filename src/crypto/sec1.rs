// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SEC1 public-key encoding
//!
//! The exchanger leaves wire encoding of public keys to a pluggable
//! [`PublicKeyCodec`]. [`Sec1Codec`] is the standard choice:
//!
//! ```text
//! uncompressed: 0x04 | X | Y
//! compressed:   0x02 or 0x03 (parity of Y) | X
//! ```
//!
//! Coordinates are left-padded to the curve's field width. Decoding accepts
//! either form and only yields points that lie on the curve.

use std::fmt;
use std::marker::PhantomData;

use elliptic_curve::{
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytesSize,
};

use super::curve::{affine_to_point, point_to_affine, Point};
use super::error::{CryptoError, Result};

/// Byte encoding of public points for transport
pub trait PublicKeyCodec: Send + Sync + fmt::Debug {
    fn encode(&self, point: &Point) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<Point>;
}

/// SEC1 octet-string encoding for RustCrypto curve `C`
pub struct Sec1Codec<C> {
    compress: bool,
    _curve: PhantomData<C>,
}

impl<C> Sec1Codec<C> {
    /// Codec emitting `0x04 | X | Y`
    pub fn uncompressed() -> Self {
        Self {
            compress: false,
            _curve: PhantomData,
        }
    }

    /// Codec emitting `0x02/0x03 | X`
    pub fn compressed() -> Self {
        Self {
            compress: true,
            _curve: PhantomData,
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.compress
    }
}

impl<C> fmt::Debug for Sec1Codec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sec1Codec")
            .field("compress", &self.compress)
            .finish()
    }
}

impl<C> PublicKeyCodec for Sec1Codec<C>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    /// # Errors
    ///
    /// `PointNotOnCurve` if `point` is not a point of `C`
    fn encode(&self, point: &Point) -> Result<Vec<u8>> {
        let affine = point_to_affine::<C>(point)?;
        Ok(affine.to_encoded_point(self.compress).as_bytes().to_vec())
    }

    /// # Errors
    ///
    /// - `Encoding` if the bytes are not a SEC1 point encoding
    /// - `PointAtInfinity` for the identity encoding
    /// - `PointNotOnCurve` if the encoded point is not on `C`
    fn decode(&self, bytes: &[u8]) -> Result<Point> {
        let encoded = EncodedPoint::<C>::from_bytes(bytes)
            .map_err(|e| CryptoError::Encoding(format!("invalid SEC1 point: {}", e)))?;

        if encoded.is_identity() {
            return Err(CryptoError::PointAtInfinity);
        }

        let affine: Option<AffinePoint<C>> = AffinePoint::<C>::from_encoded_point(&encoded).into();
        let affine = affine.ok_or(CryptoError::PointNotOnCurve)?;
        affine_to_point::<C>(&affine)
    }
}
