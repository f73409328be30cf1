// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Curve arithmetic seam
//!
//! The exchanger never does group arithmetic itself. It talks to an
//! [`EllipticCurve`], which supplies the curve parameters, base-point and
//! variable-point scalar multiplication, the on-curve predicate and key
//! generation. [`WeierstrassCurve`] implements that seam for any RustCrypto
//! short-Weierstrass curve (`p224`, `p256`, `p384`, `p521`, `k256`).
//!
//! Points cross the seam as plain `(x, y)` integers. Scalars cross it as
//! big-endian bytes of any length and are reduced modulo the subgroup order.

use std::fmt;
use std::marker::PhantomData;

use elliptic_curve::{
    ff::{Field, PrimeField},
    generic_array::typenum::Unsigned,
    group::{Curve as _, Group},
    rand_core::CryptoRngCore,
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, ProjectivePoint, Scalar,
};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::error::{CryptoError, Result};

/// A point given by its affine coordinates
///
/// Validity is curve-relative: the same coordinates can be on one curve and
/// off another.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: BigUint,
    pub y: BigUint,
}

impl Point {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }
}

/// Domain parameters of a prime-order curve
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Canonical name, e.g. "P-256"
    pub name: String,
    /// Size of the underlying field in bits
    pub bit_size: usize,
    /// Field prime
    pub p: BigUint,
    /// Order of the base point
    pub n: BigUint,
    /// Base point x-coordinate
    pub gx: BigUint,
    /// Base point y-coordinate
    pub gy: BigUint,
}

impl CurveParams {
    /// Field element width in bytes
    pub fn byte_len(&self) -> usize {
        (self.bit_size + 7) / 8
    }

    /// Base point as a [`Point`]
    pub fn base_point(&self) -> Point {
        Point::new(self.gx.clone(), self.gy.clone())
    }
}

/// Trusted curve-arithmetic primitives consumed by the exchanger
pub trait EllipticCurve: Send + Sync + fmt::Debug {
    fn params(&self) -> &CurveParams;

    /// `scalar * G`
    fn scalar_base_mult(&self, scalar: &[u8]) -> Result<Point>;

    /// `scalar * point`
    fn scalar_mult(&self, point: &Point, scalar: &[u8]) -> Result<Point>;

    fn is_on_curve(&self, point: &Point) -> bool;

    /// Sample a private scalar in `[1, N)` and compute its public point.
    ///
    /// Failures of `rng` are returned as `CryptoError::RandomSource`, never
    /// papered over with another source.
    fn generate_key(&self, rng: &mut dyn CryptoRngCore) -> Result<(Zeroizing<Vec<u8>>, Point)>;
}

/// [`EllipticCurve`] backed by a RustCrypto curve implementation
pub struct WeierstrassCurve<C> {
    params: CurveParams,
    _curve: PhantomData<C>,
}

impl<C> fmt::Debug for WeierstrassCurve<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeierstrassCurve")
            .field("name", &self.params.name)
            .field("bit_size", &self.params.bit_size)
            .finish()
    }
}

impl<C> WeierstrassCurve<C>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    /// Wrap curve `C`, deriving N and G from its arithmetic.
    ///
    /// The field prime is not exposed generically by the curve crates, so the
    /// caller supplies it; the field size is taken from its bit length.
    ///
    /// # Errors
    ///
    /// `InvalidCurve` if `p` does not fill the field width of `C`, or if the
    /// base point coordinates are not below `p`
    pub fn new(name: &str, p: BigUint) -> Result<Self> {
        let width_bits = <FieldBytesSize<C> as Unsigned>::USIZE * 8;
        let bit_size = p.bits() as usize;
        if bit_size > width_bits || bit_size + 8 <= width_bits {
            return Err(CryptoError::InvalidCurve);
        }

        // The scalar field's largest element is N - 1
        let n = BigUint::from_bytes_be(&(-Scalar::<C>::ONE).to_repr()) + 1u32;

        let generator = affine_to_point::<C>(&ProjectivePoint::<C>::generator().to_affine())
            .map_err(|_| CryptoError::InvalidCurve)?;
        if generator.x >= p || generator.y >= p {
            return Err(CryptoError::InvalidCurve);
        }

        Ok(Self {
            params: CurveParams {
                name: name.to_string(),
                bit_size,
                p,
                n,
                gx: generator.x,
                gy: generator.y,
            },
            _curve: PhantomData,
        })
    }

    fn scalar_from_bytes(&self, scalar: &[u8]) -> Result<Scalar<C>> {
        let reduced = BigUint::from_bytes_be(scalar) % &self.params.n;
        let repr = to_field_bytes::<C>(&reduced).ok_or(CryptoError::InvalidPrivateKey)?;
        Option::from(Scalar::<C>::from_repr(repr)).ok_or(CryptoError::InvalidPrivateKey)
    }
}

impl<C> EllipticCurve for WeierstrassCurve<C>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    fn params(&self) -> &CurveParams {
        &self.params
    }

    fn scalar_base_mult(&self, scalar: &[u8]) -> Result<Point> {
        let k = self.scalar_from_bytes(scalar)?;
        affine_to_point::<C>(&(ProjectivePoint::<C>::generator() * k).to_affine())
    }

    fn scalar_mult(&self, point: &Point, scalar: &[u8]) -> Result<Point> {
        let affine = point_to_affine::<C>(point)?;
        let k = self.scalar_from_bytes(scalar)?;
        affine_to_point::<C>(&(ProjectivePoint::<C>::from(affine) * k).to_affine())
    }

    fn is_on_curve(&self, point: &Point) -> bool {
        point_to_affine::<C>(point).is_ok()
    }

    fn generate_key(&self, rng: &mut dyn CryptoRngCore) -> Result<(Zeroizing<Vec<u8>>, Point)> {
        let width = <FieldBytesSize<C> as Unsigned>::USIZE;
        let excess_bits = (width * 8).saturating_sub(self.params.bit_size) as u32;
        let mut buf = Zeroizing::new(vec![0u8; width]);

        // Rejection sampling; masking the unused top bits keeps P-521 fast
        let scalar = loop {
            rng.try_fill_bytes(&mut buf)?;
            buf[0] &= 0xffu8.checked_shr(excess_bits).unwrap_or(0);

            let candidate: Option<Scalar<C>> =
                Scalar::<C>::from_repr(FieldBytes::<C>::clone_from_slice(&buf)).into();
            if let Some(k) = candidate {
                if !bool::from(k.is_zero()) {
                    break k;
                }
            }
        };

        let public =
            affine_to_point::<C>(&(ProjectivePoint::<C>::generator() * scalar).to_affine())?;
        Ok((buf, public))
    }
}

/// Left-pad an integer to the curve's field width; `None` if it does not fit
fn to_field_bytes<C: CurveArithmetic>(value: &BigUint) -> Option<FieldBytes<C>> {
    let bytes = Zeroizing::new(value.to_bytes_be());
    let width = <FieldBytesSize<C> as Unsigned>::USIZE;
    if bytes.len() > width {
        return None;
    }
    let mut out = FieldBytes::<C>::default();
    out[width - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

/// Validate `point` against curve `C` and convert it to an affine point
pub(crate) fn point_to_affine<C>(point: &Point) -> Result<AffinePoint<C>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let x = to_field_bytes::<C>(&point.x).ok_or(CryptoError::PointNotOnCurve)?;
    let y = to_field_bytes::<C>(&point.y).ok_or(CryptoError::PointNotOnCurve)?;
    let encoded = EncodedPoint::<C>::from_affine_coordinates(&x, &y, false);
    Option::from(AffinePoint::<C>::from_encoded_point(&encoded)).ok_or(CryptoError::PointNotOnCurve)
}

/// Affine coordinates of `affine`; the identity has none
pub(crate) fn affine_to_point<C>(affine: &AffinePoint<C>) -> Result<Point>
where
    C: CurveArithmetic,
    AffinePoint<C>: ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let encoded = affine.to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => Ok(Point::new(
            BigUint::from_bytes_be(x),
            BigUint::from_bytes_be(y),
        )),
        _ => Err(CryptoError::PointAtInfinity),
    }
}
