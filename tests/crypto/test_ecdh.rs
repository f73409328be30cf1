// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the elliptic-curve exchanger
//!
//! Agreement symmetry, key re-derivation and input validation on every
//! registered curve.

use dh_exchange::config::CurveId;
use dh_exchange::crypto::{
    CryptoError, DhExchanger, EcPrivateKey, EllipticCurveExchanger, Point,
};
use num_bigint::BigUint;

use super::test_helpers::{BrokenRng, ENTROPY_FAILURE};

fn exchanger(id: CurveId) -> EllipticCurveExchanger {
    EllipticCurveExchanger::new(Some(id.curve().unwrap())).unwrap()
}

#[test]
fn test_agreement_symmetric_on_every_curve() {
    for id in CurveId::ALL {
        let dh = exchanger(id);
        let (alice_private, alice_public) = dh.new_random_key_pair().unwrap();
        let (bob_private, bob_public) = dh.new_random_key_pair().unwrap();

        dh.check(&alice_public).unwrap();
        dh.check(&bob_public).unwrap();

        let alice_secret = dh.agree_on_secret(&alice_private, &bob_public).unwrap();
        let bob_secret = dh.agree_on_secret(&bob_private, &alice_public).unwrap();

        assert_eq!(alice_secret, bob_secret, "secrets differ on {}", id);
        assert!(
            alice_secret.len() <= dh.curve_params().byte_len(),
            "secret wider than the field on {}",
            id
        );
    }
}

#[test]
fn test_different_peers_different_secrets() {
    let dh = exchanger(CurveId::P256);
    let (alice, _) = dh.new_random_key_pair().unwrap();
    let (_, bob_public) = dh.new_random_key_pair().unwrap();
    let (_, carol_public) = dh.new_random_key_pair().unwrap();

    assert_ne!(
        dh.agree_on_secret(&alice, &bob_public).unwrap(),
        dh.agree_on_secret(&alice, &carol_public).unwrap()
    );
}

#[test]
fn test_agreement_deterministic() {
    let dh = exchanger(CurveId::Secp256k1);
    let (alice, _) = dh.new_random_key_pair().unwrap();
    let (_, bob_public) = dh.new_random_key_pair().unwrap();

    let first = dh.agree_on_secret(&alice, &bob_public).unwrap();
    let second = dh.agree_on_secret(&alice, &bob_public).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_secret_is_x_coordinate_of_product() {
    let dh = exchanger(CurveId::P384);
    let two = EcPrivateKey::from_bytes(vec![2]);
    let three = EcPrivateKey::from_bytes(vec![3]);

    let two_g = dh.public_key(&two).unwrap();
    let six_g = dh.public_key(&EcPrivateKey::from_bytes(vec![6])).unwrap();

    let secret = dh.agree_on_secret(&three, &two_g).unwrap();
    assert_eq!(secret, six_g.x.to_bytes_be());
}

#[test]
fn test_public_key_matches_generated() {
    for id in CurveId::ALL {
        let dh = exchanger(id);
        let (private, public) = dh.new_random_key_pair().unwrap();
        assert_eq!(dh.public_key(&private).unwrap(), public, "{}", id);
    }
}

#[test]
fn test_private_key_from_hex_agrees() {
    let dh = exchanger(CurveId::P256);
    let (private, public) = dh.new_random_key_pair().unwrap();
    let reparsed = EcPrivateKey::from_hex(&format!("0x{}", hex::encode(private.as_bytes()))).unwrap();
    assert_eq!(dh.public_key(&reparsed).unwrap(), public);
}

#[test]
fn test_scalar_not_below_order_rejected() {
    let dh = exchanger(CurveId::P224);
    let n = dh.curve_params().n.clone();

    let at_order = EcPrivateKey::from_bytes(n.to_bytes_be());
    assert_eq!(
        dh.public_key(&at_order),
        Err(CryptoError::PrivateKeyCurveIncompatible)
    );

    let above_order = EcPrivateKey::from_bytes((&n + 1u32).to_bytes_be());
    assert_eq!(
        dh.public_key(&above_order),
        Err(CryptoError::PrivateKeyCurveIncompatible)
    );

    let below_order = EcPrivateKey::from_bytes((&n - 1u32).to_bytes_be());
    assert!(dh.public_key(&below_order).is_ok());
}

#[test]
fn test_malformed_private_key_rejected() {
    let dh = exchanger(CurveId::P256);
    let (_, peer) = dh.new_random_key_pair().unwrap();

    let empty = EcPrivateKey::from_bytes(Vec::new());
    let too_wide = EcPrivateKey::from_bytes(vec![1u8; 33]);

    assert_eq!(dh.public_key(&empty), Err(CryptoError::InvalidPrivateKey));
    assert_eq!(dh.public_key(&too_wide), Err(CryptoError::InvalidPrivateKey));
    assert_eq!(
        dh.agree_on_secret(&empty, &peer),
        Err(CryptoError::InvalidPrivateKey)
    );
    assert_eq!(
        dh.agree_on_secret(&too_wide, &peer),
        Err(CryptoError::InvalidPrivateKey)
    );
}

#[test]
fn test_malformed_public_key_rejected() {
    let dh = exchanger(CurveId::P224);
    let (private, _) = dh.new_random_key_pair().unwrap();
    let wide = Point::new(BigUint::from_bytes_be(&[0xAB; 29]), BigUint::from(1u32));

    assert_eq!(
        dh.agree_on_secret(&private, &wide),
        Err(CryptoError::InvalidPublicKey)
    );
    assert_eq!(dh.check(&wide), Err(CryptoError::UnexpectedPublicKey));
}

#[test]
fn test_check_rejects_off_curve_point() {
    let dh = exchanger(CurveId::P256);
    let (_, public) = dh.new_random_key_pair().unwrap();
    let off_curve = Point::new(public.x.clone(), &public.y + 1u32);

    assert_eq!(dh.check(&off_curve), Err(CryptoError::PointNotOnCurve));
}

#[test]
fn test_check_rejects_point_from_other_curve() {
    // Same field width, different curve equation
    let p256 = exchanger(CurveId::P256);
    let k256 = exchanger(CurveId::Secp256k1);
    let (_, k256_public) = k256.new_random_key_pair().unwrap();

    assert_eq!(p256.check(&k256_public), Err(CryptoError::PointNotOnCurve));
}

#[test]
fn test_unchecked_off_curve_point_fails_agreement() {
    let dh = exchanger(CurveId::P256);
    let (private, public) = dh.new_random_key_pair().unwrap();
    let off_curve = Point::new(public.x.clone(), &public.y + 1u32);

    assert_eq!(
        dh.agree_on_secret(&private, &off_curve),
        Err(CryptoError::PointNotOnCurve)
    );
}

#[test]
fn test_random_source_failure_propagates() {
    let dh = exchanger(CurveId::P256);
    let result = dh.new_random_key_pair_with_rng(&mut BrokenRng);
    match result {
        Err(CryptoError::RandomSource(msg)) => assert!(msg.contains(ENTROPY_FAILURE)),
        other => panic!("Expected RandomSource error, got {:?}", other),
    }
}

#[test]
fn test_marshal_requires_codec() {
    let dh = exchanger(CurveId::P256);
    let (_, public) = dh.new_random_key_pair().unwrap();
    assert!(matches!(
        dh.marshal_public(&public),
        Err(CryptoError::NotImplemented(_))
    ));
    assert!(matches!(
        dh.unmarshal_public(&[0x04; 65]),
        Err(CryptoError::NotImplemented(_))
    ));
}

#[test]
fn test_marshal_round_trip_with_codec() {
    for id in CurveId::ALL {
        for compress in [false, true] {
            let dh = exchanger(id).with_codec(id.sec1_codec(compress));
            let (_, public) = dh.new_random_key_pair().unwrap();

            let wire = dh.marshal_public(&public).unwrap();
            let restored = dh.unmarshal_public(&wire).unwrap();
            assert_eq!(restored, public, "{} compress={}", id, compress);
            dh.check(&restored).unwrap();
        }
    }
}

#[test]
fn test_missing_curve_is_invalid() {
    assert!(matches!(
        EllipticCurveExchanger::new(None),
        Err(CryptoError::InvalidCurve)
    ));
}
