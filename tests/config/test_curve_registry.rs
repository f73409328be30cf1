// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use dh_exchange::config::{CurveId, CurveRegistry};
use dh_exchange::crypto::CryptoError;
use num_bigint::BigUint;

#[test]
fn test_registry_lists_every_curve() {
    let registry = CurveRegistry::new();
    let curves = registry.list_supported_curves();

    assert_eq!(curves.len(), CurveId::ALL.len());
    for id in CurveId::ALL {
        assert!(registry.is_curve_supported(id));
        assert!(curves.contains(&id));
    }
    assert_eq!(registry.default_curve(), CurveId::P256);
}

#[test]
fn test_lookup_by_name_and_alias() {
    let registry = CurveRegistry::default();

    let by_name = registry.get_curve_by_name("P-384").unwrap();
    assert_eq!(by_name.params().name, "P-384");

    let by_alias = registry.get_curve_by_name("prime256v1").unwrap();
    assert_eq!(by_alias.params().name, "P-256");

    assert!(registry.get_curve_by_name("curve25519").is_none());
}

#[test]
fn test_curve_id_parsing() {
    assert_eq!("p224".parse::<CurveId>().unwrap(), CurveId::P224);
    assert_eq!("P_521".parse::<CurveId>().unwrap(), CurveId::P521);
    assert_eq!("SECP256K1".parse::<CurveId>().unwrap(), CurveId::Secp256k1);

    match "ed25519".parse::<CurveId>() {
        Err(CryptoError::UnknownCurve(name)) => assert_eq!(name, "ed25519"),
        other => panic!("Expected UnknownCurve, got {:?}", other),
    }
}

#[test]
fn test_curve_parameters_consistent() {
    for id in CurveId::ALL {
        let curve = id.curve().unwrap();
        let params = curve.params();

        assert_eq!(params.name, id.name());
        assert_eq!(params.bit_size, id.bit_size());
        assert_eq!(params.p, id.field_prime());
        assert_eq!(params.byte_len(), (id.bit_size() + 7) / 8);

        // Order and base point lie inside the field
        assert!(params.n < params.p);
        assert!(params.gx < params.p);
        assert!(params.gy < params.p);
        assert!(curve.is_on_curve(&params.base_point()), "{}", id);
    }
}

#[test]
fn test_p521_field_is_mersenne() {
    let expected = (BigUint::from(1u32) << 521) - 1u32;
    assert_eq!(CurveId::P521.field_prime(), expected);
    assert_eq!(CurveId::P521.curve().unwrap().params().byte_len(), 66);
}
