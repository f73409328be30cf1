// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared exchangers and ciphers across tasks
//!
//! Nothing is written after construction, so one instance serves many
//! concurrent callers without locks.

use dh_exchange::config::CurveId;
use dh_exchange::crypto::{
    AesGcmEncrypter, DhExchanger, EllipticCurveExchanger, SymmetricEncrypter,
};
use std::sync::Arc;

#[tokio::test]
async fn test_shared_exchanger_concurrent_agreements() {
    let dh = Arc::new(EllipticCurveExchanger::new(Some(CurveId::P256.curve().unwrap())).unwrap());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let dh = dh.clone();
        handles.push(tokio::spawn(async move {
            let (a, a_pub) = dh.new_random_key_pair().unwrap();
            let (b, b_pub) = dh.new_random_key_pair().unwrap();
            let ab = dh.agree_on_secret(&a, &b_pub).unwrap();
            let ba = dh.agree_on_secret(&b, &a_pub).unwrap();
            ab == ba
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

#[tokio::test]
async fn test_shared_encrypter_concurrent_use() {
    let encrypter = Arc::new(AesGcmEncrypter::new(b"concurrent secret"));

    let mut handles = Vec::new();
    for i in 0..16u8 {
        let encrypter = encrypter.clone();
        handles.push(tokio::spawn(async move {
            let message = vec![i; i as usize + 1];
            let sealed = encrypter.encrypt(&message).unwrap();
            let opened = encrypter.get_decrypter().decrypt(&sealed).unwrap();
            (message, opened, sealed)
        }));
    }

    let mut nonces = Vec::new();
    for handle in handles {
        let (message, opened, sealed) = handle.await.unwrap();
        assert_eq!(message, opened);
        nonces.push(sealed[..dh_exchange::crypto::NONCE_SIZE].to_vec());
    }

    nonces.sort();
    nonces.dedup();
    assert_eq!(nonces.len(), 16, "nonce repeated across concurrent encryptions");
}
