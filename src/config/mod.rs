// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Curve selection and exchanger configuration

pub mod curves;
pub mod exchange;

pub use curves::{CurveId, CurveRegistry};
pub use exchange::{ExchangeConfig, PublicKeyEncoding};
