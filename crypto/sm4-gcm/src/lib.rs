// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! SM4 block cipher and SM4-GCM authenticated encryption.
//!
//! Every primitive comes in several interchangeable variants. The block cipher has a
//! reference, a table-driven, a vector-rotate and a hardware substitution implementation;
//! the GF(2^128) multiplier has a software and a carry-less multiply implementation. GCM
//! composes them into the [`Tier`]s exposed through [`Sm4Gcm`]. All variants produce
//! byte-identical output for the same inputs.

/// Asserts that a boolean expression is true at runtime, only if debug_assertions are enabled.
///
/// Otherwise, the compiler is told to assume that the expression is always true and can perform
/// additional optimizations.
#[allow(unused_macros)]
macro_rules! unsafe_assert {
    ($cond:expr) => {
        unsafe_assert!($cond, "assumption failed: {}", stringify!($cond));
    };
    ($cond:expr $(, $fmtarg:expr)* $(,)?) => {
        let v = $cond;

        debug_assert!(v $(, $fmtarg)*);
        if cfg!(not(debug_assertions)) && !v {
            core::hint::unreachable_unchecked();
        }
    };
}

mod arch;
pub mod batch;
pub mod block;
pub mod config;
pub mod ctr;
pub mod error;
pub mod gcm;
pub mod ghash;
pub mod sm4;

#[cfg(test)]
pub mod testing;

pub use config::{Config, Tier};
pub use error::Error;
pub use gcm::{Aead, Sm4Gcm, Tag};
