// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The implementation tiers
//!
//! | Tier | cipher | multiplier |
//! |---|---|---|
//! | [`Reference`] | [`sm4::Reference`] | [`Soft`] |
//! | [`Optimized`] | [`sm4::TableDriven`] | [`Soft`] |
//! | `Simd` | `Sm4Ni` | `ClMul` |

use crate::{
    error::Error,
    gcm::Gcm,
    ghash::soft::Soft,
    sm4::{self, KEY_LEN},
};

pub type Reference = Gcm<sm4::Reference, Soft>;
pub type Optimized = Gcm<sm4::TableDriven, Soft>;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub type Simd = Gcm<sm4::x86::Sm4Ni, crate::ghash::x86::ClMul>;

#[inline]
pub fn reference(key: &[u8; KEY_LEN], iv: &[u8]) -> Result<Reference, Error> {
    Gcm::new(sm4::Reference::new(key), Soft, iv)
}

#[inline]
pub fn optimized(key: &[u8; KEY_LEN], iv: &[u8]) -> Result<Optimized, Error> {
    Gcm::new(sm4::TableDriven::new(key), Soft, iv)
}

/// Returns [`Error::Unsupported`] if the host lacks AES-NI, AVX2 or PCLMULQDQ
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline]
pub fn simd(key: &[u8; KEY_LEN], iv: &[u8]) -> Result<Simd, Error> {
    use crate::{arch::Arch, ghash::x86::ClMul};

    let unsupported = || Error::Unsupported(crate::arch::Avx2::NAME);
    let cipher = sm4::x86::Sm4Ni::new(key).ok_or_else(unsupported)?;
    let mul = ClMul::new().ok_or_else(unsupported)?;
    Gcm::new(cipher, mul, iv)
}
