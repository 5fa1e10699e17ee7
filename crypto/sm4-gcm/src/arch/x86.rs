// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::arch::Arch;
use lazy_static::lazy_static;

lazy_static! {
    static ref AVX2_SUPPORTED: bool = {
        let supported = is_x86_feature_detected!("aes")
            && is_x86_feature_detected!("avx2")
            && is_x86_feature_detected!("pclmulqdq");
        tracing::debug!(supported, "detected aes+avx2+pclmulqdq");
        supported
    };
    static ref SSE2_SUPPORTED: bool = {
        let supported = is_x86_feature_detected!("sse2");
        tracing::debug!(supported, "detected sse2");
        supported
    };
}

/// AES-NI, AVX2 and PCLMULQDQ
///
/// Used by the hardware substitution cipher and the carry-less GF(2^128) multiplier.
pub struct Avx2;

impl Arch for Avx2 {
    const NAME: &'static str = "aes+avx2+pclmulqdq";

    #[inline(always)]
    fn is_supported() -> bool {
        *AVX2_SUPPORTED
    }

    #[target_feature(enable = "aes,avx2,pclmulqdq")]
    #[inline]
    unsafe fn call<F: FnOnce() -> R, R>(f: F) -> R {
        debug_assert!(Self::is_supported());
        f()
    }
}

/// 128-bit integer lanes, used by the vector-rotate linear transform
pub struct Sse2;

impl Arch for Sse2 {
    const NAME: &'static str = "sse2";

    #[inline(always)]
    fn is_supported() -> bool {
        *SSE2_SUPPORTED
    }

    #[target_feature(enable = "sse2")]
    #[inline]
    unsafe fn call<F: FnOnce() -> R, R>(f: F) -> R {
        debug_assert!(Self::is_supported());
        f()
    }
}
