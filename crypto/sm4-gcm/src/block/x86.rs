// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{arch::*, block::LEN};

pub trait M128iExt: Sized {
    fn from_array(block: [u8; LEN]) -> Self;
    fn into_array(self) -> [u8; LEN];
    fn xor(self, x: Self) -> Self;
    /// Reverses all 16 bytes
    fn reverse(self) -> Self;
    /// Reverses the bytes within each 32-bit lane
    fn bswap32(self) -> Self;
}

impl M128iExt for __m128i {
    #[inline(always)]
    fn from_array(block: [u8; LEN]) -> Self {
        unsafe { _mm_loadu_si128(block.as_ptr() as *const _) }
    }

    #[inline(always)]
    fn into_array(self) -> [u8; LEN] {
        unsafe { core::mem::transmute(self) }
    }

    #[inline(always)]
    fn xor(self, x: Self) -> Self {
        unsafe { _mm_xor_si128(self, x) }
    }

    #[inline(always)]
    fn reverse(self) -> Self {
        unsafe {
            debug_assert!(Avx2::is_supported());

            let mask: [u8; 16] = [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
            let mask = Self::from_array(mask);
            _mm_shuffle_epi8(self, mask)
        }
    }

    #[inline(always)]
    fn bswap32(self) -> Self {
        unsafe {
            debug_assert!(Avx2::is_supported());

            let mask: [u8; 16] = [3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12];
            let mask = Self::from_array(mask);
            _mm_shuffle_epi8(self, mask)
        }
    }
}
