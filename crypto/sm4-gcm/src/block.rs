// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::sync::atomic::{compiler_fence, Ordering};
use subtle::ConstantTimeEq;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod x86;

pub const LEN: usize = 16;

/// A single 128-bit block, in the byte order it appears on the wire
pub type Block = [u8; LEN];

pub trait BlockExt: Sized {
    fn zeroed() -> Self;

    /// Loads up to [`LEN`] bytes, zero-padding the rest
    fn from_slice(bytes: &[u8]) -> Self;

    fn xor(self, x: Self) -> Self;

    /// XORs the block into the prefix of `bytes`
    ///
    /// Only `min(bytes.len(), LEN)` bytes are touched.
    fn xor_into(&self, bytes: &mut [u8]);

    /// Compares two blocks without branching on any of the individual bytes
    fn ct_ensure_eq(self, b: Self) -> Result<(), ()>;
}

impl BlockExt for Block {
    #[inline(always)]
    fn zeroed() -> Self {
        [0; LEN]
    }

    #[inline(always)]
    fn from_slice(bytes: &[u8]) -> Self {
        let mut block = Self::zeroed();
        let len = bytes.len().min(LEN);
        block[..len].copy_from_slice(&bytes[..len]);
        block
    }

    #[inline(always)]
    fn xor(mut self, x: Self) -> Self {
        for (a, b) in self.iter_mut().zip(x.iter()) {
            *a ^= b;
        }
        self
    }

    #[inline(always)]
    fn xor_into(&self, bytes: &mut [u8]) {
        for (a, b) in bytes.iter_mut().zip(self.iter()) {
            *a ^= b;
        }
    }

    #[inline]
    fn ct_ensure_eq(self, b: Self) -> Result<(), ()> {
        // accumulate every difference before looking at the result
        let mut diff = 0u8;
        for (a, b) in self.iter().zip(b.iter()) {
            diff |= a ^ b;
        }

        compiler_fence(Ordering::SeqCst);

        if bool::from(diff.ct_eq(&0)) {
            Ok(())
        } else {
            Err(())
        }
    }
}
