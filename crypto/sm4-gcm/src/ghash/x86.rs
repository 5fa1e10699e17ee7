// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    arch::*,
    block::{x86::M128iExt, Block},
    ghash::GfMul,
};

mod algo;

/// Carry-less multiplication with `PCLMULQDQ`
#[derive(Clone, Copy, Debug)]
pub struct ClMul(());

impl ClMul {
    /// Returns `None` if the host doesn't support PCLMULQDQ
    #[inline]
    pub fn new() -> Option<Self> {
        if Avx2::is_supported() {
            Some(Self(()))
        } else {
            None
        }
    }
}

impl GfMul for ClMul {
    #[inline]
    fn mul(&self, x: &Block, y: &Block) -> Block {
        unsafe {
            // Safety: `ClMul` can only be constructed if the instructions are supported
            Avx2::call(|| {
                let a = __m128i::from_array(*x).reverse();
                let b = __m128i::from_array(*y).reverse();
                algo::gfmul(a, b).reverse().into_array()
            })
        }
    }
}
