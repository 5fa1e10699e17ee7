// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{block::Block, ghash::GfMul};

const R: u128 = 0xe1 << 120;

/// Bitwise shift-and-add multiplication
///
/// Walks the 128 bits of `x` from the most significant bit of byte 0, adding `V` into the
/// product for every set bit, then shifting `V` right by one and reducing whenever a bit
/// falls off the end. Both branches are replaced by masks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Soft;

impl GfMul for Soft {
    #[inline]
    fn mul(&self, x: &Block, y: &Block) -> Block {
        let x = u128::from_be_bytes(*x);
        let mut v = u128::from_be_bytes(*y);
        let mut z = 0u128;

        for i in (0..128).rev() {
            let bit = ((x >> i) & 1).wrapping_neg();
            z ^= v & bit;

            let carry = (v & 1).wrapping_neg();
            v = (v >> 1) ^ (R & carry);
        }

        z.to_be_bytes()
    }
}
