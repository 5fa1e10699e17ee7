// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! GHASH over GF(2^128)

use crate::block::{Block, BlockExt, LEN as BLOCK_LEN};
use zeroize::Zeroize;

pub mod soft;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod x86;

#[cfg(test)]
pub mod testing;

pub const KEY_LEN: usize = 16;

/// Multiplication in GF(2^128)
///
/// Elements are 16-byte big-endian values using GCM's bit-reflected convention: the most
/// significant bit of byte 0 is the coefficient of `x^0`. The field polynomial is
/// `x^128 + x^7 + x^2 + x + 1`, which appears as `0xE1` in the top byte.
pub trait GfMul {
    fn mul(&self, x: &Block, y: &Block) -> Block;
}

impl<T: GfMul + ?Sized> GfMul for Box<T> {
    #[inline]
    fn mul(&self, x: &Block, y: &Block) -> Block {
        (**self).mul(x, y)
    }
}

/// A GHASH accumulator keyed with the hash subkey `H`
pub struct GHash<M> {
    h: Block,
    mul: M,
}

impl<M: GfMul> GHash<M> {
    #[inline]
    pub fn new(h: Block, mul: M) -> Self {
        Self { h, mul }
    }

    #[inline(always)]
    pub fn start(&self) -> Block {
        Block::zeroed()
    }

    /// Folds a single block into the state: `Y = (Y ^ X) * H`
    #[inline(always)]
    pub fn update(&self, state: &mut Block, block: &Block) {
        *state = self.mul.mul(&state.xor(*block), &self.h);
    }

    /// Folds `bytes` into the state, zero-padding the final partial block
    #[inline]
    pub fn update_padded(&self, state: &mut Block, bytes: &[u8]) {
        for chunk in bytes.chunks(BLOCK_LEN) {
            self.update(state, &Block::from_slice(chunk));
        }
    }

    /// Folds the bit lengths of the two hashed inputs and returns the digest
    #[inline]
    pub fn finish(&self, mut state: Block, a_len: usize, b_len: usize) -> Block {
        let mut lengths = Block::zeroed();
        lengths[..8].copy_from_slice(&bit_len(a_len).to_be_bytes());
        lengths[8..].copy_from_slice(&bit_len(b_len).to_be_bytes());
        self.update(&mut state, &lengths);
        state
    }
}

impl<M> Drop for GHash<M> {
    fn drop(&mut self) {
        self.h.zeroize();
    }
}

#[inline(always)]
fn bit_len(len: usize) -> u64 {
    (len as u64).wrapping_mul(8)
}
