// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::block::{Block, LEN as BLOCK_LEN};

/// A GCM counter block
///
/// Only the low 32 bits are incremented, wrapping at 2^32; the upper 96 bits are left as
/// they were derived from the IV.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter(Block);

impl Counter {
    #[inline(always)]
    pub fn new(block: &Block) -> Self {
        Self(*block)
    }

    #[inline(always)]
    pub fn block(&self) -> Block {
        self.0
    }

    #[inline(always)]
    pub fn increment(&mut self) {
        let mut low = [0u8; 4];
        low.copy_from_slice(&self.0[BLOCK_LEN - 4..]);
        let low = u32::from_be_bytes(low).wrapping_add(1);
        self.0[BLOCK_LEN - 4..].copy_from_slice(&low.to_be_bytes());
    }

    /// Writes the current value into each block, incrementing after every one
    #[inline(always)]
    pub fn fill(&mut self, blocks: &mut [Block]) {
        for block in blocks {
            *block = self.0;
            self.increment();
        }
    }
}
