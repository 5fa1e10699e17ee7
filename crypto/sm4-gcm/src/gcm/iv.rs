// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    block::{Block, BlockExt, LEN as BLOCK_LEN},
    error::Error,
    gcm::NONCE_LEN,
    ghash::{GHash, GfMul},
};

/// Derives `J0` from the IV
///
/// A 12-byte IV is used as-is with a counter of 1 appended; any other length is hashed
/// along with its bit length.
pub fn pre_counter_block<M: GfMul>(ghash: &GHash<M>, iv: &[u8]) -> Result<Block, Error> {
    match iv.len() {
        0 => Err(Error::InvalidIvLength),
        NONCE_LEN => {
            let mut j0 = Block::zeroed();
            j0[..NONCE_LEN].copy_from_slice(iv);
            j0[BLOCK_LEN - 1] = 1;
            Ok(j0)
        }
        len => {
            let mut state = ghash.start();
            ghash.update_padded(&mut state, iv);
            Ok(ghash.finish(state, 0, len))
        }
    }
}
