// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    batch::BATCH_LEN,
    block::{Block, BlockExt, LEN as BLOCK_LEN},
    ctr::Counter,
    error::Error,
    gcm::{iv, Aead, State, Tag},
    ghash::{GHash, GfMul},
    sm4::Encrypt,
};
use core::{
    fmt,
    sync::atomic::{compiler_fence, Ordering},
};
use zeroize::Zeroize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// GCM over any block cipher and GF(2^128) multiplier
///
/// Every tier shares this control flow and only differs in the types it is instantiated
/// with.
pub struct Gcm<C, M> {
    cipher: C,
    ghash: GHash<M>,
    j0: Block,
    state: State,
}

impl<C, M> Gcm<C, M>
where
    C: Encrypt,
    M: GfMul,
{
    /// Derives the hash subkey and pre-counter block for `iv`
    pub fn new(cipher: C, mul: M, iv: &[u8]) -> Result<Self, Error> {
        let mut h = Block::zeroed();
        cipher.encrypt_block(&mut h);
        let ghash = GHash::new(h, mul);
        h.zeroize();

        let j0 = iv::pre_counter_block(&ghash, iv)?;

        Ok(Self {
            cipher,
            ghash,
            j0,
            state: State::Initialized,
        })
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    fn transition(&mut self, state: State) {
        tracing::trace!(from = ?self.state, to = ?state, "gcm state");
        self.state = state;
    }

    #[inline]
    fn gcm(&self, direction: Direction, aad: &[u8], payload: &mut [u8]) -> Tag {
        // the counter restarts from J0 on every call
        let mut ctr = Counter::new(&self.j0);
        ctr.increment();

        let mut state = self.ghash.start();
        self.ghash.update_padded(&mut state, aad);

        let mut keystream = [Block::zeroed(); BATCH_LEN];

        for chunk in payload.chunks_mut(BATCH_LEN * BLOCK_LEN) {
            let blocks = &mut keystream[..chunk.len().div_ceil(BLOCK_LEN)];
            ctr.fill(blocks);
            self.cipher.encrypt_blocks(blocks);

            // the tag is always computed over the ciphertext
            if direction == Direction::Decrypt {
                self.ghash.update_padded(&mut state, chunk);
            }

            for (segment, key) in chunk.chunks_mut(BLOCK_LEN).zip(blocks.iter()) {
                key.xor_into(segment);
            }

            if direction == Direction::Encrypt {
                self.ghash.update_padded(&mut state, chunk);
            }
        }

        keystream.zeroize();

        let mut ek0 = self.j0;
        self.cipher.encrypt_block(&mut ek0);

        let tag = self
            .ghash
            .finish(state, aad.len(), payload.len())
            .xor(ek0);

        ek0.zeroize();

        tag
    }
}

impl<C, M> Aead for Gcm<C, M>
where
    C: Encrypt,
    M: GfMul,
{
    #[inline]
    fn encrypt(&mut self, aad: &[u8], payload: &mut [u8]) -> Tag {
        self.transition(State::Encrypting);
        let tag = self.gcm(Direction::Encrypt, aad, payload);
        self.transition(State::Done);
        tag
    }

    #[inline]
    fn decrypt(&mut self, aad: &[u8], payload: &mut [u8], tag: &Tag) -> Result<(), Error> {
        self.transition(State::Decrypting);
        let expected = self.gcm(Direction::Decrypt, aad, payload);

        compiler_fence(Ordering::SeqCst);

        let res = expected.ct_ensure_eq(*tag);
        self.transition(State::Done);

        if res.is_err() {
            payload.zeroize();
            tracing::debug!(
                aad_len = aad.len(),
                payload_len = payload.len(),
                "authentication failed"
            );
            return Err(Error::AuthenticationFailed);
        }

        Ok(())
    }
}

impl<C, M> fmt::Debug for Gcm<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gcm")
            .field("cipher", &core::any::type_name::<C>())
            .field("mul", &core::any::type_name::<M>())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
