// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    block::{Block, BlockExt, LEN as BLOCK_LEN},
    ghash::{soft::Soft, GHash, GfMul, KEY_LEN},
};
use core::panic::RefUnwindSafe;
use lazy_static::lazy_static;


/// Hashes the whole blocks of `input` without a length block
pub trait Hasher: Send + Sync {
    fn hash(&self, input: &[u8]) -> Block;
}

impl<M: GfMul + Send + Sync> Hasher for GHash<M> {
    fn hash(&self, input: &[u8]) -> Block {
        let mut state = self.start();
        for block in input.chunks_exact(BLOCK_LEN) {
            self.update(&mut state, &Block::from_slice(block));
        }
        state
    }
}

pub struct Implementation {
    pub(crate) name: &'static str,
    pub(crate) new: fn(key: [u8; KEY_LEN]) -> Box<dyn Hasher>,
}

impl Implementation {
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[allow(clippy::new_ret_no_self)]
    pub fn new(&self, key: [u8; KEY_LEN]) -> Box<dyn Hasher> {
        (self.new)(key)
    }
}

lazy_static! {
    static ref IMPLEMENTATIONS: Vec<Implementation> = {
        let mut impls = vec![Implementation {
            name: "sm4_gcm::ghash::soft",
            new: |key| Box::new(GHash::new(key, Soft)),
        }];

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if crate::ghash::x86::ClMul::new().is_some() {
            impls.push(Implementation {
                name: "sm4_gcm::ghash::clmul",
                new: |key| Box::new(GHash::new(key, crate::ghash::x86::ClMul::new().unwrap())),
            });
        }

        rust_crypto::implementations(&mut impls);

        impls
    };
}

pub fn implementations() -> &'static [Implementation] {
    &IMPLEMENTATIONS
}

pub type Multiplier = Box<dyn GfMul + Send + Sync + RefUnwindSafe>;

/// Every multiplier available on the host
pub fn multipliers() -> Vec<(&'static str, Multiplier)> {
    #[allow(unused_mut)]
    let mut muls: Vec<(&'static str, Multiplier)> = vec![("soft", Box::new(Soft))];

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if let Some(clmul) = crate::ghash::x86::ClMul::new() {
        muls.push(("clmul", Box::new(clmul)));
    }

    muls
}
