// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    block::BlockExt,
    sm4::{self, Block, Decrypt, Encrypt, Variant, BLOCK_LEN, KEY_LEN},
};
use lazy_static::lazy_static;

mod rust_crypto;

/// Operates on the whole blocks of `input`; any trailing partial block is left untouched
pub trait Cipher: Send + Sync {
    fn encrypt(&self, input: &mut [u8]);
    fn decrypt(&self, input: &mut [u8]);
}

pub struct Implementation {
    pub(crate) name: &'static str,
    pub(crate) new: fn(key: [u8; KEY_LEN]) -> Box<dyn Cipher>,
}

impl Implementation {
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[allow(clippy::new_ret_no_self)]
    pub fn new(&self, key: [u8; KEY_LEN]) -> Box<dyn Cipher> {
        (self.new)(key)
    }
}

struct Native(Box<dyn sm4::Sm4Cipher>);

impl Native {
    fn boxed(variant: Variant, key: [u8; KEY_LEN]) -> Box<dyn Cipher> {
        Box::new(Self(sm4::new(variant, &key).unwrap()))
    }
}

impl Cipher for Native {
    fn encrypt(&self, input: &mut [u8]) {
        let mut blocks = to_blocks(input);
        self.0.encrypt_blocks(&mut blocks);
        from_blocks(&blocks, input);
    }

    fn decrypt(&self, input: &mut [u8]) {
        let mut blocks = to_blocks(input);
        self.0.decrypt_blocks(&mut blocks);
        from_blocks(&blocks, input);
    }
}

fn to_blocks(input: &[u8]) -> Vec<Block> {
    input
        .chunks_exact(BLOCK_LEN)
        .map(Block::from_slice)
        .collect()
}

fn from_blocks(blocks: &[Block], output: &mut [u8]) {
    for (block, output) in blocks.iter().zip(output.chunks_exact_mut(BLOCK_LEN)) {
        output.copy_from_slice(block);
    }
}

lazy_static! {
    static ref IMPLEMENTATIONS: Vec<Implementation> = {
        let mut impls = vec![
            Implementation {
                name: "sm4_gcm::sm4::reference",
                new: |key| Native::boxed(Variant::Reference, key),
            },
            Implementation {
                name: "sm4_gcm::sm4::table",
                new: |key| Native::boxed(Variant::TableDriven, key),
            },
        ];

        if Variant::VectorRotate.is_supported() {
            impls.push(Implementation {
                name: "sm4_gcm::sm4::vector_rotate",
                new: |key| Native::boxed(Variant::VectorRotate, key),
            });
        }

        if Variant::HardwareSubstitution.is_supported() {
            impls.push(Implementation {
                name: "sm4_gcm::sm4::sm4ni",
                new: |key| Native::boxed(Variant::HardwareSubstitution, key),
            });
        }

        rust_crypto::implementations(&mut impls);

        impls
    };
}

pub fn implementations() -> &'static [Implementation] {
    &IMPLEMENTATIONS
}
