// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{Cipher, Implementation};
use crate::sm4::BLOCK_LEN;
use ::sm4::{
    cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit},
    Sm4 as Impl,
};

impl Cipher for Impl {
    fn encrypt(&self, input: &mut [u8]) {
        for block in input.chunks_exact_mut(BLOCK_LEN) {
            self.encrypt_block(GenericArray::from_mut_slice(block));
        }
    }

    fn decrypt(&self, input: &mut [u8]) {
        for block in input.chunks_exact_mut(BLOCK_LEN) {
            self.decrypt_block(GenericArray::from_mut_slice(block));
        }
    }
}

pub fn implementations(impls: &mut Vec<Implementation>) {
    impls.push(Implementation {
        name: "RustCrypto",
        new: |key| Box::new(Impl::new(&key.into())),
    });
}
