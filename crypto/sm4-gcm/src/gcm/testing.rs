// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    gcm::{tier, Aead, Gcm},
    ghash::soft::Soft,
    sm4::{self, Variant, KEY_LEN},
};
use lazy_static::lazy_static;

mod rust_crypto;

pub struct Implementation {
    pub(crate) name: &'static str,
    /// Returns `None` if the implementation can't handle the IV length
    pub(crate) new: fn(key: [u8; KEY_LEN], iv: &[u8]) -> Option<Box<dyn Aead>>,
}

impl Implementation {
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[allow(clippy::new_ret_no_self)]
    pub fn new(&self, key: [u8; KEY_LEN], iv: &[u8]) -> Option<Box<dyn Aead>> {
        (self.new)(key, iv)
    }
}

lazy_static! {
    static ref IMPLEMENTATIONS: Vec<Implementation> = {
        let mut impls = vec![
            Implementation {
                name: "sm4_gcm::tier::reference",
                new: |key, iv| Some(Box::new(tier::reference(&key, iv).unwrap())),
            },
            Implementation {
                name: "sm4_gcm::tier::optimized",
                new: |key, iv| Some(Box::new(tier::optimized(&key, iv).unwrap())),
            },
        ];

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        x86::implementations(&mut impls);

        rust_crypto::implementations(&mut impls);

        impls
    };
}

pub fn implementations() -> &'static [Implementation] {
    &IMPLEMENTATIONS
}

/// Pairs every cipher variant with the software multiplier
fn variant(variant: Variant, key: [u8; KEY_LEN], iv: &[u8]) -> Option<Box<dyn Aead>> {
    let cipher = sm4::new(variant, &key).unwrap();
    Some(Box::new(Gcm::new(cipher, Soft, iv).unwrap()))
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86 {
    use super::*;
    use crate::ghash::x86::ClMul;

    pub fn implementations(impls: &mut Vec<Implementation>) {
        if Variant::VectorRotate.is_supported() {
            impls.push(Implementation {
                name: "sm4_gcm::vector_rotate+soft",
                new: |key, iv| variant(Variant::VectorRotate, key, iv),
            });
        }

        if Variant::HardwareSubstitution.is_supported() {
            impls.push(Implementation {
                name: "sm4_gcm::sm4ni+soft",
                new: |key, iv| variant(Variant::HardwareSubstitution, key, iv),
            });
        }

        if ClMul::new().is_some() {
            impls.push(Implementation {
                name: "sm4_gcm::table+clmul",
                new: |key, iv| {
                    let cipher = sm4::TableDriven::new(&key);
                    Some(Box::new(Gcm::new(cipher, ClMul::new()?, iv).unwrap()))
                },
            });
        }

        if crate::Tier::Simd.is_supported() {
            impls.push(Implementation {
                name: "sm4_gcm::tier::simd",
                new: |key, iv| Some(Box::new(tier::simd(&key, iv).unwrap())),
            });
        }
    }
}
