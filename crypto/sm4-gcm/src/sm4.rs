// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The SM4 block cipher (GB/T 32907-2016)
//!
//! The 32-round unbalanced Feistel network is shared by every variant; variants differ in
//! how they compute the round transform `T = L(tau(x))`, which is injected as a
//! [`Transform`] when the cipher is constructed.

use crate::{
    batch::{Batch, BatchCipher},
    error::Error,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub mod reference;
pub mod table;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod x86;

#[cfg(test)]
pub mod testing;

pub const KEY_LEN: usize = 16;
pub const ROUNDS: usize = 32;
pub use crate::block::{Block, LEN as BLOCK_LEN};

pub(crate) const SBOX: [u8; 256] = [
    0xd6, 0x90, 0xe9, 0xfe, 0xcc, 0xe1, 0x3d, 0xb7, 0x16, 0xb6, 0x14, 0xc2, 0x28, 0xfb, 0x2c, 0x05,
    0x2b, 0x67, 0x9a, 0x76, 0x2a, 0xbe, 0x04, 0xc3, 0xaa, 0x44, 0x13, 0x26, 0x49, 0x86, 0x06, 0x99,
    0x9c, 0x42, 0x50, 0xf4, 0x91, 0xef, 0x98, 0x7a, 0x33, 0x54, 0x0b, 0x43, 0xed, 0xcf, 0xac, 0x62,
    0xe4, 0xb3, 0x1c, 0xa9, 0xc9, 0x08, 0xe8, 0x95, 0x80, 0xdf, 0x94, 0xfa, 0x75, 0x8f, 0x3f, 0xa6,
    0x47, 0x07, 0xa7, 0xfc, 0xf3, 0x73, 0x17, 0xba, 0x83, 0x59, 0x3c, 0x19, 0xe6, 0x85, 0x4f, 0xa8,
    0x68, 0x6b, 0x81, 0xb2, 0x71, 0x64, 0xda, 0x8b, 0xf8, 0xeb, 0x0f, 0x4b, 0x70, 0x56, 0x9d, 0x35,
    0x1e, 0x24, 0x0e, 0x5e, 0x63, 0x58, 0xd1, 0xa2, 0x25, 0x22, 0x7c, 0x3b, 0x01, 0x21, 0x78, 0x87,
    0xd4, 0x00, 0x46, 0x57, 0x9f, 0xd3, 0x27, 0x52, 0x4c, 0x36, 0x02, 0xe7, 0xa0, 0xc4, 0xc8, 0x9e,
    0xea, 0xbf, 0x8a, 0xd2, 0x40, 0xc7, 0x38, 0xb5, 0xa3, 0xf7, 0xf2, 0xce, 0xf9, 0x61, 0x15, 0xa1,
    0xe0, 0xae, 0x5d, 0xa4, 0x9b, 0x34, 0x1a, 0x55, 0xad, 0x93, 0x32, 0x30, 0xf5, 0x8c, 0xb1, 0xe3,
    0x1d, 0xf6, 0xe2, 0x2e, 0x82, 0x66, 0xca, 0x60, 0xc0, 0x29, 0x23, 0xab, 0x0d, 0x53, 0x4e, 0x6f,
    0xd5, 0xdb, 0x37, 0x45, 0xde, 0xfd, 0x8e, 0x2f, 0x03, 0xff, 0x6a, 0x72, 0x6d, 0x6c, 0x5b, 0x51,
    0x8d, 0x1b, 0xaf, 0x92, 0xbb, 0xdd, 0xbc, 0x7f, 0x11, 0xd9, 0x5c, 0x41, 0x1f, 0x10, 0x5a, 0xd8,
    0x0a, 0xc1, 0x31, 0x88, 0xa5, 0xcd, 0x7b, 0xbd, 0x2d, 0x74, 0xd0, 0x12, 0xb8, 0xe5, 0xb4, 0xb0,
    0x89, 0x69, 0x97, 0x4a, 0x0c, 0x96, 0x77, 0x7e, 0x65, 0xb9, 0xf1, 0x09, 0xc5, 0x6e, 0xc6, 0x84,
    0x18, 0xf0, 0x7d, 0xec, 0x3a, 0xdc, 0x4d, 0x20, 0x79, 0xee, 0x5f, 0x3e, 0xd7, 0xcb, 0x39, 0x48,
];

const FK: [u32; 4] = [0xa3b1bac6, 0x56aa3350, 0x677d9197, 0xb27022dc];

// byte j of CK[i] is (4i + j) * 7 mod 256
const CK: [u32; ROUNDS] = [
    0x00070e15, 0x1c232a31, 0x383f464d, 0x545b6269, 0x70777e85, 0x8c939aa1, 0xa8afb6bd, 0xc4cbd2d9,
    0xe0e7eef5, 0xfc030a11, 0x181f262d, 0x343b4249, 0x50575e65, 0x6c737a81, 0x888f969d, 0xa4abb2b9,
    0xc0c7ced5, 0xdce3eaf1, 0xf8ff060d, 0x141b2229, 0x30373e45, 0x4c535a61, 0x686f767d, 0x848b9299,
    0xa0a7aeb5, 0xbcc3cad1, 0xd8dfe6ed, 0xf4fb0209, 0x10171e25, 0x2c333a41, 0x484f565d, 0x646b7279,
];

pub trait Encrypt {
    fn encrypt_block(&self, block: &mut Block);

    #[inline]
    fn encrypt_blocks(&self, blocks: &mut [Block]) {
        for block in blocks {
            self.encrypt_block(block);
        }
    }
}

pub trait Decrypt {
    fn decrypt_block(&self, block: &mut Block);

    #[inline]
    fn decrypt_blocks(&self, blocks: &mut [Block]) {
        for block in blocks {
            self.decrypt_block(block);
        }
    }
}

/// A keyed SM4 instance that can be shared between threads
pub trait BlockCipher: Encrypt + Decrypt + Send + Sync {}

impl<T: Encrypt + Decrypt + Send + Sync> BlockCipher for T {}

impl<T: Encrypt + ?Sized> Encrypt for Box<T> {
    #[inline]
    fn encrypt_block(&self, block: &mut Block) {
        (**self).encrypt_block(block)
    }

    #[inline]
    fn encrypt_blocks(&self, blocks: &mut [Block]) {
        (**self).encrypt_blocks(blocks)
    }
}

impl<T: Decrypt + ?Sized> Decrypt for Box<T> {
    #[inline]
    fn decrypt_block(&self, block: &mut Block) {
        (**self).decrypt_block(block)
    }

    #[inline]
    fn decrypt_blocks(&self, blocks: &mut [Block]) {
        (**self).decrypt_blocks(blocks)
    }
}

/// The round transform `T`: the S-box applied to each byte followed by the linear map `L`
pub trait Transform {
    fn apply(&self, x: u32) -> u32;
}

/// Applies the S-box to each byte of `x`
#[inline(always)]
pub(crate) fn tau(x: u32) -> u32 {
    let [a, b, c, d] = x.to_be_bytes();
    u32::from_be_bytes([
        SBOX[a as usize],
        SBOX[b as usize],
        SBOX[c as usize],
        SBOX[d as usize],
    ])
}

/// The 32 round subkeys derived from a cipher key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys([u32; ROUNDS]);

impl RoundKeys {
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        let mut k = [0u32; 4];
        for ((k, mk), fk) in k.iter_mut().zip(key.chunks_exact(4)).zip(FK) {
            *k = u32::from_be_bytes([mk[0], mk[1], mk[2], mk[3]]) ^ fk;
        }

        let mut rk = [0u32; ROUNDS];
        for (rk, ck) in rk.iter_mut().zip(CK) {
            let t = tau(k[1] ^ k[2] ^ k[3] ^ ck);
            let next = k[0] ^ t ^ t.rotate_left(13) ^ t.rotate_left(23);
            *rk = next;
            k = [k[1], k[2], k[3], next];
        }

        k.zeroize();

        Self(rk)
    }

    #[inline(always)]
    pub fn words(&self) -> &[u32; ROUNDS] {
        &self.0
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}

/// Runs the Feistel network over a single block with the round keys in the given order
#[inline(always)]
pub(crate) fn crypt<T, K>(transform: &T, keys: K, block: &mut Block)
where
    T: Transform + ?Sized,
    K: IntoIterator<Item = u32>,
{
    let mut x = [0u32; 4];
    for (x, bytes) in x.iter_mut().zip(block.chunks_exact(4)) {
        *x = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    for rk in keys {
        let next = x[0] ^ transform.apply(x[1] ^ x[2] ^ x[3] ^ rk);
        x = [x[1], x[2], x[3], next];
    }

    // the output is the final four words in reverse order
    for (bytes, x) in block.chunks_exact_mut(4).zip(x.iter().rev()) {
        bytes.copy_from_slice(&x.to_be_bytes());
    }
}

/// SM4 keyed with a fixed round transform
pub struct Sm4<T> {
    keys: RoundKeys,
    transform: T,
}

impl<T: Transform> Sm4<T> {
    #[inline]
    pub fn with_transform(key: &[u8; KEY_LEN], transform: T) -> Self {
        Self {
            keys: RoundKeys::new(key),
            transform,
        }
    }

    #[inline]
    pub fn round_keys(&self) -> &RoundKeys {
        &self.keys
    }
}

impl<T: Transform + Default> Sm4<T> {
    #[inline]
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        Self::with_transform(key, T::default())
    }

    #[inline]
    pub fn try_new(key: &[u8]) -> Result<Self, Error> {
        let key = key_from_slice(key)?;
        Ok(Self::new(&key))
    }
}

impl<T> fmt::Debug for Sm4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm4")
            .field("transform", &core::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: Transform> Encrypt for Sm4<T> {
    #[inline]
    fn encrypt_block(&self, block: &mut Block) {
        crypt(&self.transform, self.keys.words().iter().copied(), block)
    }
}

impl<T: Transform> Decrypt for Sm4<T> {
    #[inline]
    fn decrypt_block(&self, block: &mut Block) {
        crypt(&self.transform, self.keys.words().iter().rev().copied(), block)
    }
}

impl<T: Transform> BatchCipher for Sm4<T> {
    #[inline]
    fn encrypt_batch(&self, batch: &mut Batch) {
        self.encrypt_blocks(batch)
    }

    #[inline]
    fn decrypt_batch(&self, batch: &mut Batch) {
        self.decrypt_blocks(batch)
    }
}

pub type Reference = Sm4<reference::Transform>;
pub type TableDriven = Sm4<table::Transform>;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub type VectorRotate = Sm4<x86::VectorRotate>;

pub(crate) fn key_from_slice(key: &[u8]) -> Result<[u8; KEY_LEN], Error> {
    key.try_into()
        .map_err(|_| Error::InvalidKeyLength { len: key.len() })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Reference,
    TableDriven,
    VectorRotate,
    HardwareSubstitution,
}

impl Variant {
    pub const ALL: [Self; 4] = [
        Self::Reference,
        Self::TableDriven,
        Self::VectorRotate,
        Self::HardwareSubstitution,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::TableDriven => "table",
            Self::VectorRotate => "vector_rotate",
            Self::HardwareSubstitution => "hardware_substitution",
        }
    }

    /// Returns `true` if the host has the instructions the variant needs
    pub fn is_supported(self) -> bool {
        match self {
            Self::Reference | Self::TableDriven => true,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Self::VectorRotate => x86::VectorRotate::new().is_some(),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Self::HardwareSubstitution => x86::Sm4Ni::is_supported(),
            #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
            Self::VectorRotate | Self::HardwareSubstitution => false,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A block cipher that also exposes the 8-block batch entry points
pub trait Sm4Cipher: BlockCipher + BatchCipher {}

impl<T: BlockCipher + BatchCipher> Sm4Cipher for T {}

/// Keys the requested variant
///
/// Returns [`Error::Unsupported`] if the host lacks the instructions the variant needs.
pub fn new(variant: Variant, key: &[u8; KEY_LEN]) -> Result<Box<dyn Sm4Cipher>, Error> {
    let cipher: Box<dyn Sm4Cipher> = match variant {
        Variant::Reference => Box::new(Reference::new(key)),
        Variant::TableDriven => Box::new(TableDriven::new(key)),
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Variant::VectorRotate => {
            let transform = x86::VectorRotate::new().ok_or(Error::Unsupported(variant.name()))?;
            Box::new(Sm4::with_transform(key, transform))
        }
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Variant::HardwareSubstitution => {
            Box::new(x86::Sm4Ni::new(key).ok_or(Error::Unsupported(variant.name()))?)
        }
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        Variant::VectorRotate | Variant::HardwareSubstitution => {
            return Err(Error::Unsupported(variant.name()))
        }
    };

    tracing::debug!(%variant, "selected block cipher variant");

    Ok(cipher)
}
