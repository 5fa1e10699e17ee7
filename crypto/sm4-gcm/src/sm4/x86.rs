// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{crypt, table, tau, Block, Decrypt, Encrypt, RoundKeys, KEY_LEN};
use crate::{
    arch::*,
    batch::{self, Batch, BatchCipher},
    block::x86::M128iExt,
};
use core::fmt;

macro_rules! rotl {
    ($x:expr, $n:literal) => {
        _mm_or_si128(_mm_slli_epi32::<$n>($x), _mm_srli_epi32::<{ 32 - $n }>($x))
    };
}

/// Byte-wise S-box lookup followed by `L` computed in 128-bit lanes
#[derive(Clone, Copy, Debug)]
pub struct VectorRotate(());

impl VectorRotate {
    /// Returns `None` if the host doesn't support SSE2
    #[inline]
    pub fn new() -> Option<Self> {
        if Sse2::is_supported() {
            Some(Self(()))
        } else {
            None
        }
    }
}

impl super::Transform for VectorRotate {
    #[inline(always)]
    fn apply(&self, x: u32) -> u32 {
        unsafe {
            // Safety: `VectorRotate` can only be constructed if SSE2 is supported
            Sse2::call(|| {
                let t = _mm_cvtsi32_si128(tau(x) as i32);
                let t = _mm_xor_si128(
                    _mm_xor_si128(t, rotl!(t, 2)),
                    _mm_xor_si128(_mm_xor_si128(rotl!(t, 10), rotl!(t, 18)), rotl!(t, 24)),
                );
                _mm_cvtsi128_si32(t) as u32
            })
        }
    }
}

/// SM4 using the AES-NI S-box
///
/// The SM4 and AES S-boxes share the same inversion in GF(2^8) and differ only in the affine
/// maps around it, so the substitution is computed as an affine change of basis into AES,
/// `AESENCLAST` with a zero round key and the inverse affine map back. Eight blocks are
/// processed at a time as two interleaved groups of four 32-bit lanes; any remaining blocks
/// go through the table-driven single block path.
pub struct Sm4Ni {
    keys: RoundKeys,
    fallback: table::Transform,
}

impl Sm4Ni {
    #[inline]
    pub fn is_supported() -> bool {
        Avx2::is_supported()
    }

    /// Returns `None` if the host doesn't support AES-NI and AVX2
    #[inline]
    pub fn new(key: &[u8; KEY_LEN]) -> Option<Self> {
        if !Self::is_supported() {
            return None;
        }

        Some(Self {
            keys: RoundKeys::new(key),
            fallback: table::Transform::default(),
        })
    }
}

impl fmt::Debug for Sm4Ni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm4Ni").finish_non_exhaustive()
    }
}

impl Encrypt for Sm4Ni {
    #[inline]
    fn encrypt_block(&self, block: &mut Block) {
        crypt(&self.fallback, self.keys.words().iter().copied(), block)
    }

    #[inline]
    fn encrypt_blocks(&self, blocks: &mut [Block]) {
        batch::for_each_batch(
            blocks,
            |batch| self.encrypt_batch(batch),
            |block| self.encrypt_block(block),
        )
    }
}

impl Decrypt for Sm4Ni {
    #[inline]
    fn decrypt_block(&self, block: &mut Block) {
        crypt(&self.fallback, self.keys.words().iter().rev().copied(), block)
    }

    #[inline]
    fn decrypt_blocks(&self, blocks: &mut [Block]) {
        batch::for_each_batch(
            blocks,
            |batch| self.decrypt_batch(batch),
            |block| self.decrypt_block(block),
        )
    }
}

impl BatchCipher for Sm4Ni {
    #[inline]
    fn encrypt_batch(&self, batch: &mut Batch) {
        unsafe {
            // Safety: `Sm4Ni` can only be constructed if the instructions are supported
            Avx2::call(|| crypt8(self.keys.words().iter().copied(), batch))
        }
    }

    #[inline]
    fn decrypt_batch(&self, batch: &mut Batch) {
        unsafe {
            // Safety: `Sm4Ni` can only be constructed if the instructions are supported
            Avx2::call(|| crypt8(self.keys.words().iter().rev().copied(), batch))
        }
    }
}

type Lanes = [__m128i; 4];

#[inline(always)]
unsafe fn crypt8<K: IntoIterator<Item = u32>>(keys: K, batch: &mut Batch) {
    let (a, b) = batch.split_at_mut(4);
    let mut x = load(a);
    let mut y = load(b);

    for rk in keys {
        let rk = _mm_set1_epi32(rk as i32);
        x = round(x, rk);
        y = round(y, rk);
    }

    store(a, x);
    store(b, y);
}

/// Transposes four blocks so that lane `n` of register `i` holds word `i` of block `n`
#[inline(always)]
unsafe fn load(blocks: &[Block]) -> Lanes {
    unsafe_assert!(blocks.len() == 4);

    let b0 = __m128i::from_array(blocks[0]);
    let b1 = __m128i::from_array(blocks[1]);
    let b2 = __m128i::from_array(blocks[2]);
    let b3 = __m128i::from_array(blocks[3]);

    [
        pack0(b0, b1, b2, b3).bswap32(),
        pack1(b0, b1, b2, b3).bswap32(),
        pack2(b0, b1, b2, b3).bswap32(),
        pack3(b0, b1, b2, b3).bswap32(),
    ]
}

/// Undoes [`load`], writing the final words in reverse order
#[inline(always)]
unsafe fn store(blocks: &mut [Block], x: Lanes) {
    unsafe_assert!(blocks.len() == 4);

    let x0 = x[0].bswap32();
    let x1 = x[1].bswap32();
    let x2 = x[2].bswap32();
    let x3 = x[3].bswap32();

    blocks[0] = pack0(x3, x2, x1, x0).into_array();
    blocks[1] = pack1(x3, x2, x1, x0).into_array();
    blocks[2] = pack2(x3, x2, x1, x0).into_array();
    blocks[3] = pack3(x3, x2, x1, x0).into_array();
}

#[inline(always)]
unsafe fn pack0(a: __m128i, b: __m128i, c: __m128i, d: __m128i) -> __m128i {
    _mm_unpacklo_epi64(_mm_unpacklo_epi32(a, b), _mm_unpacklo_epi32(c, d))
}

#[inline(always)]
unsafe fn pack1(a: __m128i, b: __m128i, c: __m128i, d: __m128i) -> __m128i {
    _mm_unpackhi_epi64(_mm_unpacklo_epi32(a, b), _mm_unpacklo_epi32(c, d))
}

#[inline(always)]
unsafe fn pack2(a: __m128i, b: __m128i, c: __m128i, d: __m128i) -> __m128i {
    _mm_unpacklo_epi64(_mm_unpackhi_epi32(a, b), _mm_unpackhi_epi32(c, d))
}

#[inline(always)]
unsafe fn pack3(a: __m128i, b: __m128i, c: __m128i, d: __m128i) -> __m128i {
    _mm_unpackhi_epi64(_mm_unpackhi_epi32(a, b), _mm_unpackhi_epi32(c, d))
}

#[inline(always)]
unsafe fn round(x: Lanes, rk: __m128i) -> Lanes {
    let t = x[1].xor(x[2]).xor(x[3]).xor(rk);
    let t = sbox(t);
    let t = t
        .xor(rotl!(t, 2))
        .xor(rotl!(t, 10))
        .xor(rotl!(t, 18))
        .xor(rotl!(t, 24));
    [x[1], x[2], x[3], x[0].xor(t)]
}

// cancels the ShiftRows step of AESENCLAST
const INV_SHIFT_ROWS: [u8; 16] = [
    0x00, 0x0d, 0x0a, 0x07, 0x04, 0x01, 0x0e, 0x0b, 0x08, 0x05, 0x02, 0x0f, 0x0c, 0x09, 0x06, 0x03,
];

// SM4 basis -> AES basis, indexed by nibble
const TO_AES_HI: [u8; 16] = [
    0x00, 0x7a, 0x38, 0x42, 0x20, 0x5a, 0x18, 0x62, 0x40, 0x3a, 0x78, 0x02, 0x60, 0x1a, 0x58, 0x22,
];
const TO_AES_LO: [u8; 16] = [
    0x00, 0xca, 0x77, 0xbd, 0x8b, 0x41, 0xfc, 0x36, 0xd4, 0x1e, 0xa3, 0x69, 0x5f, 0x95, 0x28, 0xe2,
];
const TO_AES_CONST: i8 = 0x23;

// AES basis -> SM4 basis, indexed by nibble
const FROM_AES_HI: [u8; 16] = [
    0x00, 0x13, 0xd2, 0xc1, 0x78, 0x6b, 0xaa, 0xb9, 0xad, 0xbe, 0x7f, 0x6c, 0xd5, 0xc6, 0x07, 0x14,
];
const FROM_AES_LO: [u8; 16] = [
    0x00, 0x60, 0x22, 0x42, 0x1d, 0x7d, 0x3f, 0x5f, 0x87, 0xe7, 0xa5, 0xc5, 0x9a, 0xfa, 0xb8, 0xd8,
];
const FROM_AES_CONST: i8 = 0x3b;

/// Applies the SM4 S-box to all 16 bytes
#[inline(always)]
unsafe fn sbox(x: __m128i) -> __m128i {
    let x = _mm_shuffle_epi8(x, __m128i::from_array(INV_SHIFT_ROWS));
    let x = mul_matrix(x, TO_AES_HI, TO_AES_LO).xor(_mm_set1_epi8(TO_AES_CONST));
    let x = _mm_aesenclast_si128(x, _mm_setzero_si128());
    mul_matrix(x, FROM_AES_HI, FROM_AES_LO).xor(_mm_set1_epi8(FROM_AES_CONST))
}

/// Multiplies each byte by a GF(2) matrix, split into high and low nibble lookups
#[inline(always)]
unsafe fn mul_matrix(x: __m128i, hi: [u8; 16], lo: [u8; 16]) -> __m128i {
    let mask = _mm_set1_epi8(0x0f);
    let lo_nibbles = _mm_and_si128(x, mask);
    let hi_nibbles = _mm_and_si128(_mm_srli_epi16::<4>(x), mask);
    _mm_shuffle_epi8(__m128i::from_array(lo), lo_nibbles)
        .xor(_mm_shuffle_epi8(__m128i::from_array(hi), hi_nibbles))
}
