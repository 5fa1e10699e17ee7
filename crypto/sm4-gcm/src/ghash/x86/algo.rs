// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{arch::*, block::x86::M128iExt};

// From "Intel Carry-Less Multiplication Instruction and its Usage for Computing the GCM Mode",
// Figure 5 (gfmul with a shift-left-by-one reflection fixup)
//
// Both operands are byte-reversed so that bit 0 of the register holds the coefficient of
// `x^127`.
#[inline(always)]
// Follows the Intel carry-less multiplication whitepaper, Figure 5
#[allow(unknown_lints, clippy::needless_late_init)]
pub unsafe fn gfmul(a: __m128i, b: __m128i) -> __m128i {
    let mut tmp3;
    let mut tmp4;
    let tmp5;
    let mut tmp6;

    // tmp3 = _mm_clmulepi64_si128(a, b, 0x00);
    tmp3 = _mm_clmulepi64_si128(a, b, 0x00);
    // tmp4 = _mm_clmulepi64_si128(a, b, 0x10);
    tmp4 = _mm_clmulepi64_si128(a, b, 0x10);
    // tmp5 = _mm_clmulepi64_si128(a, b, 0x01);
    tmp5 = _mm_clmulepi64_si128(a, b, 0x01);
    // tmp6 = _mm_clmulepi64_si128(a, b, 0x11);
    tmp6 = _mm_clmulepi64_si128(a, b, 0x11);

    // tmp4 = _mm_xor_si128(tmp4, tmp5);
    tmp4 = tmp4.xor(tmp5);
    // tmp5 = _mm_slli_si128(tmp4, 8);
    // tmp4 = _mm_srli_si128(tmp4, 8);
    // tmp3 = _mm_xor_si128(tmp3, tmp5);
    tmp3 = tmp3.xor(_mm_slli_si128(tmp4, 8));
    // tmp6 = _mm_xor_si128(tmp6, tmp4);
    tmp6 = tmp6.xor(_mm_srli_si128(tmp4, 8));

    shift_left(tmp3, tmp6)
}

/// Shifts the 256-bit product `tmp6:tmp3` left by one to undo the reflection
#[inline(always)]
#[allow(unknown_lints, clippy::needless_late_init)]
unsafe fn shift_left(mut tmp3: __m128i, mut tmp6: __m128i) -> __m128i {
    let mut tmp7;
    let mut tmp8;
    let tmp9;

    // tmp7 = _mm_srli_epi32(tmp3, 31);
    tmp7 = _mm_srli_epi32(tmp3, 31);
    // tmp8 = _mm_srli_epi32(tmp6, 31);
    tmp8 = _mm_srli_epi32(tmp6, 31);
    // tmp3 = _mm_slli_epi32(tmp3, 1);
    tmp3 = _mm_slli_epi32(tmp3, 1);
    // tmp6 = _mm_slli_epi32(tmp6, 1);
    tmp6 = _mm_slli_epi32(tmp6, 1);

    // tmp9 = _mm_srli_si128(tmp7, 12);
    tmp9 = _mm_srli_si128(tmp7, 12);
    // tmp8 = _mm_slli_si128(tmp8, 4);
    tmp8 = _mm_slli_si128(tmp8, 4);
    // tmp7 = _mm_slli_si128(tmp7, 4);
    tmp7 = _mm_slli_si128(tmp7, 4);
    // tmp3 = _mm_or_si128(tmp3, tmp7);
    tmp3 = _mm_or_si128(tmp3, tmp7);
    // tmp6 = _mm_or_si128(tmp6, tmp8);
    tmp6 = _mm_or_si128(tmp6, tmp8);
    // tmp6 = _mm_or_si128(tmp6, tmp9);
    tmp6 = _mm_or_si128(tmp6, tmp9);

    reduce(tmp3, tmp6)
}

/// Reduction phase of gfmul, modulo `x^128 + x^7 + x^2 + x + 1`
#[inline(always)]
#[allow(unknown_lints, clippy::needless_late_init)]
pub unsafe fn reduce(mut tmp3: __m128i, tmp6: __m128i) -> __m128i {
    let mut tmp7;
    let tmp8;
    let tmp2;

    // first phase
    // tmp7 = _mm_slli_epi32(tmp3, 31);
    // tmp8 = _mm_slli_epi32(tmp3, 30);
    // tmp9 = _mm_slli_epi32(tmp3, 25);
    // tmp7 = _mm_xor_si128(tmp7, tmp8);
    // tmp7 = _mm_xor_si128(tmp7, tmp9);
    tmp7 = _mm_slli_epi32(tmp3, 31)
        .xor(_mm_slli_epi32(tmp3, 30))
        .xor(_mm_slli_epi32(tmp3, 25));
    // tmp8 = _mm_srli_si128(tmp7, 4);
    tmp8 = _mm_srli_si128(tmp7, 4);
    // tmp7 = _mm_slli_si128(tmp7, 12);
    tmp7 = _mm_slli_si128(tmp7, 12);
    // tmp3 = _mm_xor_si128(tmp3, tmp7);
    tmp3 = tmp3.xor(tmp7);

    // second phase
    // tmp2 = _mm_srli_epi32(tmp3, 1);
    // tmp4 = _mm_srli_epi32(tmp3, 2);
    // tmp5 = _mm_srli_epi32(tmp3, 7);
    // tmp2 = _mm_xor_si128(tmp2, tmp4);
    // tmp2 = _mm_xor_si128(tmp2, tmp5);
    // tmp2 = _mm_xor_si128(tmp2, tmp8);
    tmp2 = _mm_srli_epi32(tmp3, 1)
        .xor(_mm_srli_epi32(tmp3, 2))
        .xor(_mm_srli_epi32(tmp3, 7))
        .xor(tmp8);
    // tmp3 = _mm_xor_si128(tmp3, tmp2);
    tmp3 = tmp3.xor(tmp2);
    // tmp6 = _mm_xor_si128(tmp6, tmp3);
    tmp6.xor(tmp3)
}
