// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::tau;

/// The linear map `L`
#[inline(always)]
pub fn linear(x: u32) -> u32 {
    x ^ x.rotate_left(2) ^ x.rotate_left(10) ^ x.rotate_left(18) ^ x.rotate_left(24)
}

/// Byte-wise S-box lookup followed by an explicit rotate/XOR linear map
#[derive(Clone, Copy, Debug, Default)]
pub struct Transform;

impl super::Transform for Transform {
    #[inline(always)]
    fn apply(&self, x: u32) -> u32 {
        linear(tau(x))
    }
}
