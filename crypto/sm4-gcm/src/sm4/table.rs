// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::{reference::linear, SBOX};
use core::fmt;
use lazy_static::lazy_static;

type Tables = [[u32; 256]; 4];

lazy_static! {
    static ref TABLES: Tables = {
        tracing::trace!("building sm4 round tables");

        let mut tables = [[0u32; 256]; 4];
        for (idx, sbox) in SBOX.iter().enumerate() {
            let sbox = *sbox as u32;
            // `L` is linear so it distributes over the XOR of each byte position
            tables[0][idx] = linear(sbox << 24);
            tables[1][idx] = linear(sbox << 16);
            tables[2][idx] = linear(sbox << 8);
            tables[3][idx] = linear(sbox);
        }
        tables
    };
}

/// Four 256-entry tables merging the S-box and `L` for each byte position
///
/// The tables are built once and shared by every instance.
#[derive(Clone, Copy)]
pub struct Transform {
    tables: &'static Tables,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self { tables: &TABLES }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("table::Transform").finish_non_exhaustive()
    }
}

impl super::Transform for Transform {
    #[inline(always)]
    fn apply(&self, x: u32) -> u32 {
        let [a, b, c, d] = x.to_be_bytes();
        self.tables[0][a as usize]
            ^ self.tables[1][b as usize]
            ^ self.tables[2][c as usize]
            ^ self.tables[3][d as usize]
    }
}
