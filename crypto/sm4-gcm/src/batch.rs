// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Multi-block processing
//!
//! Blocks are grouped into batches of [`BATCH_LEN`] for variants that can process several
//! blocks at once. Large buffers can also be split across a pool of worker threads.

use crate::{
    block::Block,
    error::Error,
    sm4::{Decrypt, Encrypt},
};
use rayon::{prelude::*, ThreadPoolBuilder};


pub const BATCH_LEN: usize = 8;

pub type Batch = [Block; BATCH_LEN];

pub trait BatchCipher {
    fn encrypt_batch(&self, batch: &mut Batch);
    fn decrypt_batch(&self, batch: &mut Batch);
}

impl<T: BatchCipher + ?Sized> BatchCipher for Box<T> {
    #[inline]
    fn encrypt_batch(&self, batch: &mut Batch) {
        (**self).encrypt_batch(batch)
    }

    #[inline]
    fn decrypt_batch(&self, batch: &mut Batch) {
        (**self).decrypt_batch(batch)
    }
}

/// Calls `batch` for every full group of [`BATCH_LEN`] blocks and `single` for the rest
#[inline]
pub fn for_each_batch<B, S>(blocks: &mut [Block], mut batch: B, mut single: S)
where
    B: FnMut(&mut Batch),
    S: FnMut(&mut Block),
{
    let mut chunks = blocks.chunks_exact_mut(BATCH_LEN);

    for chunk in &mut chunks {
        if let Ok(chunk) = <&mut Batch>::try_from(chunk) {
            batch(chunk);
        }
    }

    let remainder = chunks.into_remainder();

    if !remainder.is_empty() {
        tracing::trace!(remaining = remainder.len(), "single block fallback");
    }

    for block in remainder {
        single(block);
    }
}

/// Encrypts `blocks` in place, split into `workers` contiguous ranges
///
/// Each range is handed to a thread of a dedicated pool and the call returns once every
/// range is done. The output is identical to calling [`Encrypt::encrypt_blocks`] directly.
pub fn encrypt_parallel<C>(cipher: &C, blocks: &mut [Block], workers: usize) -> Result<(), Error>
where
    C: Encrypt + Sync + ?Sized,
{
    parallel(blocks, workers, |range| cipher.encrypt_blocks(range))
}

/// Decrypts `blocks` in place, split into `workers` contiguous ranges
pub fn decrypt_parallel<C>(cipher: &C, blocks: &mut [Block], workers: usize) -> Result<(), Error>
where
    C: Decrypt + Sync + ?Sized,
{
    parallel(blocks, workers, |range| cipher.decrypt_blocks(range))
}

fn parallel<F>(blocks: &mut [Block], workers: usize, f: F) -> Result<(), Error>
where
    F: Fn(&mut [Block]) + Sync,
{
    if workers == 0 {
        return Err(Error::InvalidWorkerCount);
    }

    if workers == 1 || blocks.len() <= BATCH_LEN {
        f(blocks);
        return Ok(());
    }

    let range_len = range_len(blocks.len(), workers);
    let threads = threads(blocks.len(), range_len, workers);

    tracing::debug!(
        workers,
        threads,
        blocks = blocks.len(),
        range_len,
        "processing blocks in parallel"
    );

    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

    pool.install(|| blocks.par_chunks_mut(range_len).for_each(|range| f(range)));

    Ok(())
}

/// Splits `len` blocks into at most `workers` ranges, keeping every range but the last a
/// multiple of [`BATCH_LEN`]
#[inline]
fn range_len(len: usize, workers: usize) -> usize {
    let per_worker = len.div_ceil(workers);
    per_worker.div_ceil(BATCH_LEN) * BATCH_LEN
}

/// Pool size for `len` blocks split into ranges of `range_len`
///
/// Never more threads than there are ranges to process.
#[inline]
fn threads(len: usize, range_len: usize, workers: usize) -> usize {
    workers.min(len.div_ceil(range_len)).max(1)
}
