// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! SM4-GCM authenticated encryption

use crate::{
    config::{Config, Tier},
    error::Error,
    sm4::{self, KEY_LEN},
};
use core::fmt;

mod generic;
mod iv;
pub mod tier;

#[cfg(test)]
pub mod testing;

pub use generic::Gcm;

/// The IV length that maps directly onto the pre-counter block
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

pub type Tag = [u8; TAG_LEN];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Initialized,
    Encrypting,
    Decrypting,
    Done,
}

pub trait Aead {
    /// Encrypts `payload` in place and returns the tag over `aad` and the ciphertext
    fn encrypt(&mut self, aad: &[u8], payload: &mut [u8]) -> Tag;

    /// Decrypts `payload` in place after checking `tag`
    ///
    /// On failure the payload is zeroed and [`Error::AuthenticationFailed`] is returned.
    fn decrypt(&mut self, aad: &[u8], payload: &mut [u8], tag: &Tag) -> Result<(), Error>;

    #[inline]
    fn seal(&mut self, plaintext: &[u8], aad: &[u8]) -> (Vec<u8>, Tag) {
        let mut ciphertext = plaintext.to_vec();
        let tag = self.encrypt(aad, &mut ciphertext);
        (ciphertext, tag)
    }

    #[inline]
    fn open(&mut self, ciphertext: &[u8], aad: &[u8], tag: &Tag) -> Result<Vec<u8>, Error> {
        let mut plaintext = ciphertext.to_vec();
        self.decrypt(aad, &mut plaintext, tag)?;
        Ok(plaintext)
    }
}

/// An SM4-GCM session for a single key and IV, backed by the selected [`Tier`]
pub struct Sm4Gcm {
    tier: Tier,
    inner: Box<dyn Aead + Send + Sync>,
}

impl Sm4Gcm {
    pub fn new(tier: Tier, key: &[u8; KEY_LEN], iv: &[u8]) -> Result<Self, Error> {
        let inner: Box<dyn Aead + Send + Sync> = match tier {
            Tier::Reference => Box::new(tier::reference(key, iv)?),
            Tier::Optimized => Box::new(tier::optimized(key, iv)?),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Tier::Simd => Box::new(tier::simd(key, iv)?),
            #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
            Tier::Simd => return Err(Error::Unsupported(tier.name())),
        };

        tracing::debug!(%tier, iv_len = iv.len(), "created sm4-gcm session");

        Ok(Self { tier, inner })
    }

    /// Like [`Sm4Gcm::new`] but checks the key length
    pub fn try_new(tier: Tier, key: &[u8], iv: &[u8]) -> Result<Self, Error> {
        let key = sm4::key_from_slice(key)?;
        Self::new(tier, &key, iv)
    }

    pub fn with_config(config: &Config, key: &[u8; KEY_LEN], iv: &[u8]) -> Result<Self, Error> {
        Self::new(config.tier(), key, iv)
    }

    #[inline]
    pub fn tier(&self) -> Tier {
        self.tier
    }
}

impl fmt::Debug for Sm4Gcm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm4Gcm")
            .field("tier", &self.tier)
            .finish_non_exhaustive()
    }
}

impl Aead for Sm4Gcm {
    #[inline]
    fn encrypt(&mut self, aad: &[u8], payload: &mut [u8]) -> Tag {
        self.inner.encrypt(aad, payload)
    }

    #[inline]
    fn decrypt(&mut self, aad: &[u8], payload: &mut [u8], tag: &Tag) -> Result<(), Error> {
        self.inner.decrypt(aad, payload, tag)
    }
}
