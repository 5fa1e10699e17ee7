// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    batch,
    block::Block,
    error::Error,
    gcm::Sm4Gcm,
    sm4::{self, Variant, KEY_LEN},
};
use core::{fmt, num::NonZeroUsize, str::FromStr};

pub const TIER_ENV: &str = "SM4_GCM_TIER";
pub const WORKERS_ENV: &str = "SM4_GCM_WORKERS";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// The reference cipher and the software multiplier
    Reference,
    /// Table-driven rounds and the software multiplier
    Optimized,
    /// The AES-NI substitution cipher and the carry-less multiplier
    Simd,
}

impl Tier {
    pub const ALL: [Self; 3] = [Self::Reference, Self::Optimized, Self::Simd];

    /// Returns the fastest tier the host supports
    pub fn detect() -> Self {
        let tier = if Self::Simd.is_supported() {
            Self::Simd
        } else {
            Self::Optimized
        };
        tracing::debug!(%tier, "detected implementation tier");
        tier
    }

    pub fn is_supported(self) -> bool {
        match self {
            Self::Reference | Self::Optimized => true,
            Self::Simd => Variant::HardwareSubstitution.is_supported(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Optimized => "optimized",
            Self::Simd => "simd",
        }
    }

    /// The block cipher variant used for bulk processing at this tier
    pub const fn variant(self) -> Variant {
        match self {
            Self::Reference => Variant::Reference,
            Self::Optimized => Variant::TableDriven,
            Self::Simd => Variant::HardwareSubstitution,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::detect());
        }

        Self::ALL
            .into_iter()
            .find(|tier| s.eq_ignore_ascii_case(tier.name()))
            .ok_or_else(|| Error::InvalidTier(s.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workers(NonZeroUsize);

impl Workers {
    pub const ONE: Self = Self(NonZeroUsize::MIN);

    #[inline]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for Workers {
    type Error = Error;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(Error::InvalidWorkerCount)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tier: Tier,
    workers: Workers,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! setter {
    ($name:ident, $field:ident, $inner:ty) => {
        pub fn $name(mut self, value: $inner) -> Result<Self, Error> {
            self.$field = value.try_into()?;
            Ok(self)
        }
    };
}

impl Config {
    pub const fn new() -> Self {
        Self {
            tier: Tier::Optimized,
            workers: Workers::ONE,
        }
    }

    /// Selects the fastest supported tier and one worker per available core
    pub fn detect() -> Self {
        let workers = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self {
            tier: Tier::detect(),
            workers: Workers(workers),
        }
    }

    /// Applies the `SM4_GCM_TIER` and `SM4_GCM_WORKERS` overrides on top of [`Config::new`]
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| {
            std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(tier) = lookup(TIER_ENV) {
            config = config.with_tier(tier.parse()?)?;
        }

        if let Some(workers) = lookup(WORKERS_ENV) {
            let workers: usize = workers
                .trim()
                .parse()
                .map_err(|_| Error::InvalidWorkerCount)?;
            config = config.with_workers(workers)?;
        }

        tracing::debug!(?config, "loaded configuration");

        Ok(config)
    }

    /// Returns [`Error::Unsupported`] if the host can't run `tier`
    pub fn with_tier(mut self, tier: Tier) -> Result<Self, Error> {
        if !tier.is_supported() {
            return Err(Error::Unsupported(tier.name()));
        }
        self.tier = tier;
        Ok(self)
    }

    setter!(with_workers, workers, usize);

    #[inline]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    #[inline]
    pub const fn workers(&self) -> usize {
        self.workers.get()
    }

    pub fn gcm(&self, key: &[u8; KEY_LEN], iv: &[u8]) -> Result<Sm4Gcm, Error> {
        Sm4Gcm::with_config(self, key, iv)
    }

    /// Encrypts `blocks` in place with the configured tier's cipher and worker count
    pub fn encrypt_blocks(&self, key: &[u8; KEY_LEN], blocks: &mut [Block]) -> Result<(), Error> {
        let cipher = sm4::new(self.tier.variant(), key)?;
        batch::encrypt_parallel(&*cipher, blocks, self.workers())
    }

    /// Decrypts `blocks` in place with the configured tier's cipher and worker count
    pub fn decrypt_blocks(&self, key: &[u8; KEY_LEN], blocks: &mut [Block]) -> Result<(), Error> {
        let cipher = sm4::new(self.tier.variant(), key)?;
        batch::decrypt_parallel(&*cipher, blocks, self.workers())
    }
}
