// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the key must be {} bytes; got {len}", crate::sm4::KEY_LEN)]
    InvalidKeyLength { len: usize },
    #[error("the IV must not be empty")]
    InvalidIvLength,
    #[error("the worker count must be at least 1")]
    InvalidWorkerCount,
    #[error("unknown implementation tier {0:?}")]
    InvalidTier(String),
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    /// The tag did not match
    ///
    /// No information is given about where the mismatch occurred.
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("could not build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
