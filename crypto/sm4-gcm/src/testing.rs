// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use pretty_hex::pretty_hex;
use std::sync::Once;
use tracing_subscriber::fmt::time::Uptime;

/// Inputs generated by the differential tests are truncated to this length
pub const MAX_PAYLOAD: usize = 2048;

pub struct Outcome<T> {
    pub name: &'static str,
    pub output: T,
}

impl<T: AsRef<[u8]>> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "{}", pretty_hex(&self.output.as_ref()))
    }
}

pub fn init_tracing() {
    if cfg!(miri) {
        return;
    }

    static TRACING: Once = Once::new();

    // make sure this only gets initialized once
    TRACING.call_once(|| {
        let format = tracing_subscriber::fmt::format()
            .with_timer(Uptime::default())
            .compact();

        let default_level = if std::env::var("CI").is_ok() {
            tracing::Level::INFO
        } else if cfg!(debug_assertions) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };

        let env_filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(default_level.into())
            .with_env_var("SM4_GCM_LOG")
            .from_env()
            .unwrap();

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .event_format(format)
            .with_test_writer()
            .init();
    });
}
