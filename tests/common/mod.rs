//! Common test utilities and logging infrastructure
//!
//! This module provides structured logging for tests using the `tracing`
//! crate. It enables detailed debugging output when tests fail, especially
//! useful in CI.
//!
//! # Usage
//!
//! Import this module in your integration tests:
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=rtfgrid::row=trace` - Module-specific tracing

#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// The function is idempotent - calling it multiple times is safe.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rtfgrid=debug,test=info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_ansi(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
            .ok();
    });
}

/// Count emitted `\cell` terminators, excluding `\cellx` boundary words.
pub fn count_cell_words(rtf: &str) -> usize {
    rtf.matches("\\cell").count() - rtf.matches("\\cellx").count()
}

/// Render a full single-table document and return it as a string.
pub fn render_document(model: &rtfgrid::TableModel) -> String {
    let mut writer = rtfgrid::RtfWriter::new(Vec::new());
    writer.open().expect("open");
    writer.add_table(model).expect("add_table");
    writer.close().expect("close");
    String::from_utf8(writer.into_inner()).expect("utf8 output")
}
