//! Process-wide logging setup shared by storefront binaries.

use storefront_core::LogFormat;

/// Install the default subscriber (JSON, `RUST_LOG` filter, `info` fallback).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::default());
}

/// Like [`init`], with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}

/// Subscriber construction (filters, formatters).
pub mod tracing;
