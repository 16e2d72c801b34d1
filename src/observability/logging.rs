//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the process-wide tracing subscriber
//! - Pick the filter from `RUST_LOG`, else from configuration
//! - Report panics as error events with location and backtrace
//!
//! # Design Decisions
//! - Uses the tracing crate for structured events
//! - The fmt layer serializes concurrent writes; no extra locking here

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a configured level.
pub fn default_filter(level: &str) -> String {
    format!("snippetbox={level},tower_http={level}")
}

/// Install the global subscriber. Call once, from `main`.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Text of a panic payload, for `panic!` with a literal or a format string.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// Route panics through tracing instead of stderr.
///
/// Runs on the panicking thread before unwinding, so the event carries the
/// source location and a backtrace that the recovered payload no longer has.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(report_panic));
}

fn report_panic(info: &PanicHookInfo<'_>) {
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "unknown".to_string());
    tracing::error!(
        panic = %panic_message(info.payload()),
        location = %location,
        backtrace = %Backtrace::force_capture(),
        "Panic"
    );
}
