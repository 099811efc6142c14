//! Logging and tracing utilities.
//!
//! All logs go to **stderr** through a `tracing` subscriber filtered by
//! `RUST_LOG`. Every CRUD callback runs inside a span carrying a `log_id`
//! so the API calls it issues can be correlated.
//!
//! ```bash
//! # Show the request and response body of every API call
//! RUST_LOG=tencentcloud_provider=debug ./host
//! ```

use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Initialize the default logging subscriber at `info` level.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default("info");
}

/// Initialize logging with a default level used when `RUST_LOG` is unset.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(stderr_layer())
        .init();
}

/// Try to initialize logging, returning false if already initialized.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(filter("info"))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

/// Generate a fresh correlation id for one callback invocation.
pub fn new_log_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Logs how long an operation took when dropped.
#[derive(Debug)]
pub struct LogElapsed {
    operation: String,
    started: Instant,
}

impl LogElapsed {
    /// Start timing `operation`.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            started: Instant::now(),
        }
    }
}

impl Drop for LogElapsed {
    fn drop(&mut self) {
        tracing::debug!(
            operation = %self.operation,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "elapsed"
        );
    }
}
