//! pairgate Library
//!
//! A thin HTTP gateway. Its core issues short-lived, single-use pairing codes
//! bound to a phone number and verifies them exactly once; around that it
//! relays a handful of third-party APIs and keeps a few small JSON records
//! (posts, a visit counter) in flat files next to an in-memory chat log.
//!
//! # Modules
//!
//! - `api` - HTTP handlers and the JSON error envelope
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Record store, pairing service and the other managers
//! - `server` - Router assembly, store seeding and the listener loop
//! - `types` - Data structures and type definitions
//! - `upstream` - HTTP client for the relayed third-party services
//! - `utils` - Code generation and formatting helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pairgate::management::{JsonStore, PairingService};
//!
//! #[tokio::main]
//! async fn main() -> pairgate::Res<()> {
//!     let store = Arc::new(JsonStore::new("data"));
//!     let pairing = PairingService::new(store);
//!     let issued = pairing.issue("15551234567").await?;
//!     pairing.verify(&issued.code).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod types;
pub mod upstream;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Boxed so that store, upstream and I/O errors can meet in one place,
/// with `Send + Sync` bounds for use across tasks.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Installs the `tracing` subscriber used for per-request diagnostics.
///
/// Honors `RUST_LOG`, defaulting to `info` for this crate and `tower_http`.
/// Calling it twice is harmless; the second call is ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pairgate=info,tower_http=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Data directory: {}", dir.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for the command line. Handlers must never call this; they return an
/// [`crate::api::ApiError`] instead.
///
/// # Example
///
/// ```
/// error!("Cannot bind {}: {}", addr, e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
