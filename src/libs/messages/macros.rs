//! Macros for emitting application messages through `tracing`.
//!
//! Every macro takes a [`Message`](crate::libs::messages::Message) (or any
//! `Display` value) and forwards it to the `tracing` macro of the matching
//! level, so the host process decides where output goes by installing a
//! subscriber (see [`crate::libs::logging`]).
//!
//! ## Macro Categories
//!
//! - **`msg_info!`**: lifecycle events (tracker created, migration applied)
//! - **`msg_warning!`**: degraded behaviour such as decode fallbacks
//! - **`msg_error!`**: failed operations
//! - **`msg_debug!`**: chatty internals, only formatted when debug mode is on
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when `HABITLOG_DEBUG` or `RUST_LOG` is set. The check is
//! cached for the lifetime of the process.
//!
//! ```rust
//! use habitlog::{msg_debug, msg_info};
//! use habitlog::libs::messages::Message;
//!
//! msg_info!(Message::CategoryCreated("Health".to_string()));
//! msg_debug!("Processing tracker with name: {}", "Run");
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `HABITLOG_DEBUG` or `RUST_LOG` is present.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("HABITLOG_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Emits an informational message.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        tracing::info!("{}", $msg)
    };
}

/// Emits a warning message.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        tracing::warn!("{}", $msg)
    };
}

/// Emits an error message.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        tracing::error!("{}", $msg)
    };
}

/// Debug-only message.
///
/// Nothing is formatted unless debug mode is enabled, so it is safe to use
/// on hot paths such as query refreshes.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("{}", $msg);
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!($fmt, $($arg)*);
        }
    };
}

/// Creates an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}
