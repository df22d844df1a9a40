//! Application messages.
//!
//! [`Message`] enumerates every event the crate logs or reports as a
//! validation failure; [`display`] holds the wording and [`macros`] routes
//! messages to `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
