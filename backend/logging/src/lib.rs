//! Structured logging for the Lumen service.
//!
//! Console output for interactive runs, optional daily-rolling NDJSON
//! files, and secret scrubbing for anything that might carry a credential.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::scrub_secrets;
