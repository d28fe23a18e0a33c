//! Digest, sign and verify with a PKCS#11 hardware token
//!
//! The run is a fixed sequence against one token: open a session and log
//! in, hash a message on the token, find the key pair, sign, then verify.
//! The first failing step aborts the run with an error naming that step.

mod adapters;
pub mod api;
pub mod config;
pub mod error;
mod logic;
pub mod model;
pub mod ports;
pub mod prompt;
pub mod use_cases;

// Re-export commonly used types
pub use config::RunConfig;
pub use error::{TokenSigError, TokenSigResult};
pub use use_cases::{RunEvent, RunReport};

// Re-export public API
pub use api::{list_slots, run};
