//! Use cases (orchestration)
//!
//! Each step of the token run is its own use case over the ports; `run`
//! chains them in the fixed order bootstrap → digest → key lookup → sign →
//! verify and stops at the first failure.

mod digest_message;
mod open_session;
mod resolve_key_pair;
mod run;
mod sign_and_verify;

pub use digest_message::digest_message;
pub use open_session::open_session;
pub use resolve_key_pair::resolve_key_pair;
pub use run::{run, RunEvent, RunReport};
pub use sign_and_verify::sign_and_verify;
