//! Ports (traits) for token operations
//!
//! These traits define the capabilities the use cases need from a token.
//! They represent ports in hexagonal architecture - the core depends on
//! these abstractions, not on cryptoki directly.

mod authenticator;
mod digester;
mod key_locator;
mod signer;
mod token_provider;
mod verifier;

pub use authenticator::Authenticator;
pub use digester::Digester;
pub use key_locator::KeyLocator;
pub use signer::Signer;
pub use token_provider::TokenProvider;
pub use verifier::Verifier;

/// Combined trait for everything a session must support
pub trait TokenOps: Authenticator + Digester + Signer + Verifier {}

// Blanket implementation for types that implement all operation traits
impl<T> TokenOps for T where T: Authenticator + Digester + Signer + Verifier {}
