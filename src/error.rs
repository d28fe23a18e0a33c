//! Error types for tokensig
//!
//! Each step of the token run has its own error enum so a failure always
//! names the step it came from. Errors are organized hierarchically and use
//! thiserror for implementation.

use thiserror::Error;

/// Result type alias for tokensig operations
///
/// This is a convenience alias for `Result<T, TokenSigError>`.
pub type TokenSigResult<T> = Result<T, TokenSigError>;

/// Top-level error type for all tokensig operations
#[derive(Error, Debug)]
pub enum TokenSigError {
    /// Loading or initializing the PKCS#11 driver failed
    #[error("driver load failed: {0}")]
    Driver(#[from] DriverError),

    /// Opening a session against a slot failed
    #[error("session open failed: {0}")]
    Session(#[from] SessionError),

    /// Logging in with the PIN failed
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Digest init/update/final failed
    #[error("digest failed: {0}")]
    Digest(#[from] DigestError),

    /// Object search failed or found nothing usable
    #[error("key lookup failed: {0}")]
    KeyLookup(#[from] KeyLookupError),

    /// Signing failed
    #[error("sign failed: {0}")]
    Sign(#[from] SignError),

    /// Verification failed
    #[error("verify failed: {0}")]
    Verify(#[from] VerifyError),

    /// Domain validation errors
    #[error("invalid input: {0}")]
    Domain(#[from] DomainError),
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("cannot load PKCS#11 module {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("C_Initialize failed: {reason}")]
    InitializeFailed { reason: String },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no slot with a token present")]
    NoTokenPresent,

    #[error("slot {slot} not found ({available} slot(s) available)")]
    SlotNotFound { slot: u64, available: usize },

    #[error("cannot enumerate slots: {reason}")]
    SlotListFailed { reason: String },

    #[error("cannot read token info for slot {slot}: {reason}")]
    TokenInfoFailed { slot: u64, reason: String },

    #[error("C_OpenSession on slot {slot} failed: {reason}")]
    OpenFailed { slot: u64, reason: String },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("PIN incorrect")]
    PinIncorrect,

    #[error("PIN locked - too many failed attempts")]
    PinLocked,

    #[error("C_Login failed: {reason}")]
    LoginFailed { reason: String },

    #[error("C_Logout failed: {reason}")]
    LogoutFailed { reason: String },

    #[error("no PIN available: {reason}")]
    PinUnavailable { reason: String },
}

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("C_Digest failed: {reason}")]
    OperationFailed { reason: String },

    #[error("digest is {actual} bytes, expected {expected}")]
    UnexpectedLength { expected: usize, actual: usize },

    #[error("token digest {token} does not match host digest {host}")]
    Mismatch { token: String, host: String },
}

#[derive(Error, Debug)]
pub enum KeyLookupError {
    #[error("object search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("no {class} found")]
    NotFound { class: String },

    #[error("{count} {class} objects match; narrow the search with a key label or ID")]
    Ambiguous { class: String, count: usize },
}

#[derive(Error, Debug)]
pub enum SignError {
    #[error("C_Sign failed: {reason}")]
    OperationFailed { reason: String },
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("signature invalid")]
    InvalidSignature,

    #[error("C_Verify failed: {reason}")]
    OperationFailed { reason: String },
}

/// Domain validation errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// PIN validation error
    #[error("PIN validation error: {0}")]
    Pin(#[from] crate::model::PinError),

    /// Key selector error
    #[error("key selector error: {0}")]
    KeySelector(#[from] crate::model::KeySelectorError),
}

impl From<crate::model::PinError> for TokenSigError {
    fn from(err: crate::model::PinError) -> Self {
        TokenSigError::Domain(DomainError::Pin(err))
    }
}

impl From<crate::model::KeySelectorError> for TokenSigError {
    fn from(err: crate::model::KeySelectorError) -> Self {
        TokenSigError::Domain(DomainError::KeySelector(err))
    }
}
