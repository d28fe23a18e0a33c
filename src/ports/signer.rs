//! Signer trait - capability to sign data

use super::KeyLocator;
use crate::error::TokenSigResult;
use crate::model::SignatureMechanism;

/// Capability to sign data with a private key held by the token
pub trait Signer: KeyLocator {
    /// Sign data with the private key behind `key`
    ///
    /// # Arguments
    ///
    /// * `mechanism` - The hash-then-sign mechanism
    /// * `key` - Private key handle from `find_keys`
    /// * `data` - The data to sign; hashing happens on the token
    ///
    /// # Returns
    ///
    /// The signature bytes
    ///
    /// # Errors
    ///
    /// Returns `SignError::OperationFailed` if the token rejects the operation
    fn sign(
        &mut self,
        mechanism: SignatureMechanism,
        key: Self::Handle,
        data: &[u8],
    ) -> TokenSigResult<Vec<u8>>;
}
