use crate::error::TokenSigResult;
use crate::model::DigestMechanism;

/// Capability to hash data on the token
pub trait Digester {
    /// Digest `data` in a single pass and return the finalized hash
    fn digest(&mut self, mechanism: DigestMechanism, data: &[u8]) -> TokenSigResult<Vec<u8>>;
}
