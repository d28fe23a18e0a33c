use super::KeyLocator;
use crate::error::TokenSigResult;
use crate::model::SignatureMechanism;

pub trait Verifier: KeyLocator {
    /// Verify `signature` over `data` with the public key behind `key`
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::InvalidSignature` when the token reports the
    /// signature as wrong, `VerifyError::OperationFailed` for anything else.
    fn verify(
        &mut self,
        mechanism: SignatureMechanism,
        key: Self::Handle,
        data: &[u8],
        signature: &[u8],
    ) -> TokenSigResult<()>;
}
