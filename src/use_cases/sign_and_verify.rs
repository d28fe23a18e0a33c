use tracing::info;

use crate::error::TokenSigResult;
use crate::model::{KeyPair, SignatureMechanism};
use crate::ports::{KeyLocator, Signer, Verifier};

/// Sign `data` with the private key, then verify it with the public key
///
/// Both operations use the same mechanism. `on_signed` sees the signature
/// before verification starts, so it is available even when verify fails.
/// The signature is only returned once it has verified.
pub fn sign_and_verify<S, F>(
    session: &mut S,
    mechanism: SignatureMechanism,
    keys: &KeyPair<<S as KeyLocator>::Handle>,
    data: &[u8],
    on_signed: F,
) -> TokenSigResult<Vec<u8>>
where
    S: Signer + Verifier,
    F: FnOnce(&[u8]),
{
    let signature = session.sign(mechanism, keys.private_key, data)?;
    info!("Signed {} bytes ({} byte signature)", data.len(), signature.len());
    on_signed(&signature);

    session.verify(mechanism, keys.public_key, data, &signature)?;
    info!("Signature verified");

    Ok(signature)
}
