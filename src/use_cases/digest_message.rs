use tracing::{debug, info};

use crate::error::{DigestError, TokenSigResult};
use crate::logic::host_digest;
use crate::model::DigestMechanism;
use crate::ports::Digester;

/// Hash `message` on the token and check the result against a host-side hash
///
/// # Errors
///
/// Returns errors if:
/// - The token rejects the digest operation
/// - The digest has the wrong length for `mechanism`
/// - The token and host digests differ
pub fn digest_message<D: Digester>(
    session: &mut D,
    mechanism: DigestMechanism,
    message: &[u8],
) -> TokenSigResult<Vec<u8>> {
    let digest = session.digest(mechanism, message)?;

    if digest.len() != mechanism.output_len() {
        return Err(DigestError::UnexpectedLength {
            expected: mechanism.output_len(),
            actual: digest.len(),
        }
        .into());
    }

    let host = host_digest(mechanism, message);
    if digest != host {
        return Err(DigestError::Mismatch {
            token: hex::encode(&digest),
            host: hex::encode(&host),
        }
        .into());
    }
    debug!("Token digest matches host digest");

    info!("{} digest computed on token", mechanism.name());
    Ok(digest)
}
