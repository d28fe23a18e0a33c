use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::model::DigestMechanism;

/// Hash `data` on the host with the algorithm behind `mechanism`
pub fn host_digest(mechanism: DigestMechanism, data: &[u8]) -> Vec<u8> {
    match mechanism {
        DigestMechanism::Sha256 => Sha256::digest(data).to_vec(),
        DigestMechanism::Sha384 => Sha384::digest(data).to_vec(),
        DigestMechanism::Sha512 => Sha512::digest(data).to_vec(),
    }
}
