//! Mechanism types for the operations the token performs

use cryptoki::mechanism::Mechanism;

/// Digest mechanism run on the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestMechanism {
    /// `CKM_SHA256`
    #[default]
    Sha256,
    /// `CKM_SHA384`
    Sha384,
    /// `CKM_SHA512`
    Sha512,
}

impl DigestMechanism {
    /// Digest size in bytes
    pub fn output_len(self) -> usize {
        match self {
            DigestMechanism::Sha256 => 32,
            DigestMechanism::Sha384 => 48,
            DigestMechanism::Sha512 => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DigestMechanism::Sha256 => "SHA256",
            DigestMechanism::Sha384 => "SHA384",
            DigestMechanism::Sha512 => "SHA512",
        }
    }

    pub fn to_cryptoki_mechanism(self) -> Mechanism<'static> {
        match self {
            DigestMechanism::Sha256 => Mechanism::Sha256,
            DigestMechanism::Sha384 => Mechanism::Sha384,
            DigestMechanism::Sha512 => Mechanism::Sha512,
        }
    }
}

/// Hash-then-sign mechanism used for both sign and verify
///
/// All variants are RSA PKCS#1 v1.5 ([RFC 8017] section 8.2) with the hash
/// computed by the token.
///
/// [RFC 8017]: https://tools.ietf.org/html/rfc8017#section-8.2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureMechanism {
    /// `CKM_SHA256_RSA_PKCS`
    #[default]
    Sha256RsaPkcs,
    /// `CKM_SHA384_RSA_PKCS`
    Sha384RsaPkcs,
    /// `CKM_SHA512_RSA_PKCS`
    Sha512RsaPkcs,
}

impl SignatureMechanism {
    pub fn digest(self) -> DigestMechanism {
        match self {
            SignatureMechanism::Sha256RsaPkcs => DigestMechanism::Sha256,
            SignatureMechanism::Sha384RsaPkcs => DigestMechanism::Sha384,
            SignatureMechanism::Sha512RsaPkcs => DigestMechanism::Sha512,
        }
    }

    pub fn to_cryptoki_mechanism(self) -> Mechanism<'static> {
        match self {
            SignatureMechanism::Sha256RsaPkcs => Mechanism::Sha256RsaPkcs,
            SignatureMechanism::Sha384RsaPkcs => Mechanism::Sha384RsaPkcs,
            SignatureMechanism::Sha512RsaPkcs => Mechanism::Sha512RsaPkcs,
        }
    }
}
