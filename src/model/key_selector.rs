//! Search templates and selection rules for the key pair on the token

use std::fmt;

use cryptoki::object::{Attribute, ObjectClass};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    PrivateKey,
    PublicKey,
}

impl KeyClass {
    pub fn to_cryptoki_class(self) -> ObjectClass {
        match self {
            KeyClass::PrivateKey => ObjectClass::PRIVATE_KEY,
            KeyClass::PublicKey => ObjectClass::PUBLIC_KEY,
        }
    }
}

impl fmt::Display for KeyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyClass::PrivateKey => write!(f, "private key"),
            KeyClass::PublicKey => write!(f, "public key"),
        }
    }
}

/// Extra attributes narrowing the class-only search
///
/// An empty selector matches every object of the requested class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySelector {
    /// `CKA_LABEL`
    pub label: Option<String>,
    /// `CKA_ID`
    pub id: Option<Vec<u8>>,
}

impl KeySelector {
    pub fn new(label: Option<String>, id: Option<Vec<u8>>) -> Self {
        Self { label, id }
    }

    /// Build a selector from a label and a hex-encoded `CKA_ID`
    pub fn from_hex_id(
        label: Option<String>,
        id_hex: Option<&str>,
    ) -> Result<Self, KeySelectorError> {
        let id = id_hex
            .map(|hex_str| {
                let bytes = hex::decode(hex_str).map_err(|e| KeySelectorError::InvalidIdHex {
                    reason: e.to_string(),
                })?;
                if bytes.is_empty() {
                    return Err(KeySelectorError::EmptyId);
                }
                Ok(bytes)
            })
            .transpose()?;
        Ok(Self { label, id })
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.id.is_none()
    }

    /// Search template for objects of `class` matching this selector
    pub fn template(&self, class: KeyClass) -> Vec<Attribute> {
        let mut template = vec![Attribute::Class(class.to_cryptoki_class())];
        if let Some(label) = &self.label {
            template.push(Attribute::Label(label.as_bytes().to_vec()));
        }
        if let Some(id) = &self.id {
            template.push(Attribute::Id(id.clone()));
        }
        template
    }
}

/// How to pick a handle when a search returns more than one object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionPolicy {
    /// Take the first handle in driver order
    FirstMatch,
    /// Fail unless exactly one object matches
    #[default]
    ExactlyOne,
}

/// Resolved key pair handles, valid for the session that found them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair<H> {
    pub private_key: H,
    pub public_key: H,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeySelectorError {
    #[error("key ID is not valid hex: {reason}")]
    InvalidIdHex { reason: String },

    #[error("key ID must not be empty")]
    EmptyId,
}
