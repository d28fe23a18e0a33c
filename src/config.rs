//! Run configuration
//!
//! Everything the token run needs comes in through `RunConfig`; nothing is
//! compiled in except the default messages and mechanisms.

use std::path::PathBuf;

use crate::model::{
    DigestMechanism, KeySelector, Pin, SelectionPolicy, SignatureMechanism, SlotSelector,
};

/// Message hashed on the token
pub const DEFAULT_DIGEST_MESSAGE: &[u8] = b"Hello World.";

/// Message signed and verified on the token
pub const DEFAULT_SIGN_MESSAGE: &[u8] = b"Hello World. again";

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the PKCS#11 driver (.so/.dll/.dylib)
    pub module: PathBuf,
    pub slot: SlotSelector,
    pub pin: Pin,
    pub digest_mechanism: DigestMechanism,
    pub digest_message: Vec<u8>,
    pub signature_mechanism: SignatureMechanism,
    pub sign_message: Vec<u8>,
    pub key_selector: KeySelector,
    pub selection_policy: SelectionPolicy,
}

impl RunConfig {
    /// Configuration with the default messages, mechanisms and key rules
    pub fn new(module: impl Into<PathBuf>, slot: SlotSelector, pin: Pin) -> Self {
        Self {
            module: module.into(),
            slot,
            pin,
            digest_mechanism: DigestMechanism::default(),
            digest_message: DEFAULT_DIGEST_MESSAGE.to_vec(),
            signature_mechanism: SignatureMechanism::default(),
            sign_message: DEFAULT_SIGN_MESSAGE.to_vec(),
            key_selector: KeySelector::default(),
            selection_policy: SelectionPolicy::default(),
        }
    }
}
