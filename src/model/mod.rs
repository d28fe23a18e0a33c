mod key_selector;
mod mechanism;
mod pin;
mod slot;

pub use key_selector::{KeyClass, KeyPair, KeySelector, KeySelectorError, SelectionPolicy};
pub use mechanism::{DigestMechanism, SignatureMechanism};
pub use pin::{Pin, PinError};
pub use slot::{SlotInfo, SlotSelector};
