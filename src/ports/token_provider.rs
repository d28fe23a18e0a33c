use super::TokenOps;
use crate::error::TokenSigResult;
use crate::model::{SlotInfo, SlotSelector};

/// Capability to reach tokens through a loaded driver
pub trait TokenProvider {
    type Session: TokenOps;

    /// Slots that currently hold a token
    fn slots(&self) -> TokenSigResult<Vec<SlotInfo>>;

    /// Open a read/write serial session on the selected slot
    fn open_session(&self, slot: SlotSelector) -> TokenSigResult<Self::Session>;
}
