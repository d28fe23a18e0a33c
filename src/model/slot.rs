use std::fmt;

/// Which PKCS#11 slot to open a session on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotSelector {
    /// The slot with this `CK_SLOT_ID`
    Id(u64),
    /// The first slot reporting a token present
    #[default]
    FirstWithToken,
}

impl SlotSelector {
    pub fn from_id(id: Option<u64>) -> Self {
        id.map_or(Self::FirstWithToken, Self::Id)
    }
}

impl fmt::Display for SlotSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSelector::Id(id) => write!(f, "slot {id}"),
            SlotSelector::FirstWithToken => write!(f, "first slot with a token"),
        }
    }
}

/// Token description reported for a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub id: u64,
    pub label: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}
