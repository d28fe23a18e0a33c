//! KeyLocator trait - capability to search the token's object store

use std::fmt::Debug;

use crate::error::TokenSigResult;
use crate::model::{KeyClass, KeySelector};

/// Capability to find key objects by attribute template
pub trait KeyLocator {
    /// Opaque object handle, only meaningful within the session that returned it
    type Handle: Copy + Debug;

    /// Find key objects of `class` that match `selector`
    ///
    /// Handles are returned in the order the token reports them. At most
    /// `max` handles are returned.
    ///
    /// # Errors
    ///
    /// Returns `KeyLookupError::SearchFailed` if the search cannot be run.
    /// An empty result is not an error here.
    fn find_keys(
        &mut self,
        class: KeyClass,
        selector: &KeySelector,
        max: usize,
    ) -> TokenSigResult<Vec<Self::Handle>>;
}
