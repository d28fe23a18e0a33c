use crate::error::KeyLookupError;
use crate::model::{KeyClass, SelectionPolicy};

/// Pick the handle to use from the objects a search returned
pub fn select_handle<H: Copy>(
    class: KeyClass,
    handles: &[H],
    policy: SelectionPolicy,
) -> Result<H, KeyLookupError> {
    match (handles, policy) {
        ([], _) => Err(KeyLookupError::NotFound {
            class: class.to_string(),
        }),
        ([only], _) => Ok(*only),
        ([first, ..], SelectionPolicy::FirstMatch) => Ok(*first),
        (many, SelectionPolicy::ExactlyOne) => Err(KeyLookupError::Ambiguous {
            class: class.to_string(),
            count: many.len(),
        }),
    }
}
