use tracing::{debug, info};

use crate::error::TokenSigResult;
use crate::logic::select_handle;
use crate::model::{KeyClass, KeyPair, KeySelector, SelectionPolicy};
use crate::ports::KeyLocator;

/// Find the private and public key to sign and verify with
///
/// Runs two independent searches, one per key class, each narrowed by
/// `selector`. `policy` decides what happens when a search matches more than
/// one object.
///
/// # Errors
///
/// Returns errors if:
/// - Either search cannot be run
/// - Either search matches nothing
/// - Either search matches several objects under `SelectionPolicy::ExactlyOne`
pub fn resolve_key_pair<L: KeyLocator>(
    session: &mut L,
    selector: &KeySelector,
    policy: SelectionPolicy,
) -> TokenSigResult<KeyPair<L::Handle>> {
    let private_key = find_one(session, KeyClass::PrivateKey, selector, policy)?;
    let public_key = find_one(session, KeyClass::PublicKey, selector, policy)?;

    info!("Resolved key pair");
    Ok(KeyPair {
        private_key,
        public_key,
    })
}

fn find_one<L: KeyLocator>(
    session: &mut L,
    class: KeyClass,
    selector: &KeySelector,
    policy: SelectionPolicy,
) -> TokenSigResult<L::Handle> {
    let max = match policy {
        SelectionPolicy::FirstMatch => 1,
        // every match is needed to report the count
        SelectionPolicy::ExactlyOne => usize::MAX,
    };

    let handles = session.find_keys(class, selector, max)?;
    let handle = select_handle(class, &handles, policy)?;
    debug!("Using {} handle {:?}", class, handle);
    Ok(handle)
}
