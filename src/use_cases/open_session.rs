use tracing::info;

use crate::error::TokenSigResult;
use crate::model::{Pin, SlotSelector};
use crate::ports::{Authenticator, TokenProvider};

/// Open a session on `slot` and log in as the normal user
///
/// If login fails the session is dropped (and closed) before the error is
/// returned.
pub fn open_session<P>(provider: &P, slot: SlotSelector, pin: &Pin) -> TokenSigResult<P::Session>
where
    P: TokenProvider,
{
    let mut session = provider.open_session(slot)?;
    session.login(pin)?;

    info!("Logged in on {}", slot);
    Ok(session)
}
