//! Full token run
//!
//! Chains the steps in their fixed order. Each step is a precondition for
//! the next; the first error is returned as-is and nothing after it runs.

use tracing::{info, warn};

use super::{digest_message, open_session, resolve_key_pair, sign_and_verify};
use crate::config::RunConfig;
use crate::error::TokenSigResult;
use crate::model::DigestMechanism;
use crate::ports::{Authenticator, TokenProvider};

/// Output produced while the run is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent<'a> {
    Digest {
        mechanism: DigestMechanism,
        digest: &'a [u8],
    },
    Signature(&'a [u8]),
    Verified,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub digest_mechanism: DigestMechanism,
    pub digest: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Run bootstrap → digest → key lookup → sign → verify against `provider`
///
/// `on_event` sees each result as soon as its step finishes, so output
/// produced before a failure is not lost.
pub fn run<P, F>(provider: &P, config: &RunConfig, mut on_event: F) -> TokenSigResult<RunReport>
where
    P: TokenProvider,
    F: FnMut(RunEvent<'_>),
{
    let mut session = open_session(provider, config.slot, &config.pin)?;

    let digest = digest_message(&mut session, config.digest_mechanism, &config.digest_message)?;
    on_event(RunEvent::Digest {
        mechanism: config.digest_mechanism,
        digest: &digest,
    });

    let keys = resolve_key_pair(&mut session, &config.key_selector, config.selection_policy)?;

    let signature = sign_and_verify(
        &mut session,
        config.signature_mechanism,
        &keys,
        &config.sign_message,
        |signature| on_event(RunEvent::Signature(signature)),
    )?;
    on_event(RunEvent::Verified);

    if let Err(e) = session.logout() {
        warn!("{}", e);
    }
    info!("Run complete");

    Ok(RunReport {
        digest_mechanism: config.digest_mechanism,
        digest,
        signature,
    })
}
