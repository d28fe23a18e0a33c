//! Entry points bound to the real PKCS#11 driver

use std::path::Path;

use tracing::debug;

use crate::adapters::CryptokiProvider;
use crate::config::RunConfig;
use crate::error::TokenSigResult;
use crate::ports::TokenProvider;
use crate::use_cases::{run as run_use_case, RunEvent, RunReport};

pub use crate::model::*;

/// Load the configured driver and run the full token sequence
///
/// The driver is finalized when this returns, after the session has been
/// logged out and closed.
pub fn run<F>(config: &RunConfig, on_event: F) -> TokenSigResult<RunReport>
where
    F: FnMut(RunEvent<'_>),
{
    let provider = CryptokiProvider::load(&config.module)?;
    debug!("Running against {}", provider.module().display());
    run_use_case(&provider, config, on_event)
}

/// List the slots of `module` that currently hold a token
pub fn list_slots(module: &Path) -> TokenSigResult<Vec<SlotInfo>> {
    let provider = CryptokiProvider::load(module)?;
    provider.slots()
}
