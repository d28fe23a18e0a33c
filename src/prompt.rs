//! Interactive PIN prompt using rpassword

use crate::error::{AuthError, TokenSigResult};
use crate::model::Pin;

/// Ask for the user PIN on the terminal without echo
///
/// # Arguments
/// * `target` - What the PIN unlocks, shown in the prompt
pub fn prompt_pin(target: &str) -> TokenSigResult<Pin> {
    let entered = rpassword::prompt_password(format!("Enter user PIN for {}: ", target))
        .map_err(|e| AuthError::PinUnavailable {
            reason: format!("Failed to read PIN: {}", e),
        })?;

    Ok(Pin::from_str(&entered)?)
}
