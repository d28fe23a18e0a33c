//! PKCS#11 implementation of the token ports
//!
//! This module provides concrete implementations of the token traits using
//! the cryptoki crate. The driver is finalized when `CryptokiProvider` is
//! dropped and each session is closed (after logout) when
//! `CryptokiSession` is dropped.

use std::fmt;
use std::path::{Path, PathBuf};

use cryptoki::context::{CInitializeArgs, Pkcs11};
use cryptoki::error::{Error as CryptokiError, RvError};
use cryptoki::object::ObjectHandle;
use cryptoki::session::{Session, UserType};
use cryptoki::slot::Slot;
use cryptoki::types::AuthPin;
use tracing::{debug, info, warn};

use crate::error::{
    AuthError, DigestError, DriverError, KeyLookupError, SessionError, SignError,
    TokenSigResult, VerifyError,
};
use crate::model::{
    DigestMechanism, KeyClass, KeySelector, Pin, SignatureMechanism, SlotInfo, SlotSelector,
};
use crate::ports::{Authenticator, Digester, KeyLocator, Signer, TokenProvider, Verifier};

/// A loaded and initialized PKCS#11 driver
pub struct CryptokiProvider {
    ctx: Pkcs11,
    module: PathBuf,
}

impl CryptokiProvider {
    /// Load the driver at `module` and run `C_Initialize`
    pub fn load(module: &Path) -> TokenSigResult<Self> {
        let ctx = Pkcs11::new(module).map_err(|e| DriverError::LoadFailed {
            path: module.display().to_string(),
            reason: e.to_string(),
        })?;

        ctx.initialize(CInitializeArgs::OsThreads)
            .map_err(|e| DriverError::InitializeFailed {
                reason: e.to_string(),
            })?;

        info!("Loaded PKCS#11 module {}", module.display());
        Ok(Self {
            ctx,
            module: module.to_path_buf(),
        })
    }

    pub fn module(&self) -> &Path {
        &self.module
    }

    fn slots_with_token(&self) -> TokenSigResult<Vec<Slot>> {
        self.ctx.get_slots_with_token().map_err(|e| {
            SessionError::SlotListFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn resolve_slot(&self, selector: SlotSelector) -> TokenSigResult<Slot> {
        match selector {
            SlotSelector::FirstWithToken => self
                .slots_with_token()?
                .first()
                .copied()
                .ok_or_else(|| SessionError::NoTokenPresent.into()),
            SlotSelector::Id(id) => {
                let slots = self.ctx.get_all_slots().map_err(|e| SessionError::SlotListFailed {
                    reason: e.to_string(),
                })?;
                slots
                    .iter()
                    .find(|slot| slot.id() == id)
                    .copied()
                    .ok_or_else(|| {
                        SessionError::SlotNotFound {
                            slot: id,
                            available: slots.len(),
                        }
                        .into()
                    })
            }
        }
    }

    fn slot_info(&self, slot: Slot) -> TokenSigResult<SlotInfo> {
        let token_info = self
            .ctx
            .get_token_info(slot)
            .map_err(|e| SessionError::TokenInfoFailed {
                slot: slot.id(),
                reason: e.to_string(),
            })?;

        Ok(SlotInfo {
            id: slot.id(),
            label: token_info.label().trim().to_string(),
            manufacturer: token_info.manufacturer_id().trim().to_string(),
            model: token_info.model().trim().to_string(),
            serial_number: token_info.serial_number().trim().to_string(),
        })
    }
}

impl fmt::Debug for CryptokiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptokiProvider")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

impl TokenProvider for CryptokiProvider {
    type Session = CryptokiSession;

    fn slots(&self) -> TokenSigResult<Vec<SlotInfo>> {
        self.slots_with_token()?
            .into_iter()
            .map(|slot| self.slot_info(slot))
            .collect()
    }

    fn open_session(&self, selector: SlotSelector) -> TokenSigResult<CryptokiSession> {
        let slot = self.resolve_slot(selector)?;

        // read/write + serial
        let session = self
            .ctx
            .open_rw_session(slot)
            .map_err(|e| SessionError::OpenFailed {
                slot: slot.id(),
                reason: e.to_string(),
            })?;

        debug!("Opened R/W session on slot {}", slot.id());
        Ok(CryptokiSession {
            session,
            slot_id: slot.id(),
            logged_in: false,
        })
    }
}

/// An open PKCS#11 session
///
/// Logs out on drop if still logged in; the underlying session is closed
/// right after.
pub struct CryptokiSession {
    session: Session,
    slot_id: u64,
    logged_in: bool,
}

impl CryptokiSession {
    pub fn slot_id(&self) -> u64 {
        self.slot_id
    }
}

impl fmt::Debug for CryptokiSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptokiSession")
            .field("slot_id", &self.slot_id)
            .field("logged_in", &self.logged_in)
            .finish_non_exhaustive()
    }
}

impl Drop for CryptokiSession {
    fn drop(&mut self) {
        if self.logged_in {
            if let Err(e) = self.session.logout() {
                warn!("Logout on slot {} failed: {}", self.slot_id, e);
            }
        }
    }
}

impl Authenticator for CryptokiSession {
    fn login(&mut self, pin: &Pin) -> TokenSigResult<()> {
        let auth_pin = AuthPin::new(pin.as_str().to_string());

        match self.session.login(UserType::User, Some(&auth_pin)) {
            Ok(()) => {}
            Err(CryptokiError::Pkcs11(RvError::UserAlreadyLoggedIn, ..)) => {
                debug!("User already logged in on slot {}", self.slot_id);
            }
            Err(CryptokiError::Pkcs11(RvError::PinIncorrect, ..)) => {
                return Err(AuthError::PinIncorrect.into())
            }
            Err(CryptokiError::Pkcs11(RvError::PinLocked, ..)) => {
                return Err(AuthError::PinLocked.into())
            }
            Err(e) => {
                return Err(AuthError::LoginFailed {
                    reason: e.to_string(),
                }
                .into())
            }
        }

        self.logged_in = true;
        debug!("Logged in as user on slot {}", self.slot_id);
        Ok(())
    }

    fn logout(&mut self) -> TokenSigResult<()> {
        self.session.logout().map_err(|e| AuthError::LogoutFailed {
            reason: e.to_string(),
        })?;
        self.logged_in = false;
        debug!("Logged out of slot {}", self.slot_id);
        Ok(())
    }
}

impl Digester for CryptokiSession {
    fn digest(&mut self, mechanism: DigestMechanism, data: &[u8]) -> TokenSigResult<Vec<u8>> {
        debug!("Digesting {} bytes with {}", data.len(), mechanism.name());
        self.session
            .digest(&mechanism.to_cryptoki_mechanism(), data)
            .map_err(|e| {
                DigestError::OperationFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl KeyLocator for CryptokiSession {
    type Handle = ObjectHandle;

    fn find_keys(
        &mut self,
        class: KeyClass,
        selector: &KeySelector,
        max: usize,
    ) -> TokenSigResult<Vec<ObjectHandle>> {
        let template = selector.template(class);
        let mut handles =
            self.session
                .find_objects(&template)
                .map_err(|e| KeyLookupError::SearchFailed {
                    reason: e.to_string(),
                })?;

        debug!("Found {} {} object(s)", handles.len(), class);
        handles.truncate(max);
        Ok(handles)
    }
}

impl Signer for CryptokiSession {
    fn sign(
        &mut self,
        mechanism: SignatureMechanism,
        key: ObjectHandle,
        data: &[u8],
    ) -> TokenSigResult<Vec<u8>> {
        self.session
            .sign(&mechanism.to_cryptoki_mechanism(), key, data)
            .map_err(|e| {
                SignError::OperationFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

impl Verifier for CryptokiSession {
    fn verify(
        &mut self,
        mechanism: SignatureMechanism,
        key: ObjectHandle,
        data: &[u8],
        signature: &[u8],
    ) -> TokenSigResult<()> {
        match self
            .session
            .verify(&mechanism.to_cryptoki_mechanism(), key, data, signature)
        {
            Ok(()) => Ok(()),
            Err(CryptokiError::Pkcs11(
                RvError::SignatureInvalid | RvError::SignatureLenRange,
                ..,
            )) => Err(VerifyError::InvalidSignature.into()),
            Err(e) => Err(VerifyError::OperationFailed {
                reason: e.to_string(),
            }
            .into()),
        }
    }
}
