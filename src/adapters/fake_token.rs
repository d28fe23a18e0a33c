//! In-memory token for exercising the ports without a driver
//!
//! Digests are real SHA-2 and signatures are real RSA PKCS#1 v1.5, so
//! anything the fake signs verifies with standard tooling.

#[cfg(test)]
use crate::error::{AuthError, SessionError, SignError, TokenSigResult, VerifyError};
#[cfg(test)]
use crate::logic::host_digest;
#[cfg(test)]
use crate::model::{
    DigestMechanism, KeyClass, KeySelector, Pin, SignatureMechanism, SlotInfo, SlotSelector,
};
#[cfg(test)]
use crate::ports::{Authenticator, Digester, KeyLocator, Signer, TokenProvider, Verifier};
#[cfg(test)]
use rsa::pkcs8::DecodePrivateKey;
#[cfg(test)]
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
#[cfg(test)]
use sha2::{Sha256, Sha384, Sha512};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[cfg(test)]
pub const TEST_PIN: &str = "123456";

#[cfg(test)]
pub const FAKE_SLOT_ID: u64 = 5;

#[cfg(test)]
const KEY_A_PEM: &str = include_str!("testdata/rsa2048_a.pem");

#[cfg(test)]
const KEY_B_PEM: &str = include_str!("testdata/rsa2048_b.pem");

#[cfg(test)]
pub fn test_key_a() -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs8_pem(KEY_A_PEM).expect("test key A must parse")
}

#[cfg(test)]
pub fn test_key_b() -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs8_pem(KEY_B_PEM).expect("test key B must parse")
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum FakeKey {
    Private(RsaPrivateKey),
    Public(RsaPublicKey),
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FakeObject {
    pub handle: u64,
    pub label: String,
    pub id: Vec<u8>,
    pub key: FakeKey,
}

#[cfg(test)]
impl FakeObject {
    fn class(&self) -> KeyClass {
        match self.key {
            FakeKey::Private(_) => KeyClass::PrivateKey,
            FakeKey::Public(_) => KeyClass::PublicKey,
        }
    }

    fn matches(&self, class: KeyClass, selector: &KeySelector) -> bool {
        self.class() == class
            && selector
                .label
                .as_ref()
                .map_or(true, |label| label == &self.label)
            && selector.id.as_ref().map_or(true, |id| id == &self.id)
    }
}

/// Fake token session; every port call is appended to `calls`
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FakeToken {
    pub pin: Pin,
    pub objects: Vec<FakeObject>,
    pub logged_in: bool,
    pub calls: Rc<RefCell<Vec<&'static str>>>,
}

#[cfg(test)]
impl FakeToken {
    pub fn new(pin: Pin) -> Self {
        Self {
            pin,
            objects: Vec::new(),
            logged_in: false,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Token holding one RSA key pair labelled "signing" with `CKA_ID` 01
    pub fn with_key_pair(pin: Pin) -> Self {
        let mut token = Self::new(pin);
        token.add_key_pair("signing", &[0x01], test_key_a());
        token
    }

    pub fn add_key_pair(&mut self, label: &str, id: &[u8], key: RsaPrivateKey) {
        let public = key.to_public_key();
        self.add_object(label, id, FakeKey::Private(key));
        self.add_object(label, id, FakeKey::Public(public));
    }

    pub fn add_object(&mut self, label: &str, id: &[u8], key: FakeKey) {
        let handle = self.objects.len() as u64 + 1;
        self.objects.push(FakeObject {
            handle,
            label: label.to_string(),
            id: id.to_vec(),
            key,
        });
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }

    fn object(&self, handle: u64) -> Option<&FakeObject> {
        self.objects.iter().find(|object| object.handle == handle)
    }
}

#[cfg(test)]
fn pkcs1v15_scheme(mechanism: SignatureMechanism) -> Pkcs1v15Sign {
    match mechanism {
        SignatureMechanism::Sha256RsaPkcs => Pkcs1v15Sign::new::<Sha256>(),
        SignatureMechanism::Sha384RsaPkcs => Pkcs1v15Sign::new::<Sha384>(),
        SignatureMechanism::Sha512RsaPkcs => Pkcs1v15Sign::new::<Sha512>(),
    }
}

#[cfg(test)]
impl Authenticator for FakeToken {
    fn login(&mut self, pin: &Pin) -> TokenSigResult<()> {
        self.record("login");
        if pin.as_bytes() == self.pin.as_bytes() {
            self.logged_in = true;
            Ok(())
        } else {
            Err(AuthError::PinIncorrect.into())
        }
    }

    fn logout(&mut self) -> TokenSigResult<()> {
        self.record("logout");
        if !self.logged_in {
            return Err(AuthError::LogoutFailed {
                reason: "CKR_USER_NOT_LOGGED_IN".to_string(),
            }
            .into());
        }
        self.logged_in = false;
        Ok(())
    }
}

#[cfg(test)]
impl Digester for FakeToken {
    fn digest(&mut self, mechanism: DigestMechanism, data: &[u8]) -> TokenSigResult<Vec<u8>> {
        self.record("digest");
        Ok(host_digest(mechanism, data))
    }
}

#[cfg(test)]
impl KeyLocator for FakeToken {
    type Handle = u64;

    fn find_keys(
        &mut self,
        class: KeyClass,
        selector: &KeySelector,
        max: usize,
    ) -> TokenSigResult<Vec<u64>> {
        self.record("find_keys");
        // private objects are invisible until login
        if class == KeyClass::PrivateKey && !self.logged_in {
            return Ok(Vec::new());
        }
        Ok(self
            .objects
            .iter()
            .filter(|object| object.matches(class, selector))
            .map(|object| object.handle)
            .take(max)
            .collect())
    }
}

#[cfg(test)]
impl Signer for FakeToken {
    fn sign(
        &mut self,
        mechanism: SignatureMechanism,
        key: u64,
        data: &[u8],
    ) -> TokenSigResult<Vec<u8>> {
        self.record("sign");
        if !self.logged_in {
            return Err(SignError::OperationFailed {
                reason: "CKR_USER_NOT_LOGGED_IN".to_string(),
            }
            .into());
        }

        let private_key = match self.object(key).map(|object| &object.key) {
            Some(FakeKey::Private(private_key)) => private_key,
            _ => {
                return Err(SignError::OperationFailed {
                    reason: "CKR_KEY_HANDLE_INVALID".to_string(),
                }
                .into())
            }
        };

        let hashed = host_digest(mechanism.digest(), data);
        private_key
            .sign(pkcs1v15_scheme(mechanism), &hashed)
            .map_err(|e| {
                SignError::OperationFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
impl Verifier for FakeToken {
    fn verify(
        &mut self,
        mechanism: SignatureMechanism,
        key: u64,
        data: &[u8],
        signature: &[u8],
    ) -> TokenSigResult<()> {
        self.record("verify");
        let public_key = match self.object(key).map(|object| &object.key) {
            Some(FakeKey::Public(public_key)) => public_key,
            _ => {
                return Err(VerifyError::OperationFailed {
                    reason: "CKR_KEY_HANDLE_INVALID".to_string(),
                }
                .into())
            }
        };

        let hashed = host_digest(mechanism.digest(), data);
        public_key
            .verify(pkcs1v15_scheme(mechanism), &hashed, signature)
            .map_err(|_| VerifyError::InvalidSignature.into())
    }
}

#[cfg(test)]
pub struct FakeTokenProvider {
    pub token: Option<FakeToken>,
}

#[cfg(test)]
impl FakeTokenProvider {
    pub fn with_token(token: FakeToken) -> Self {
        Self { token: Some(token) }
    }
}

#[cfg(test)]
impl TokenProvider for FakeTokenProvider {
    type Session = FakeToken;

    fn slots(&self) -> TokenSigResult<Vec<SlotInfo>> {
        Ok(self
            .token
            .iter()
            .map(|_| SlotInfo {
                id: FAKE_SLOT_ID,
                label: "fake token".to_string(),
                manufacturer: "tokensig".to_string(),
                model: "in-memory".to_string(),
                serial_number: "0001".to_string(),
            })
            .collect())
    }

    fn open_session(&self, slot: SlotSelector) -> TokenSigResult<FakeToken> {
        let token = self
            .token
            .clone()
            .ok_or(SessionError::NoTokenPresent)?;
        match slot {
            SlotSelector::Id(FAKE_SLOT_ID) | SlotSelector::FirstWithToken => {
                token.record("open_session");
                Ok(token)
            }
            SlotSelector::Id(other) => Err(SessionError::SlotNotFound {
                slot: other,
                available: 1,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::token_contract;

    fn logged_in_token() -> FakeToken {
        let mut token = FakeToken::with_key_pair(Pin::from_str(TEST_PIN).unwrap());
        token.logged_in = true;
        token
    }

    contract_tests_for!(
        fake_token_contract,
        make = || FakeToken::with_key_pair(Pin::from_str(TEST_PIN).unwrap()),
        tests = {
            test_login_success => token_contract::test_login_success,
            test_login_wrong_pin => token_contract::test_login_wrong_pin,
            test_digest_known_answer => token_contract::test_digest_known_answer,
            test_find_private_and_public_key => token_contract::test_find_private_and_public_key,
            test_find_keys_respects_max => token_contract::test_find_keys_respects_max,
            test_find_keys_unknown_label => token_contract::test_find_keys_unknown_label,
            test_sign_verify_round_trip => token_contract::test_sign_verify_round_trip,
            test_verify_flipped_bit_fails => token_contract::test_verify_flipped_bit_fails,
        }
    );

    #[test]
    fn test_private_keys_hidden_before_login() {
        let mut token = FakeToken::with_key_pair(Pin::from_str(TEST_PIN).unwrap());
        let found = token
            .find_keys(KeyClass::PrivateKey, &KeySelector::default(), 10)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_sign_requires_login() {
        let mut token = FakeToken::with_key_pair(Pin::from_str(TEST_PIN).unwrap());
        let result = token.sign(SignatureMechanism::default(), 1, b"data");
        assert!(result.is_err());
    }

    #[test]
    fn test_sign_with_public_handle_fails() {
        let mut token = logged_in_token();
        let public = token
            .find_keys(KeyClass::PublicKey, &KeySelector::default(), 1)
            .unwrap()[0];
        assert!(token
            .sign(SignatureMechanism::default(), public, b"data")
            .is_err());
    }

    #[test]
    fn test_logout_without_login_fails() {
        let mut token = FakeToken::with_key_pair(Pin::from_str(TEST_PIN).unwrap());
        assert!(matches!(
            token.logout().unwrap_err(),
            crate::TokenSigError::Auth(AuthError::LogoutFailed { .. })
        ));
    }

    #[test]
    fn test_provider_slot_selection() {
        let provider = FakeTokenProvider::with_token(logged_in_token());
        assert!(provider.open_session(SlotSelector::Id(FAKE_SLOT_ID)).is_ok());
        assert!(provider.open_session(SlotSelector::FirstWithToken).is_ok());
        assert!(matches!(
            provider.open_session(SlotSelector::Id(9)).unwrap_err(),
            crate::TokenSigError::Session(SessionError::SlotNotFound { slot: 9, .. })
        ));
        assert_eq!(provider.slots().unwrap()[0].id, FAKE_SLOT_ID);
    }

    #[test]
    fn test_provider_without_token() {
        let provider = FakeTokenProvider { token: None };
        assert!(provider.slots().unwrap().is_empty());
        assert!(matches!(
            provider.open_session(SlotSelector::FirstWithToken).unwrap_err(),
            crate::TokenSigError::Session(SessionError::NoTokenPresent)
        ));
    }
}
