use crate::error::TokenSigResult;
use crate::model::Pin;

pub trait Authenticator {
    /// Log in as the normal user (`CKU_USER`)
    fn login(&mut self, pin: &Pin) -> TokenSigResult<()>;

    fn logout(&mut self) -> TokenSigResult<()>;
}
