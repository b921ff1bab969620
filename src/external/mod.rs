pub mod supabase;
pub mod twilio;

pub use supabase::*;
pub use twilio::*;

use std::future::Future;

use crate::error::AppResult;
use crate::models::User;

/// External OTP capability. The provider owns all verification state; this
/// service only forwards the phone/code pair and trusts the verdict.
pub trait VerificationProvider {
    /// Ask the provider to dispatch a one-time code over SMS.
    fn start_verification(&self, phone: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// Check a submitted code and return the provider's raw verdict string
    /// (anything other than "approved" counts as rejected).
    fn check_verification(
        &self,
        phone: &str,
        code: &str,
    ) -> impl Future<Output = AppResult<String>> + Send;
}

/// External user datastore, keyed by phone number. Uniqueness of the
/// phone column is the datastore's invariant, not enforced here.
pub trait UserStore {
    fn find_by_phone(&self, phone: &str) -> impl Future<Output = AppResult<Option<User>>> + Send;

    fn create(&self, phone: &str) -> impl Future<Output = AppResult<User>> + Send;
}
