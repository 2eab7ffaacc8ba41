//! AuthProvider trait definition.

use confab_types::error::AuthError;
use confab_types::identity::Identity;

/// External authentication collaborator.
///
/// Implementations live in confab-infra. `current_identity` is a
/// read-only projection of ambient auth state and must be re-derived
/// after every sign-in, sign-up, and sign-out, since it gates all
/// downstream queries.
pub trait AuthProvider: Send + Sync {
    /// The current identity. Absence of a user is `Identity::Anonymous`,
    /// never an error.
    fn current_identity(&self) -> Identity;

    /// Sign in with email and password.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Identity, AuthError>> + Send;

    /// Register a new account.
    ///
    /// Success does not sign the user in: the backend requires email
    /// confirmation first.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;

    /// Sign out. Synchronous from the controller's perspective: the
    /// local session state is discarded immediately, whatever the
    /// backend call returns.
    fn sign_out(&self) -> impl std::future::Future<Output = ()> + Send;
}
