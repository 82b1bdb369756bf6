//! AuthProvider trait and its object-safe wrapper.

use std::future::Future;
use std::pin::Pin;

use compass_types::auth::{SignInOutcome, SignInRequest, SignUpOutcome, SignUpRequest};
use compass_types::error::AuthError;

/// Hosted identity provider backend.
///
/// Implementations live in compass-infra (e.g., `SupabaseAuthProvider`).
pub trait AuthProvider: Send + Sync {
    fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> impl Future<Output = Result<SignUpOutcome, AuthError>> + Send;

    fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> impl Future<Output = Result<SignInOutcome, AuthError>> + Send;

    /// Revoke the session behind an access token.
    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), AuthError>> + Send;
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + Send + 'a>>;

/// Object-safe version of [`AuthProvider`] with boxed futures.
pub trait AuthProviderDyn: Send + Sync {
    fn sign_up_boxed<'a>(&'a self, request: &'a SignUpRequest) -> BoxFuture<'a, SignUpOutcome>;

    fn sign_in_boxed<'a>(&'a self, request: &'a SignInRequest) -> BoxFuture<'a, SignInOutcome>;

    fn sign_out_boxed<'a>(&'a self, access_token: &'a str) -> BoxFuture<'a, ()>;
}

impl<T: AuthProvider> AuthProviderDyn for T {
    fn sign_up_boxed<'a>(&'a self, request: &'a SignUpRequest) -> BoxFuture<'a, SignUpOutcome> {
        Box::pin(self.sign_up(request))
    }

    fn sign_in_boxed<'a>(&'a self, request: &'a SignInRequest) -> BoxFuture<'a, SignInOutcome> {
        Box::pin(self.sign_in(request))
    }

    fn sign_out_boxed<'a>(&'a self, access_token: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(self.sign_out(access_token))
    }
}

/// Type-erased identity provider.
pub struct BoxAuthProvider {
    inner: Box<dyn AuthProviderDyn>,
}

impl BoxAuthProvider {
    pub fn new<T: AuthProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl AuthProvider for BoxAuthProvider {
    fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> impl Future<Output = Result<SignUpOutcome, AuthError>> + Send {
        async move { self.inner.sign_up_boxed(request).await }
    }

    fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> impl Future<Output = Result<SignInOutcome, AuthError>> + Send {
        async move { self.inner.sign_in_boxed(request).await }
    }

    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), AuthError>> + Send {
        async move { self.inner.sign_out_boxed(access_token).await }
    }
}

/// Stand-in used when no identity provider is configured: every call fails
/// with [`AuthError::NotConfigured`].
pub struct UnconfiguredAuthProvider;

impl AuthProvider for UnconfiguredAuthProvider {
    async fn sign_up(&self, _request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn sign_in(&self, _request: &SignInRequest) -> Result<SignInOutcome, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        Err(AuthError::NotConfigured)
    }
}
