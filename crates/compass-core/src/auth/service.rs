//! Account service: request validation in front of the identity provider.

use tracing::{info, warn};

use compass_types::auth::{SignInOutcome, SignInRequest, SignUpOutcome, SignUpRequest};
use compass_types::error::AuthError;

use super::provider::AuthProvider;

pub const MIN_PASSWORD_LEN: usize = 8;

pub struct AuthService<P: AuthProvider> {
    provider: P,
}

impl<P: AuthProvider> AuthService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Register an account. All fields are required and the password must be
    /// at least eight characters.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let required = [
            &request.email,
            &request.password,
            &request.first_name,
            &request.last_name,
        ];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(AuthError::InvalidInput("All fields are required".to_string()));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }

        let outcome = self.provider.sign_up(request).await?;
        info!(
            user_id = %outcome.user.id,
            needs_confirmation = outcome.needs_confirmation(),
            "Account created"
        );
        Ok(outcome)
    }

    pub async fn sign_in(&self, request: &SignInRequest) -> Result<SignInOutcome, AuthError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        match self.provider.sign_in(request).await {
            Ok(outcome) => {
                info!(user_id = %outcome.user.id, "Signed in");
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "Sign-in rejected");
                Err(e)
            }
        }
    }

    /// Revoke the session for a bearer token. A missing token is a no-op.
    pub async fn sign_out(&self, access_token: Option<&str>) -> Result<(), AuthError> {
        match access_token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => self.provider.sign_out(token).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_types::auth::{AuthSession, AuthUser};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        calls: AtomicUsize,
    }

    fn user() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            email: Some("a@example.com".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            is_verified: false,
            created_at: None,
            last_login: None,
        }
    }

    impl AuthProvider for FakeProvider {
        async fn sign_up(&self, _request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SignUpOutcome {
                user: user(),
                session: None,
            })
        }

        async fn sign_in(&self, request: &SignInRequest) -> Result<SignInOutcome, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if request.password != "correct-horse" {
                return Err(AuthError::Rejected {
                    status: 400,
                    message: "Invalid login credentials".to_string(),
                });
            }
            Ok(SignInOutcome {
                user: user(),
                session: AuthSession {
                    access_token: "token".to_string(),
                    refresh_token: None,
                    expires_in: Some(3600),
                    token_type: Some("bearer".to_string()),
                },
            })
        }

        async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn sign_up_request(password: &str) -> SignUpRequest {
        SignUpRequest {
            email: "a@example.com".to_string(),
            password: password.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_requires_all_fields() {
        let service = AuthService::new(FakeProvider::default());
        let mut request = sign_up_request("long-enough");
        request.last_name.clear();
        assert!(matches!(
            service.sign_up(&request).await,
            Err(AuthError::InvalidInput(_))
        ));
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sign_up_enforces_password_length() {
        let service = AuthService::new(FakeProvider::default());
        let err = service.sign_up(&sign_up_request("short")).await.unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters long");
    }

    #[tokio::test]
    async fn test_sign_up_pending_confirmation() {
        let service = AuthService::new(FakeProvider::default());
        let outcome = service.sign_up(&sign_up_request("long-enough")).await.unwrap();
        assert!(outcome.needs_confirmation());
    }

    #[tokio::test]
    async fn test_sign_in_passes_provider_rejection_through() {
        let service = AuthService::new(FakeProvider::default());
        let err = service
            .sign_in(&SignInRequest {
                email: "a@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_sign_out_without_token_is_noop() {
        let service = AuthService::new(FakeProvider::default());
        service.sign_out(None).await.unwrap();
        service.sign_out(Some("  ")).await.unwrap();
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 0);
        service.sign_out(Some("token")).await.unwrap();
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 1);
    }
}
