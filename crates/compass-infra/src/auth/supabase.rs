//! Supabase (GoTrue) implementation of [`AuthProvider`].
//!
//! Talks to the GoTrue REST endpoints directly:
//! - `POST /auth/v1/signup`
//! - `POST /auth/v1/token?grant_type=password`
//! - `POST /auth/v1/logout`
//!
//! Every request carries the project's anon key in the `apikey` header.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use compass_core::auth::provider::AuthProvider;
use compass_types::auth::{
    AuthSession, AuthUser, SignInOutcome, SignInRequest, SignUpOutcome, SignUpRequest,
};
use compass_types::error::AuthError;

/// GoTrue client. The anon key is never logged.
pub struct SupabaseAuthProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl SupabaseAuthProvider {
    /// `project_url` is the Supabase project URL (`https://<ref>.supabase.co`).
    pub fn new(project_url: &str, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
            api_key,
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .header("apikey", self.api_key.expose_secret())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AuthError> {
        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "Identity provider rejected request");
        if status.is_server_error() {
            return Err(AuthError::Provider(format!("HTTP {status}: {body}")));
        }
        Err(AuthError::Rejected {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request rejected")
                    .to_string()
            }),
        })
    }
}

impl AuthProvider for SupabaseAuthProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let body = json!({
            "email": request.email.trim(),
            "password": request.password,
            "data": {
                "first_name": request.first_name.trim(),
                "last_name": request.last_name.trim(),
            },
        });
        let response = self.send(self.post("/signup").json(&body)).await?;
        let payload: SignUpPayload = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("failed to parse sign-up response: {e}")))?;
        Ok(payload.into_outcome())
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInOutcome, AuthError> {
        let body = json!({
            "email": request.email.trim(),
            "password": request.password,
        });
        let response = self
            .send(self.post("/token?grant_type=password").json(&body))
            .await?;
        let payload: TokenPayload = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("failed to parse sign-in response: {e}")))?;
        Ok(SignInOutcome {
            user: payload.user.into_user(),
            session: payload.session,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.send(self.post("/logout").bearer_auth(access_token)).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
    email_confirmed_at: Option<String>,
    created_at: Option<String>,
    last_sign_in_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    first_name: Option<String>,
    last_name: Option<String>,
}

impl GoTrueUser {
    fn into_user(self) -> AuthUser {
        AuthUser {
            id: self.id,
            email: self.email,
            first_name: self.user_metadata.first_name,
            last_name: self.user_metadata.last_name,
            is_verified: self.email_confirmed_at.is_some(),
            created_at: self.created_at,
            last_login: self.last_sign_in_at,
        }
    }
}

/// Token grant response: session fields flattened next to `user`.
#[derive(Debug, Deserialize)]
struct TokenPayload {
    #[serde(flatten)]
    session: AuthSession,
    user: GoTrueUser,
}

/// Sign-up returns a token grant when auto-confirmation is on, and the bare
/// user object when email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpPayload {
    Session(TokenPayload),
    Pending(GoTrueUser),
}

impl SignUpPayload {
    fn into_outcome(self) -> SignUpOutcome {
        match self {
            SignUpPayload::Session(payload) => SignUpOutcome {
                user: payload.user.into_user(),
                session: Some(payload.session),
            },
            SignUpPayload::Pending(user) => SignUpOutcome {
                user: user.into_user(),
                session: None,
            },
        }
    }
}

/// Pull a human-readable message out of a GoTrue error body. Older servers
/// use `error_description`/`error`, newer ones `msg`/`message`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let provider = SupabaseAuthProvider::new(
            "https://abc.supabase.co/",
            SecretString::from("anon".to_string()),
        );
        assert_eq!(provider.base_url, "https://abc.supabase.co/auth/v1");
    }

    #[test]
    fn test_sign_up_pending_confirmation_payload() {
        let body = r#"{
            "id": "11111111-2222-3333-4444-555555555555",
            "email": "ada@example.com",
            "user_metadata": {"first_name": "Ada", "last_name": "Lovelace"},
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let outcome = serde_json::from_str::<SignUpPayload>(body)
            .unwrap()
            .into_outcome();
        assert!(outcome.needs_confirmation());
        assert_eq!(outcome.user.first_name.as_deref(), Some("Ada"));
        assert!(!outcome.user.is_verified);
    }

    #[test]
    fn test_token_payload_maps_user_and_session() {
        let body = r#"{
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "rt",
            "user": {
                "id": "u1",
                "email": "ada@example.com",
                "user_metadata": {"first_name": "Ada"},
                "email_confirmed_at": "2026-01-02T00:00:00Z",
                "last_sign_in_at": "2026-01-03T00:00:00Z"
            }
        }"#;
        let outcome = serde_json::from_str::<SignUpPayload>(body)
            .unwrap()
            .into_outcome();
        let session = outcome.session.unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.expires_in, Some(3600));
        assert!(outcome.user.is_verified);
        assert_eq!(outcome.user.last_login.as_deref(), Some("2026-01-03T00:00:00Z"));
    }

    #[test]
    fn test_error_message_variants() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(
            error_message(r#"{"code":422,"msg":"User already registered"}"#).as_deref(),
            Some("User already registered")
        );
        assert!(error_message("not json").is_none());
    }
}
