//! Account types exchanged with the hosted identity provider.

use serde::{Deserialize, Serialize};

/// Sign-up form. Missing fields deserialize as empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Sign-in form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_verified: bool,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

/// Tokens issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Result of a sign-up. `session` is absent when email confirmation is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

impl SignUpOutcome {
    pub fn needs_confirmation(&self) -> bool {
        self.session.is_none()
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInOutcome {
    pub user: AuthUser,
    pub session: AuthSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_camel_case() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"email":"a@b.c","password":"secret123","firstName":"A","lastName":"B"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "A");
        assert_eq!(req.last_name, "B");
    }

    #[test]
    fn test_auth_user_serializes_camel_case() {
        let user = AuthUser {
            id: "u1".to_string(),
            email: Some("a@b.c".to_string()),
            first_name: Some("A".to_string()),
            last_name: None,
            is_verified: true,
            created_at: None,
            last_login: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "A");
        assert_eq!(json["isVerified"], true);
        assert!(json.get("lastLogin").is_none());
    }
}
