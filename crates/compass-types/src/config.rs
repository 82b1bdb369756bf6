//! Configuration types for Career Compass.
//!
//! `AppConfig` represents `config.toml` in the data directory. Every section
//! and field has a default, so an empty or missing file is valid. Secrets are
//! never stored here: each provider section names the environment variable
//! that holds its key.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// OpenAI-compatible model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Token ceiling for the non-streaming quiz analysis.
    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_analysis_max_tokens() -> u32 {
    2048
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_llm_base_url(),
            api_key_env: default_llm_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            analysis_max_tokens: default_analysis_max_tokens(),
        }
    }
}

/// Transactional email settings for the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    #[serde(default = "default_email_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_email_from")]
    pub from: String,
    /// Inbox that receives contact form submissions.
    #[serde(default)]
    pub to: Vec<String>,
}

fn default_email_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_email_key_env() -> String {
    "RESEND_API_KEY".to_string()
}

fn default_email_from() -> String {
    "MyCareerCompass <onboarding@resend.dev>".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            base_url: default_email_base_url(),
            api_key_env: default_email_key_env(),
            from: default_email_from(),
            to: Vec::new(),
        }
    }
}

/// Hosted identity provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`. Auth routes answer 500
    /// "not configured" while this is unset.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_auth_key_env")]
    pub api_key_env: String,
}

fn default_auth_key_env() -> String {
    "SUPABASE_ANON_KEY".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key_env: default_auth_key_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert!((config.llm.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.email.api_key_env, "RESEND_API_KEY");
        assert!(config.auth.url.is_none());
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_app_config_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 8080

[llm]
model = "gpt-4o-mini"

[email]
to = ["inbox@example.com"]

[auth]
url = "https://project.supabase.co"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.email.to, vec!["inbox@example.com".to_string()]);
        assert_eq!(config.auth.url.as_deref(), Some("https://project.supabase.co"));
    }
}
