//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`] trait
//! defined in `compass-core`, and a factory ([`create_provider`]) that builds
//! it from the `[llm]` config section.
//!
//! [`LlmProvider`]: compass_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::{ExposeSecret, SecretString};

use compass_core::llm::box_provider::BoxLlmProvider;
use compass_types::config::LlmConfig;
use compass_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from the `[llm]` config section.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key was resolved.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<&SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let oai_config = openai_compat::config::from_llm_config(config, key.expose_secret());
    tracing::debug!(
        provider = %oai_config.provider_name,
        model = %oai_config.model,
        "Creating LLM provider"
    );
    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config)))
}
