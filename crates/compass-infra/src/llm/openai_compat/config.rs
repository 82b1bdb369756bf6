//! Configuration for the OpenAI-compatible provider.

use compass_types::config::LlmConfig;

/// Connection settings for an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name, used in logs.
    pub provider_name: String,
    pub base_url: String,
    pub api_key: String,
    /// Default model when a request leaves `model` empty.
    pub model: String,
}

/// OpenAI defaults: `https://api.openai.com/v1`.
pub fn openai_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key: api_key.into(),
        model: model.into(),
    }
}

/// Build a config from the `[llm]` section of `config.toml`.
///
/// A base URL other than OpenAI's is labelled `openai_compatible`.
pub fn from_llm_config(config: &LlmConfig, api_key: &str) -> OpenAiCompatConfig {
    let mut oai = openai_defaults(api_key, &config.model);
    if config.base_url.trim_end_matches('/') != oai.base_url {
        oai.provider_name = "openai_compatible".into();
        oai.base_url = config.base_url.trim_end_matches('/').to_string();
    }
    oai
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_keeps_openai_name() {
        let config = from_llm_config(&LlmConfig::default(), "sk-test");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_custom_base_url() {
        let llm = LlmConfig {
            base_url: "http://localhost:11434/v1/".to_string(),
            ..LlmConfig::default()
        };
        let config = from_llm_config(&llm, "none");
        assert_eq!(config.provider_name, "openai_compatible");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
    }
}
