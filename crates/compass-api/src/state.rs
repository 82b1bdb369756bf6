//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and the
//! REST API. Services are generic over their ports; AppState pins them to the
//! infra implementations chosen from `config.toml` and the environment.

use std::path::PathBuf;
use std::sync::Arc;

use compass_core::auth::provider::{BoxAuthProvider, UnconfiguredAuthProvider};
use compass_core::auth::service::AuthService;
use compass_core::chat::advisor::CareerAdvisor;
use compass_core::contact::sender::BoxEmailSender;
use compass_core::contact::service::ContactService;
use compass_core::history::service::HistoryService;
use compass_core::llm::box_provider::BoxLlmProvider;
use compass_core::quiz::analyzer::QuizAnalyzer;
use compass_infra::auth::supabase::SupabaseAuthProvider;
use compass_infra::config::{load_config, resolve_data_dir, resolve_secret};
use compass_infra::email::resend::ResendSender;
use compass_infra::llm::create_provider;
use compass_infra::sqlite::history::SqliteHistoryRepository;
use compass_infra::sqlite::pool::{database_url, DatabasePool};
use compass_types::config::AppConfig;

pub type ConcreteHistoryService = HistoryService<SqliteHistoryRepository>;
pub type ConcreteContactService = ContactService<BoxEmailSender>;
pub type ConcreteAuthService = AuthService<BoxAuthProvider>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub history_service: Arc<ConcreteHistoryService>,
    /// Absent when no LLM API key is set; chat and quiz analysis then fail.
    pub llm: Option<Arc<BoxLlmProvider>>,
    pub advisor: Arc<CareerAdvisor>,
    pub quiz_analyzer: Arc<QuizAnalyzer>,
    /// Absent when no email API key is set.
    pub contact_service: Option<Arc<ConcreteContactService>>,
    pub auth_service: Arc<ConcreteAuthService>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, connect to the DB,
    /// resolve provider keys and wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir()?;
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let llm_key = resolve_secret(&config.llm.api_key_env);
        let llm = match create_provider(&config.llm, llm_key.as_ref()) {
            Ok(provider) => Some(provider),
            Err(e) => {
                tracing::warn!(
                    env = %config.llm.api_key_env,
                    error = %e,
                    "LLM provider unavailable; chat and quiz analysis are disabled"
                );
                None
            }
        };

        let email = resolve_secret(&config.email.api_key_env)
            .map(|key| BoxEmailSender::new(ResendSender::new(&config.email.base_url, key)));
        if email.is_none() {
            tracing::warn!(
                env = %config.email.api_key_env,
                "Email API key not set; contact form is disabled"
            );
        }

        let auth = match (config.auth.url.as_deref(), resolve_secret(&config.auth.api_key_env)) {
            (Some(url), Some(key)) => BoxAuthProvider::new(SupabaseAuthProvider::new(url, key)),
            _ => {
                tracing::debug!("Identity provider not configured");
                BoxAuthProvider::new(UnconfiguredAuthProvider)
            }
        };

        Ok(Self::from_parts(config, data_dir, db_pool, llm, email, auth))
    }

    /// Wire services from already-built parts.
    pub fn from_parts(
        config: AppConfig,
        data_dir: PathBuf,
        db_pool: DatabasePool,
        llm: Option<BoxLlmProvider>,
        email: Option<BoxEmailSender>,
        auth: BoxAuthProvider,
    ) -> Self {
        let history_service = HistoryService::new(SqliteHistoryRepository::new(db_pool));
        let contact_service = email.map(|sender| {
            Arc::new(ContactService::new(
                sender,
                config.email.from.clone(),
                config.email.to.clone(),
            ))
        });

        Self {
            history_service: Arc::new(history_service),
            llm: llm.map(Arc::new),
            advisor: Arc::new(CareerAdvisor::from_config(&config.llm)),
            quiz_analyzer: Arc::new(QuizAnalyzer::from_config(&config.llm)),
            contact_service,
            auth_service: Arc::new(AuthService::new(auth)),
            config: Arc::new(config),
            data_dir,
        }
    }

    /// The LLM provider, or an error naming the missing key.
    pub fn llm(&self) -> anyhow::Result<Arc<BoxLlmProvider>> {
        self.llm.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "LLM provider not configured. Set {} in the environment",
                self.config.llm.api_key_env
            )
        })
    }
}
