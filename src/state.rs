use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::consumption::repo_types::ConsumptionRecord;
use crate::db::{self, MemoryDb, PgRepository, Repository, UserRepository};
use crate::notifications::{LogMailer, Mailer, WebhookMailer};
use crate::predict::{LinearTrendPredictor, Predictor};
use crate::tips::repo_types::SavingsTip;
use crate::users::repo_types::User;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub consumption: Arc<dyn Repository<ConsumptionRecord>>,
    pub tips: Arc<dyn Repository<SavingsTip>>,
    pub mailer: Arc<dyn Mailer>,
    pub predictor: Arc<dyn Predictor>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let mailer: Arc<dyn Mailer> = match &config.mail.webhook_url {
            Some(url) => Arc::new(WebhookMailer::new(url.clone(), config.mail.from.clone())),
            None => Arc::new(LogMailer),
        };

        match config.storage {
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
                let pool = db::connect(url, config.max_connections).await?;
                tracing::info!("using postgres storage");
                Ok(Self {
                    users: Arc::new(PgRepository::<User>::new(pool.clone())),
                    consumption: Arc::new(PgRepository::<ConsumptionRecord>::new(pool.clone())),
                    tips: Arc::new(PgRepository::<SavingsTip>::new(pool)),
                    config,
                    mailer,
                    predictor: Arc::new(LinearTrendPredictor),
                })
            }
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage; data is lost on restart");
                Ok(Self::in_memory(config, mailer))
            }
        }
    }

    pub fn in_memory(config: Arc<AppConfig>, mailer: Arc<dyn Mailer>) -> Self {
        let store = Arc::new(MemoryDb::new());
        Self {
            config,
            users: store.clone(),
            consumption: store.clone(),
            tips: store,
            mailer,
            predictor: Arc::new(LinearTrendPredictor),
        }
    }
}
