use crate::{
    abstract_trait::{DynEmailService, DynHashing, DynJwtService},
    config::{Config, ConnectionPool, Hashing, JwtConfig, LogMailer, SmtpMailer},
    di::{DependenciesInject, DependenciesInjectDeps, Repositories},
    utils::{SystemMetrics, run_metrics_collector},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &"<dyn JwtService>")
            .finish()
    }
}

/// What the state needs beyond the repositories.
pub struct AppStateDeps {
    pub repositories: Repositories,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub mailer: DynEmailService,
    pub frontend_url: String,
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let mailer = match &config.email_config {
            Some(email) => Arc::new(
                SmtpMailer::new(email).context("Failed to initialize the SMTP mailer")?,
            ) as DynEmailService,
            None => {
                info!("📭 SMTP_HOST not set, outgoing emails will only be logged");
                Arc::new(LogMailer) as DynEmailService
            }
        };

        let deps = AppStateDeps {
            repositories: Repositories::postgres(pool),
            jwt_secret: config.jwt_secret.clone(),
            bcrypt_cost: config.bcrypt_cost,
            mailer,
            frontend_url: config.frontend_url.clone(),
        };

        Ok(Self::build(deps).await)
    }

    pub async fn build(deps: AppStateDeps) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(&deps.jwt_secret)) as DynJwtService;
        let hashing = Arc::new(Hashing::new(deps.bcrypt_cost)) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            repositories: deps.repositories,
            hash: hashing,
            jwt_config: jwt_config.clone(),
            mailer: deps.mailer,
            frontend_url: deps.frontend_url,
            registry: registry.clone(),
        })
        .await;

        system_metrics.register(&mut *registry.lock().await);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Self {
            di_container,
            jwt_config,
            registry,
            system_metrics,
        }
    }
}
