//! In-memory stand-ins for the PostgreSQL repositories and the SMTP mailer, so services
//! and the HTTP router can be exercised without a database.

mod mailer;
mod store;

pub use self::mailer::RecordingMailer;
pub use self::store::MemoryStore;

use crate::{
    abstract_trait::{DynEmailService, DynHashing, DynJwtService},
    config::{Hashing, JwtConfig},
    di::{DependenciesInject, DependenciesInjectDeps},
    state::{AppState, AppStateDeps},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Plain-text password of every account created through [`MemoryStore::seed_user`].
pub const TEST_PASSWORD: &str = "Harbour#2025";

/// Bcrypt cost used by tests; the minimum bcrypt accepts.
pub const TEST_BCRYPT_COST: u32 = 4;

pub const TEST_JWT_SECRET: &str = "marsa-test-secret";

pub const TEST_FRONTEND_URL: &str = "http://localhost:5173";

pub fn registry() -> Arc<Mutex<Registry>> {
    Arc::new(Mutex::new(Registry::default()))
}

pub fn jwt() -> DynJwtService {
    Arc::new(JwtConfig::new(TEST_JWT_SECRET))
}

/// Every service wired to `store` and `mailer`.
pub async fn dependencies(store: &MemoryStore, mailer: &RecordingMailer) -> DependenciesInject {
    DependenciesInject::new(DependenciesInjectDeps {
        repositories: store.repositories(),
        hash: Arc::new(Hashing::new(TEST_BCRYPT_COST)) as DynHashing,
        jwt_config: jwt(),
        mailer: Arc::new(mailer.clone()) as DynEmailService,
        frontend_url: TEST_FRONTEND_URL.to_string(),
        registry: registry(),
    })
    .await
}

pub async fn app_state(store: &MemoryStore, mailer: &RecordingMailer) -> AppState {
    AppState::build(AppStateDeps {
        repositories: store.repositories(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        bcrypt_cost: TEST_BCRYPT_COST,
        mailer: Arc::new(mailer.clone()) as DynEmailService,
        frontend_url: TEST_FRONTEND_URL.to_string(),
    })
    .await
}
