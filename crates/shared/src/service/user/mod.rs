mod command;
mod query;

use self::command::{UserCommandService, UserCommandServiceDeps};
use self::query::UserQueryService;
use crate::abstract_trait::{
    DynHashing, DynNotificationCommandRepository, DynRoleQueryRepository,
    DynUserCommandRepository, DynUserCommandService, DynUserQueryRepository, DynUserQueryService,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct UserService {
    pub query: DynUserQueryService,
    pub command: DynUserCommandService,
}

impl fmt::Debug for UserService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserService")
            .field("query", &"Arc<dyn UserQueryServiceTrait>")
            .field("command", &"Arc<dyn UserCommandServiceTrait>")
            .finish()
    }
}

#[derive(Clone)]
pub struct UserServiceDeps {
    pub hash: DynHashing,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub role_query: DynRoleQueryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl UserService {
    pub async fn new(deps: UserServiceDeps) -> Self {
        let query = Arc::new(
            UserQueryService::new(
                deps.user_query.clone(),
                deps.role_query.clone(),
                deps.registry.clone(),
            )
            .await,
        ) as DynUserQueryService;

        let command = Arc::new(
            UserCommandService::new(UserCommandServiceDeps {
                hash: deps.hash,
                user_query: deps.user_query,
                user_command: deps.user_command,
                role_query: deps.role_query,
                notification: deps.notification,
                registry: deps.registry,
            })
            .await,
        ) as DynUserCommandService;

        Self { query, command }
    }
}

#[cfg(test)]
mod tests;
