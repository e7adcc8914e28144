mod command;
mod query;

use self::command::{RoleCommandService, RoleCommandServiceDeps};
use self::query::RoleQueryService;
use crate::abstract_trait::{
    DynNotificationCommandRepository, DynRoleCommandRepository, DynRoleCommandService,
    DynRoleQueryRepository, DynRoleQueryService, DynUserQueryRepository, DynUserRoleRepository,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct RoleService {
    pub query: DynRoleQueryService,
    pub command: DynRoleCommandService,
}

impl fmt::Debug for RoleService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleService")
            .field("query", &"Arc<dyn RoleQueryServiceTrait>")
            .field("command", &"Arc<dyn RoleCommandServiceTrait>")
            .finish()
    }
}

#[derive(Clone)]
pub struct RoleServiceDeps {
    pub role_query: DynRoleQueryRepository,
    pub role_command: DynRoleCommandRepository,
    pub user_role: DynUserRoleRepository,
    pub user_query: DynUserQueryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl RoleService {
    pub async fn new(deps: RoleServiceDeps) -> Self {
        let query = Arc::new(
            RoleQueryService::new(deps.role_query.clone(), deps.registry.clone()).await,
        ) as DynRoleQueryService;

        let command = Arc::new(
            RoleCommandService::new(RoleCommandServiceDeps {
                role_query: deps.role_query,
                role_command: deps.role_command,
                user_role: deps.user_role,
                user_query: deps.user_query,
                notification: deps.notification,
                registry: deps.registry,
            })
            .await,
        ) as DynRoleCommandService;

        Self { query, command }
    }
}

#[cfg(test)]
mod tests;
