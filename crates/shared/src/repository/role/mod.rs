mod command;
mod query;
mod user_role;

use self::command::RoleCommandRepository;
use self::query::RoleQueryRepository;
use self::user_role::UserRoleRepository;

use std::sync::Arc;

use crate::{
    abstract_trait::{DynRoleCommandRepository, DynRoleQueryRepository, DynUserRoleRepository},
    config::ConnectionPool,
};

#[derive(Clone)]
pub struct RoleRepository {
    pub query: DynRoleQueryRepository,
    pub command: DynRoleCommandRepository,
    pub user_role: DynUserRoleRepository,
}

impl RoleRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(RoleQueryRepository::new(pool.clone())) as DynRoleQueryRepository;

        let command =
            Arc::new(RoleCommandRepository::new(pool.clone())) as DynRoleCommandRepository;

        let user_role = Arc::new(UserRoleRepository::new(pool)) as DynUserRoleRepository;

        Self {
            query,
            command,
            user_role,
        }
    }
}
