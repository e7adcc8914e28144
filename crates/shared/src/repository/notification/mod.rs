mod command;
mod query;

use self::command::NotificationCommandRepository;
use self::query::NotificationQueryRepository;

use std::sync::Arc;

use crate::{
    abstract_trait::{DynNotificationCommandRepository, DynNotificationQueryRepository},
    config::ConnectionPool,
};

#[derive(Clone)]
pub struct NotificationRepository {
    pub query: DynNotificationQueryRepository,
    pub command: DynNotificationCommandRepository,
}

impl NotificationRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(NotificationQueryRepository::new(pool.clone()))
            as DynNotificationQueryRepository;
        let command =
            Arc::new(NotificationCommandRepository::new(pool)) as DynNotificationCommandRepository;

        Self { query, command }
    }
}
