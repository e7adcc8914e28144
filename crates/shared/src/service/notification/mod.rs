mod command;
mod query;

use self::command::NotificationCommandService;
use self::query::NotificationQueryService;
use crate::{
    abstract_trait::{
        DynNotificationCommandRepository, DynNotificationCommandService,
        DynNotificationQueryRepository, DynNotificationQueryService,
    },
    domain::requests::CreateNotificationRequest,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::error;

#[derive(Clone)]
pub struct NotificationService {
    pub query: DynNotificationQueryService,
    pub command: DynNotificationCommandService,
}

impl fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationService")
            .field("query", &"Arc<dyn NotificationQueryServiceTrait>")
            .field("command", &"Arc<dyn NotificationCommandServiceTrait>")
            .finish()
    }
}

impl NotificationService {
    pub async fn new(
        query: DynNotificationQueryRepository,
        command: DynNotificationCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let query_service = Arc::new(
            NotificationQueryService::new(query.clone(), registry.clone()).await,
        ) as DynNotificationQueryService;

        let command_service = Arc::new(
            NotificationCommandService::new(query, command, registry).await,
        ) as DynNotificationCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

/// Stores an in-app notification. Failures are logged and never surface to the caller.
pub(crate) async fn notify(
    command: &DynNotificationCommandRepository,
    request: CreateNotificationRequest,
) {
    let user_id = request.user_id;

    if let Err(err) = command.create_notification(&request).await {
        error!("❌ Failed to notify user ID {user_id}: {err}");
    }
}

#[cfg(test)]
mod tests;
