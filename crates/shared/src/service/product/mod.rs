mod command;
mod query;

use self::command::{ProductCommandService, ProductCommandServiceDeps};
use self::query::ProductQueryService;
use crate::abstract_trait::{
    DynCategoryRepository, DynNotificationCommandRepository, DynProductCommandRepository,
    DynProductCommandService, DynProductQueryRepository, DynProductQueryService,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct ProductService {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl fmt::Debug for ProductService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductService")
            .field("query", &"Arc<dyn ProductQueryServiceTrait>")
            .field("command", &"Arc<dyn ProductCommandServiceTrait>")
            .finish()
    }
}

#[derive(Clone)]
pub struct ProductServiceDeps {
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub category: DynCategoryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl ProductService {
    pub async fn new(deps: ProductServiceDeps) -> Self {
        let query = Arc::new(
            ProductQueryService::new(deps.product_query.clone(), deps.registry.clone()).await,
        ) as DynProductQueryService;

        let command = Arc::new(
            ProductCommandService::new(ProductCommandServiceDeps {
                product_query: deps.product_query,
                product_command: deps.product_command,
                category: deps.category,
                notification: deps.notification,
                registry: deps.registry,
            })
            .await,
        ) as DynProductCommandService;

        Self { query, command }
    }
}

#[cfg(test)]
mod tests;
