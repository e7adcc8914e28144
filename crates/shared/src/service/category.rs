use crate::{
    abstract_trait::{CategoryServiceTrait, DynCategoryRepository},
    domain::{
        Actor, RoleCode,
        requests::CreateCategoryRequest,
        responses::{ApiResponse, CategoryResponse},
    },
    errors::ServiceError,
    model::Category as CategoryModel,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct CategoryService {
    repository: DynCategoryRepository,
    metrics: Metrics,
}

impl fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryService")
            .field("repository", &"Arc<dyn CategoryRepositoryTrait>")
            .finish()
    }
}

impl CategoryService {
    pub async fn new(repository: DynCategoryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "category_service");

        Self {
            repository,
            metrics,
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        info!("📂 Listing active categories");

        let started = Instant::now();
        let result = self
            .repository
            .find_active()
            .await
            .map_err(ServiceError::from);
        self.metrics
            .complete(Method::Get, "FindCategories", started, &result);

        let data = result?.into_iter().map(CategoryResponse::from).collect();

        Ok(ApiResponse::ok("Categories fetched successfully", data))
    }

    async fn create_category(
        &self,
        actor: &Actor,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🏗️ Creating category '{}'", req.name);

        let started = Instant::now();
        let result: Result<CategoryModel, ServiceError> = async {
            actor.require_any(&[RoleCode::Admin])?;
            Ok(self.repository.create_category(req).await?)
        }
        .await;
        self.metrics
            .complete(Method::Post, "CreateCategory", started, &result);

        Ok(ApiResponse::ok(
            "Category created successfully",
            CategoryResponse::from(result?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, MemoryStore};

    async fn service(store: &MemoryStore) -> CategoryService {
        CategoryService::new(Arc::new(store.clone()), testing::registry()).await
    }

    #[tokio::test]
    async fn only_admins_create_categories() {
        let store = MemoryStore::new();
        let service = service(&store).await;
        let req = CreateCategoryRequest {
            name: "Ship spares".into(),
            description: None,
        };

        let denied = service
            .create_category(&Actor::new(7, RoleCode::Hr), &req)
            .await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        let created = service
            .create_category(&Actor::new(1, RoleCode::Admin), &req)
            .await
            .unwrap();
        assert_eq!(created.data.name, "Ship spares");

        let listed = service.find_all().await.unwrap();
        assert!(listed.data.iter().any(|c| c.name == "Ship spares"));
    }
}
