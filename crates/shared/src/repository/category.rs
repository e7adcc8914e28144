use crate::{
    abstract_trait::CategoryRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateCategoryRequest, errors::RepositoryError,
    model::Category as CategoryModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CategoryRepository {
    db: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn find_active(&self) -> Result<Vec<CategoryModel>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryModel>(
            "SELECT * FROM categories WHERE is_active ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch categories: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Retrieved {} categories", rows.len());
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryModel>, RepositoryError> {
        sqlx::query_as::<_, CategoryModel>(
            "SELECT * FROM categories WHERE category_id = $1 AND is_active",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch category ID {id}: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError> {
        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(req.name.trim())
        .bind(&req.description)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create category '{}': {:?}", req.name, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created category '{}'", category.name);
        Ok(category)
    }
}
