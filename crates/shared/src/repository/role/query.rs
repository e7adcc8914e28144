use crate::{
    abstract_trait::RoleQueryRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Role as RoleModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct RoleQueryRepository {
    db: ConnectionPool,
}

impl RoleQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleQueryRepositoryTrait for RoleQueryRepository {
    async fn find_active(&self) -> Result<Vec<RoleModel>, RepositoryError> {
        let rows = sqlx::query_as::<_, RoleModel>(
            "SELECT * FROM roles WHERE is_active ORDER BY role_id ASC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Error fetching active roles: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Retrieved {} active roles", rows.len());
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<RoleModel>, RepositoryError> {
        sqlx::query_as::<_, RoleModel>("SELECT * FROM roles WHERE role_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch role ID {id}: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<RoleModel>, RepositoryError> {
        sqlx::query_as::<_, RoleModel>("SELECT * FROM roles WHERE role_code = $1")
            .bind(code)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch role '{code}': {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn find_primary_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<RoleModel>, RepositoryError> {
        sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT r.*
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.role_id
            WHERE ur.user_id = $1 AND ur.is_primary
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch primary role of user ID {user_id}: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
