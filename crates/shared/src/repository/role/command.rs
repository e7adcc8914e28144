use crate::{
    abstract_trait::RoleCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateRoleRequest, UpdateRoleRequest},
    errors::RepositoryError,
    model::Role as RoleModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct RoleCommandRepository {
    db: ConnectionPool,
}

impl RoleCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleCommandRepositoryTrait for RoleCommandRepository {
    async fn create_role(&self, role: &CreateRoleRequest) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            INSERT INTO roles (role_name, role_code, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(role.name.trim())
        .bind(role.code.trim().to_lowercase())
        .bind(&role.description)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create role '{}': {:?}", role.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created role '{}'", result.role_name);
        Ok(result)
    }

    async fn update_role(&self, role: &UpdateRoleRequest) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            UPDATE roles
            SET role_name = $2, description = $3, updated_at = current_timestamp
            WHERE role_id = $1
            RETURNING *
            "#,
        )
        .bind(role.id)
        .bind(role.name.trim())
        .bind(&role.description)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update role ID {}: {:?}", role.id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated role '{}'", result.role_name);
        Ok(result)
    }

    async fn deactivate_role(&self, role_id: i32) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            UPDATE roles
            SET is_active = FALSE, updated_at = current_timestamp
            WHERE role_id = $1
            RETURNING *
            "#,
        )
        .bind(role_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to deactivate role ID {role_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🗑️ Deactivated role '{}'", result.role_name);
        Ok(result)
    }
}
