use async_trait::async_trait;
use tracing::{error, info};

use crate::{
    abstract_trait::UserRoleRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::UserRole as UserRoleModel,
};

pub struct UserRoleRepository {
    db_pool: ConnectionPool,
}

impl UserRoleRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRoleRepositoryTrait for UserRoleRepository {
    async fn assign_role(
        &self,
        user_id: i32,
        role_id: i32,
        is_primary: bool,
    ) -> Result<UserRoleModel, RepositoryError> {
        let mut tx = self.db_pool.begin().await.map_err(|e| {
            error!("Failed to open transaction: {}", e);
            RepositoryError::from(e)
        })?;

        if is_primary {
            sqlx::query(
                r#"
                UPDATE user_roles
                SET is_primary = FALSE
                WHERE user_id = $1 AND role_id <> $2 AND is_primary
                "#,
            )
            .bind(user_id)
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;
        }

        let row = sqlx::query_as::<_, UserRoleModel>(
            r#"
            INSERT INTO user_roles (user_id, role_id, is_primary)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, role_id)
            DO UPDATE SET is_primary = user_roles.is_primary OR EXCLUDED.is_primary
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .bind(is_primary)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to assign role_id={role_id} to user_id={user_id}: {}", e);
            RepositoryError::from(e)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "Assigned role_id={} to user_id={} (primary={})",
            row.role_id, row.user_id, row.is_primary
        );
        Ok(row)
    }

    async fn remove_role(&self, user_id: i32, role_id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_roles
            WHERE user_id = $1 AND role_id = $2
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.db_pool)
        .await
        .map_err(|e| {
            error!("Failed to remove role_id={role_id} from user_id={user_id}: {}", e);
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            error!("No user_role found to remove for user_id={user_id} and role_id={role_id}");
            return Err(RepositoryError::NotFound);
        }

        info!("Removed role_id={role_id} from user_id={user_id}");
        Ok(())
    }
}
