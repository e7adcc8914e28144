use crate::{
    abstract_trait::UserCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateUserRequest, UpdateProfileRequest},
    errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn set_flag(
        &self,
        sql: &'static str,
        user_id: i32,
        value: bool,
    ) -> Result<UserModel, RepositoryError> {
        sqlx::query_as::<_, UserModel>(sql)
            .bind(user_id)
            .bind(value)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update flag for user ID {user_id}: {:?}", e);
                RepositoryError::from(e)
            })
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
        primary_role_id: i32,
    ) -> Result<UserModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to open transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (
                email, username, password, full_name, company_name, phone,
                vendor_code, ip_address, is_verified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&req.email)
        .bind(&req.username)
        .bind(&req.password)
        .bind(&req.full_name)
        .bind(&req.company_name)
        .bind(&req.phone)
        .bind(&req.vendor_code)
        .bind(&req.ip_address)
        .bind(req.is_verified)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user '{}': {:?}", req.email, err);
            RepositoryError::from(err)
        })?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id, is_primary)
            VALUES ($1, $2, TRUE)
            "#,
        )
        .bind(user.user_id)
        .bind(primary_role_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to grant role_id={primary_role_id} to new user '{}': {:?}",
                req.email, err
            );
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created user ID {} ({}) with primary role_id={primary_role_id}",
            user.user_id, user.vendor_code
        );
        Ok(user)
    }

    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET full_name = $2, company_name = $3, phone = $4, updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&req.full_name)
        .bind(&req.company_name)
        .bind(&req.phone)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update profile of user ID {user_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated profile of user ID {user_id}");
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: i32,
        password: &str,
    ) -> Result<UserModel, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET password = $2, updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(password)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update password of user ID {user_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🔑 Password updated for user ID {user_id}");
        Ok(user)
    }

    async fn update_blocked(
        &self,
        user_id: i32,
        is_blocked: bool,
    ) -> Result<UserModel, RepositoryError> {
        self.set_flag(
            r#"
            UPDATE users
            SET is_blocked = $2, updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING *
            "#,
            user_id,
            is_blocked,
        )
        .await
    }

    async fn update_verified(
        &self,
        user_id: i32,
        is_verified: bool,
    ) -> Result<UserModel, RepositoryError> {
        self.set_flag(
            r#"
            UPDATE users
            SET is_verified = $2, updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING *
            "#,
            user_id,
            is_verified,
        )
        .await
    }
}
