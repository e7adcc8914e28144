use crate::{
    abstract_trait::UserQueryRepositoryTrait,
    config::ConnectionPool,
    domain::{requests::FindAllUsers, responses::Pagination},
    errors::RepositoryError,
    model::{User as UserModel, UserWithRole},
    repository::search_pattern,
};
use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct UserPageRow {
    #[sqlx(flatten)]
    user: UserWithRole,
    total_count: i64,
}

pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn find_page(
        &self,
        req: &FindAllUsers,
        staff_only: bool,
    ) -> Result<(Vec<UserWithRole>, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let (limit, offset) = Pagination::limit_offset(req.page, req.page_size);

        let rows = sqlx::query_as::<_, UserPageRow>(
            r#"
            SELECT u.*, r.role_code, COUNT(*) OVER() AS total_count
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.user_id AND ur.is_primary
            LEFT JOIN roles r ON r.role_id = ur.role_id
            WHERE ($1::TEXT IS NULL
                   OR u.email ILIKE '%' || $1 || '%'
                   OR u.username ILIKE '%' || $1 || '%'
                   OR u.full_name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR r.role_code = $2)
              AND (NOT $3 OR r.role_code IN ('captain', 'hr'))
            ORDER BY u.created_at DESC, u.user_id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(search_pattern(&req.search))
        .bind(req.role.map(|role| role.as_str()))
        .bind(staff_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch users: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        info!("✅ Retrieved {} users (total {total})", rows.len());

        Ok((rows.into_iter().map(|r| r.user).collect(), total))
    }

    async fn find_one(
        &self,
        sql: &'static str,
        value: &str,
    ) -> Result<Option<UserModel>, RepositoryError> {
        sqlx::query_as::<_, UserModel>(sql)
            .bind(value)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ User lookup failed: {:?}", e);
                RepositoryError::from(e)
            })
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserWithRole>, i64), RepositoryError> {
        info!("🔍 Fetching users with search: {:?}", req.search);
        self.find_page(req, false).await
    }

    async fn find_staff(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserWithRole>, i64), RepositoryError> {
        info!("🔍 Fetching staff accounts with search: {:?}", req.search);
        self.find_page(req, true).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        let result = sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user ID {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        if result.is_none() {
            info!("🔍 No user found with ID {id}");
        }

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        self.find_one("SELECT * FROM users WHERE LOWER(email) = LOWER($1)", email)
            .await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserModel>, RepositoryError> {
        self.find_one("SELECT * FROM users WHERE username = $1", username)
            .await
    }
}
