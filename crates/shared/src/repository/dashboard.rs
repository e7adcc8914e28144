use crate::{
    abstract_trait::DashboardRepositoryTrait, config::ConnectionPool,
    domain::requests::RfqScope, errors::RepositoryError, model::StatusTally,
};
use async_trait::async_trait;
use tracing::error;

pub struct DashboardRepository {
    db: ConnectionPool,
}

impl DashboardRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn count(&self, sql: &'static str) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Dashboard count failed: {:?}", e);
                RepositoryError::from(e)
            })
    }
}

#[async_trait]
impl DashboardRepositoryTrait for DashboardRepository {
    async fn rfq_status_counts(&self, scope: RfqScope) -> Result<Vec<StatusTally>, RepositoryError> {
        sqlx::query_as::<_, StatusTally>(
            r#"
            SELECT q.status, COUNT(*) AS total
            FROM rfqs q
            JOIN products p ON p.product_id = q.product_id
            WHERE ($1::INT IS NULL OR q.buyer_id = $1)
              AND ($2::INT IS NULL OR p.seller_id = $2)
            GROUP BY q.status
            ORDER BY q.status
            "#,
        )
        .bind(scope.buyer_id())
        .bind(scope.seller_id())
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count RFQs by status: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn product_status_counts(
        &self,
        seller_id: Option<i32>,
    ) -> Result<Vec<StatusTally>, RepositoryError> {
        sqlx::query_as::<_, StatusTally>(
            r#"
            SELECT status, COUNT(*) AS total
            FROM products
            WHERE is_active AND ($1::INT IS NULL OR seller_id = $1)
            GROUP BY status
            ORDER BY status
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count products by status: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn user_role_counts(&self) -> Result<Vec<StatusTally>, RepositoryError> {
        sqlx::query_as::<_, StatusTally>(
            r#"
            SELECT r.role_code AS status, COUNT(*) AS total
            FROM user_roles ur
            JOIN roles r ON r.role_id = ur.role_id
            WHERE ur.is_primary
            GROUP BY r.role_code
            ORDER BY r.role_code
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count users by role: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn count_blocked_users(&self) -> Result<i64, RepositoryError> {
        self.count("SELECT COUNT(*) FROM users WHERE is_blocked").await
    }

    async fn count_unverified_users(&self) -> Result<i64, RepositoryError> {
        self.count("SELECT COUNT(*) FROM users WHERE NOT is_verified").await
    }
}
