use crate::{
    abstract_trait::RfqQueryRepositoryTrait,
    config::ConnectionPool,
    domain::{
        requests::{FindAllRfqs, RfqScope},
        responses::Pagination,
    },
    errors::RepositoryError,
    model::RfqWithSeller,
    repository::search_pattern,
};
use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct RfqPageRow {
    #[sqlx(flatten)]
    rfq: RfqWithSeller,
    total_count: i64,
}

pub struct RfqQueryRepository {
    db: ConnectionPool,
}

impl RfqQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RfqQueryRepositoryTrait for RfqQueryRepository {
    async fn find_all(
        &self,
        scope: RfqScope,
        req: &FindAllRfqs,
    ) -> Result<(Vec<RfqWithSeller>, i64), RepositoryError> {
        info!("🔍 Fetching RFQs for {:?} with status {:?}", scope, req.status);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let (limit, offset) = Pagination::limit_offset(req.page, req.page_size);

        let rows = sqlx::query_as::<_, RfqPageRow>(
            r#"
            SELECT q.*, p.seller_id, p.name AS product_name, COUNT(*) OVER() AS total_count
            FROM rfqs q
            JOIN products p ON p.product_id = q.product_id
            WHERE ($1::INT IS NULL OR q.buyer_id = $1)
              AND ($2::INT IS NULL OR p.seller_id = $2)
              AND ($3::TEXT IS NULL OR q.status = $3)
              AND ($4::TEXT IS NULL OR q.title ILIKE '%' || $4 || '%')
            ORDER BY q.created_at DESC, q.rfq_id DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(scope.buyer_id())
        .bind(scope.seller_id())
        .bind(req.status.map(|s| s.as_str()))
        .bind(search_pattern(&req.search))
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch RFQs: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        info!("✅ Retrieved {} RFQs (total {total})", rows.len());

        Ok((rows.into_iter().map(|r| r.rfq).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<RfqWithSeller>, RepositoryError> {
        let result = sqlx::query_as::<_, RfqWithSeller>(
            r#"
            SELECT q.*, p.seller_id, p.name AS product_name
            FROM rfqs q
            JOIN products p ON p.product_id = q.product_id
            WHERE q.rfq_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch RFQ ID {id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        if result.is_none() {
            info!("🔍 No RFQ found with ID {id}");
        }

        Ok(result)
    }
}
