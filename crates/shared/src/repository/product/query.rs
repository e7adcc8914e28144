use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    domain::{requests::FindAllProducts, responses::Pagination},
    errors::RepositoryError,
    model::Product as ProductModel,
    repository::search_pattern,
};
use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct ProductPageRow {
    #[sqlx(flatten)]
    product: ProductModel,
    total_count: i64,
}

pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    /// Shared listing query; `$1` search, `$2` category, `$3` status, `$4` seller.
    async fn fetch_page(
        &self,
        sql: &'static str,
        req: &FindAllProducts,
        status: Option<&str>,
        seller_id: Option<i32>,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let (limit, offset) = Pagination::limit_offset(req.page, req.page_size);

        let rows = sqlx::query_as::<_, ProductPageRow>(sql)
            .bind(search_pattern(&req.search))
            .bind(req.category_id)
            .bind(status)
            .bind(seller_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        info!("✅ Retrieved {} products (total {total})", rows.len());

        Ok((rows.into_iter().map(|r| r.product).collect(), total))
    }
}

const NEWEST_FIRST: &str = r#"
    SELECT *, COUNT(*) OVER() AS total_count
    FROM products
    WHERE is_active
      AND ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
      AND ($2::INT IS NULL OR category_id = $2)
      AND ($3::TEXT IS NULL OR status = $3)
      AND ($4::INT IS NULL OR seller_id = $4)
    ORDER BY created_at DESC, product_id DESC
    LIMIT $5 OFFSET $6
"#;

const OLDEST_FIRST: &str = r#"
    SELECT *, COUNT(*) OVER() AS total_count
    FROM products
    WHERE is_active
      AND ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
      AND ($2::INT IS NULL OR category_id = $2)
      AND ($3::TEXT IS NULL OR status = $3)
      AND ($4::INT IS NULL OR seller_id = $4)
    ORDER BY created_at ASC, product_id ASC
    LIMIT $5 OFFSET $6
"#;

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_public(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!("🔍 Fetching shop products with search: {:?}", req.search);
        self.fetch_page(NEWEST_FIRST, req, Some("approved"), None)
            .await
    }

    async fn find_by_seller(
        &self,
        seller_id: i32,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!("🔍 Fetching products of seller ID {seller_id}");
        let status = req.status.map(|s| s.as_str());
        self.fetch_page(NEWEST_FIRST, req, status, Some(seller_id))
            .await
    }

    async fn find_pending(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!("🔍 Fetching products awaiting review");
        self.fetch_page(OLDEST_FIRST, req, Some("submitted"), None)
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let result = sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE product_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product ID {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        if result.is_none() {
            info!("🔍 No product found with ID {id}");
        }

        Ok(result)
    }
}
