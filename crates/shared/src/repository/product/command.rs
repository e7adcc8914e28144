use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::{ProductStatus, requests::NewProduct},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(&self, req: &NewProduct) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (
                seller_id, category_id, name, description, price, currency, moq, quantity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(req.seller_id)
        .bind(req.category_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.currency)
        .bind(req.moq)
        .bind(req.quantity)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product '{}': {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} for seller ID {}", product.product_id, product.seller_id);
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &NewProduct,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET category_id = $2,
                name = $3,
                description = $4,
                price = $5,
                currency = $6,
                moq = $7,
                quantity = $8,
                status = 'submitted',
                is_verified = FALSE,
                rejection_reason = NULL,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.category_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.currency)
        .bind(req.moq)
        .bind(req.quantity)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated product ID {id}, back in review");
        Ok(product)
    }

    async fn review_product(
        &self,
        id: i32,
        status: ProductStatus,
        rejection_reason: Option<String>,
    ) -> Result<ProductModel, RepositoryError> {
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET status = $2,
                is_verified = $3,
                rejection_reason = $4,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(status == ProductStatus::Approved)
        .bind(rejection_reason)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to review product ID {id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🔎 Product ID {id} reviewed as {status}");
        Ok(product)
    }

    async fn deactivate_product(&self, id: i32) -> Result<ProductModel, RepositoryError> {
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET is_active = FALSE, updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to deactivate product ID {id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🗑️ Deactivated product ID {id}");
        Ok(product)
    }
}
