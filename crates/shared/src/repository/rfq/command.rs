use crate::{
    abstract_trait::RfqCommandRepositoryTrait,
    config::ConnectionPool,
    domain::{
        RfqStatus,
        requests::{NewRfq, UpdateRfqStatusRequest},
    },
    errors::RepositoryError,
    model::Rfq as RfqModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct RfqCommandRepository {
    db: ConnectionPool,
}

impl RfqCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RfqCommandRepositoryTrait for RfqCommandRepository {
    async fn create_rfq(&self, req: &NewRfq) -> Result<RfqModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let rfq = sqlx::query_as::<_, RfqModel>(
            r#"
            INSERT INTO rfqs (
                buyer_id, product_id, title, description, quantity,
                budget_min, budget_max, response_deadline
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(req.buyer_id)
        .bind(req.product_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.quantity)
        .bind(req.budget_min)
        .bind(req.budget_max)
        .bind(req.response_deadline)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create RFQ '{}': {:?}", req.title, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created RFQ ID {} on product ID {}", rfq.rfq_id, rfq.product_id);
        Ok(rfq)
    }

    async fn update_rfq(
        &self,
        id: i32,
        req: &NewRfq,
        status: RfqStatus,
    ) -> Result<RfqModel, RepositoryError> {
        let rfq = sqlx::query_as::<_, RfqModel>(
            r#"
            UPDATE rfqs
            SET title = $2,
                description = $3,
                quantity = $4,
                budget_min = $5,
                budget_max = $6,
                response_deadline = $7,
                status = $8,
                updated_at = current_timestamp
            WHERE rfq_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.quantity)
        .bind(req.budget_min)
        .bind(req.budget_max)
        .bind(req.response_deadline)
        .bind(status.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update RFQ ID {id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated RFQ ID {id} (status {status})");
        Ok(rfq)
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateRfqStatusRequest,
    ) -> Result<RfqModel, RepositoryError> {
        let rfq = sqlx::query_as::<_, RfqModel>(
            r#"
            UPDATE rfqs
            SET status = $2,
                response_message = COALESCE($3, response_message),
                quoted_price = COALESCE($4, quoted_price),
                doq_reference = COALESCE($5, doq_reference),
                updated_at = current_timestamp
            WHERE rfq_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.status.as_str())
        .bind(req.message.as_deref())
        .bind(req.quoted_price)
        .bind(req.doq_reference.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to move RFQ ID {id} to {}: {:?}", req.status, err);
            RepositoryError::from(err)
        })?;

        info!("🔁 RFQ ID {id} is now {}", req.status);
        Ok(rfq)
    }

    async fn delete_rfq(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM rfqs WHERE rfq_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete RFQ ID {id}: {:?}", err);
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted RFQ ID {id}");
        Ok(())
    }
}
