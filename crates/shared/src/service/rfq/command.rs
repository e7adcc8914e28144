use super::{party_of, status_of};
use crate::{
    abstract_trait::{
        DynNotificationCommandRepository, DynProductQueryRepository, DynRfqCommandRepository,
        DynRfqQueryRepository, RfqCommandServiceTrait,
    },
    domain::{
        Actor, ProductStatus, RfqParty, RfqStatus, RoleCode,
        requests::{
            CreateNotificationRequest, CreateRfqRequest, NewRfq, UpdateRfqRequest,
            UpdateRfqStatusRequest,
        },
        responses::{ApiResponse, RfqResponse},
    },
    errors::ServiceError,
    model::RfqWithSeller,
    service::notify,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct RfqCommandService {
    rfq_query: DynRfqQueryRepository,
    rfq_command: DynRfqCommandRepository,
    product_query: DynProductQueryRepository,
    notification: DynNotificationCommandRepository,
    metrics: Metrics,
}

pub struct RfqCommandServiceDeps {
    pub rfq_query: DynRfqQueryRepository,
    pub rfq_command: DynRfqCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

fn ensure_deadline(deadline: Option<NaiveDate>) -> Result<(), ServiceError> {
    match deadline {
        Some(date) if date < Utc::now().date_naive() => Err(ServiceError::validation(
            "Response deadline cannot be in the past",
        )),
        _ => Ok(()),
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Fields a status move must carry.
fn ensure_payload(req: &UpdateRfqStatusRequest) -> Result<(), ServiceError> {
    match req.status {
        RfqStatus::Responded if !has_text(req.message.as_deref()) && req.quoted_price.is_none() => {
            Err(ServiceError::validation(
                "A response needs a message or a quoted price",
            ))
        }
        RfqStatus::DoqProvided if !has_text(req.doq_reference.as_deref()) => Err(
            ServiceError::validation("A DOQ reference is required"),
        ),
        _ => Ok(()),
    }
}

impl RfqCommandService {
    pub async fn new(deps: RfqCommandServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "rfq_command_service");

        Self {
            rfq_query: deps.rfq_query,
            rfq_command: deps.rfq_command,
            product_query: deps.product_query,
            notification: deps.notification,
            metrics,
        }
    }

    async fn find(&self, id: i32) -> Result<RfqWithSeller, ServiceError> {
        self.rfq_query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("RFQ with id {id} not found")))
    }

    async fn owned_by_buyer(&self, actor: &Actor, id: i32) -> Result<RfqWithSeller, ServiceError> {
        let rfq = self.find(id).await?;
        if rfq.rfq.buyer_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "Only the buyer who raised this RFQ can change it".into(),
            ));
        }
        Ok(rfq)
    }

    async fn submit(
        &self,
        actor: &Actor,
        req: &CreateRfqRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        actor.require_any(&[RoleCode::Buyer])?;
        ensure_deadline(req.response_deadline)?;

        let product = self
            .product_query
            .find_by_id(req.product_id)
            .await?
            .filter(|product| product.is_active)
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product with id {} not found", req.product_id))
            })?;

        if product.status != ProductStatus::Approved.as_str() {
            return Err(ServiceError::validation(
                "RFQs can only be raised on approved products",
            ));
        }

        let rfq = self
            .rfq_command
            .create_rfq(&NewRfq::from_request(actor.user_id, req))
            .await?;

        notify(
            &self.notification,
            CreateNotificationRequest::new(
                product.seller_id,
                "New RFQ received",
                format!(
                    "'{}' requests {} units of {}.",
                    rfq.title, rfq.quantity, product.name
                ),
            )
            .related_to("rfq", rfq.rfq_id),
        )
        .await;

        let response = RfqWithSeller {
            rfq,
            seller_id: product.seller_id,
            product_name: product.name,
        };

        Ok(ApiResponse::ok(
            "RFQ submitted successfully",
            RfqResponse::from(response),
        ))
    }

    async fn edit(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateRfqRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        let current = self.owned_by_buyer(actor, id).await?;
        let status = status_of(&current)?;

        if status.is_terminal() {
            return Err(ServiceError::InvalidTransition(format!(
                "an RFQ that is {status} can no longer be edited"
            )));
        }
        ensure_deadline(req.response_deadline)?;

        let next = status.after_buyer_edit();
        let rfq = self
            .rfq_command
            .update_rfq(
                id,
                &NewRfq::from_edit(actor.user_id, current.rfq.product_id, req),
                next,
            )
            .await?;

        if next == RfqStatus::Resubmitted {
            notify(
                &self.notification,
                CreateNotificationRequest::new(
                    current.seller_id,
                    "RFQ resubmitted",
                    format!("The buyer revised '{}' and resubmitted it.", rfq.title),
                )
                .related_to("rfq", id),
            )
            .await;
        }

        Ok(ApiResponse::ok(
            "RFQ updated successfully",
            RfqResponse::from(RfqWithSeller { rfq, ..current }),
        ))
    }

    async fn transition(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateRfqStatusRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        let current = self.find(id).await?;
        let party = party_of(actor, &current).ok_or_else(|| {
            ServiceError::Forbidden("You are not a party to this RFQ".into())
        })?;
        let status = status_of(&current)?;

        if !status.can_transition(req.status, party) {
            return Err(ServiceError::InvalidTransition(format!(
                "{status} -> {}",
                req.status
            )));
        }
        ensure_payload(req)?;

        let rfq = self.rfq_command.update_status(id, req).await?;

        let message = format!("RFQ '{}' is now {}.", rfq.title, req.status);
        let recipients = match party {
            RfqParty::Buyer => vec![current.seller_id],
            RfqParty::Seller => vec![rfq.buyer_id],
            RfqParty::Moderator => vec![rfq.buyer_id, current.seller_id],
        };
        for user_id in recipients {
            notify(
                &self.notification,
                CreateNotificationRequest::new(user_id, "RFQ status updated", message.clone())
                    .related_to("rfq", id),
            )
            .await;
        }

        Ok(ApiResponse::ok(
            "RFQ status updated successfully",
            RfqResponse::from(RfqWithSeller { rfq, ..current }),
        ))
    }

    async fn withdraw(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let current = self.owned_by_buyer(actor, id).await?;

        if status_of(&current)? != RfqStatus::Open {
            return Err(ServiceError::Conflict(
                "Only open RFQs can be deleted".into(),
            ));
        }

        self.rfq_command.delete_rfq(id).await?;

        Ok(ApiResponse::ok("RFQ deleted successfully", ()))
    }
}

#[async_trait]
impl RfqCommandServiceTrait for RfqCommandService {
    async fn create_rfq(
        &self,
        actor: &Actor,
        req: &CreateRfqRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        info!(
            "📝 Buyer ID {} raising RFQ on product ID {}",
            actor.user_id, req.product_id
        );

        let started = Instant::now();
        let result = self.submit(actor, req).await;
        self.metrics.complete(Method::Post, "CreateRfq", started, &result);

        result
    }

    async fn update_rfq(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateRfqRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        info!("🔄 Buyer ID {} editing RFQ ID {id}", actor.user_id);

        let started = Instant::now();
        let result = self.edit(actor, id, req).await;
        self.metrics.complete(Method::Put, "UpdateRfq", started, &result);

        result
    }

    async fn update_status(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateRfqStatusRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        info!(
            "🔀 User ID {} moving RFQ ID {id} to {}",
            actor.user_id, req.status
        );

        let started = Instant::now();
        let result = self.transition(actor, id, req).await;
        self.metrics
            .complete(Method::Put, "UpdateRfqStatus", started, &result);

        result
    }

    async fn delete_rfq(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Buyer ID {} deleting RFQ ID {id}", actor.user_id);

        let started = Instant::now();
        let result = self.withdraw(actor, id).await;
        self.metrics.complete(Method::Delete, "DeleteRfq", started, &result);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_request(status: RfqStatus) -> UpdateRfqStatusRequest {
        UpdateRfqStatusRequest {
            status,
            message: None,
            quoted_price: None,
            doq_reference: None,
        }
    }

    #[test]
    fn response_needs_message_or_price() {
        let mut req = status_request(RfqStatus::Responded);
        assert!(ensure_payload(&req).is_err());

        req.message = Some("   ".into());
        assert!(ensure_payload(&req).is_err());

        req.quoted_price = Some(4200.0);
        assert!(ensure_payload(&req).is_ok());
    }

    #[test]
    fn doq_needs_reference() {
        let mut req = status_request(RfqStatus::DoqProvided);
        assert!(ensure_payload(&req).is_err());

        req.doq_reference = Some("DOQ-2025-0042".into());
        assert!(ensure_payload(&req).is_ok());
    }

    #[test]
    fn past_deadlines_are_refused() {
        let yesterday = Utc::now().date_naive().pred_opt();
        assert!(ensure_deadline(yesterday).is_err());
        assert!(ensure_deadline(Some(Utc::now().date_naive())).is_ok());
        assert!(ensure_deadline(None).is_ok());
    }
}
