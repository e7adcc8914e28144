mod command;
mod query;

use self::command::{RfqCommandService, RfqCommandServiceDeps};
use self::query::RfqQueryService;
use crate::{
    abstract_trait::{
        DynNotificationCommandRepository, DynProductQueryRepository, DynRfqCommandRepository,
        DynRfqCommandService, DynRfqQueryRepository, DynRfqQueryService,
    },
    domain::{Actor, RfqStatus, RfqParty},
    errors::ServiceError,
    model::RfqWithSeller,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct RfqService {
    pub query: DynRfqQueryService,
    pub command: DynRfqCommandService,
}

impl fmt::Debug for RfqService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RfqService")
            .field("query", &"Arc<dyn RfqQueryServiceTrait>")
            .field("command", &"Arc<dyn RfqCommandServiceTrait>")
            .finish()
    }
}

#[derive(Clone)]
pub struct RfqServiceDeps {
    pub rfq_query: DynRfqQueryRepository,
    pub rfq_command: DynRfqCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl RfqService {
    pub async fn new(deps: RfqServiceDeps) -> Self {
        let query = Arc::new(RfqQueryService::new(deps.rfq_query.clone(), deps.registry.clone()).await)
            as DynRfqQueryService;

        let command = Arc::new(
            RfqCommandService::new(RfqCommandServiceDeps {
                rfq_query: deps.rfq_query,
                rfq_command: deps.rfq_command,
                product_query: deps.product_query,
                notification: deps.notification,
                registry: deps.registry,
            })
            .await,
        ) as DynRfqCommandService;

        Self { query, command }
    }
}

/// The side `actor` plays on this RFQ, or `None` when they have no business with it.
pub(crate) fn party_of(actor: &Actor, rfq: &RfqWithSeller) -> Option<RfqParty> {
    if actor.user_id == rfq.rfq.buyer_id {
        Some(RfqParty::Buyer)
    } else if actor.user_id == rfq.seller_id {
        Some(RfqParty::Seller)
    } else if actor.is_moderator() {
        Some(RfqParty::Moderator)
    } else {
        None
    }
}

pub(crate) fn status_of(rfq: &RfqWithSeller) -> Result<RfqStatus, ServiceError> {
    rfq.rfq.status.parse().map_err(ServiceError::Internal)
}

#[cfg(test)]
mod tests;
