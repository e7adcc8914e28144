use crate::{
    domain::{
        Actor, ProductStatus, RfqStatus, RoleCode,
        requests::{CreateRfqRequest, FindAllRfqs, UpdateRfqRequest, UpdateRfqStatusRequest},
    },
    errors::ServiceError,
    model::User,
    testing::{self, MemoryStore, RecordingMailer},
};

struct Harbour {
    store: MemoryStore,
    buyer: User,
    seller: User,
    captain: User,
    product_id: i32,
}

impl Harbour {
    async fn new() -> Self {
        let store = MemoryStore::new();
        let buyer = store.seed_user("buyer", RoleCode::Buyer).await;
        let seller = store.seed_user("seller", RoleCode::Seller).await;
        let captain = store.seed_user("captain", RoleCode::Captain).await;
        let product = store
            .seed_product(seller.user_id, "Marine gas oil", ProductStatus::Approved)
            .await;

        Self {
            store,
            buyer,
            seller,
            captain,
            product_id: product.product_id,
        }
    }

    fn buyer(&self) -> Actor {
        Actor::new(self.buyer.user_id, RoleCode::Buyer)
    }

    fn seller(&self) -> Actor {
        Actor::new(self.seller.user_id, RoleCode::Seller)
    }

    fn captain(&self) -> Actor {
        Actor::new(self.captain.user_id, RoleCode::Captain)
    }
}

fn rfq_edit(title: &str) -> UpdateRfqRequest {
    UpdateRfqRequest {
        title: title.to_string(),
        description: Some("Delivery alongside at berth 7".into()),
        quantity: 150,
        budget_min: Some(900.0),
        budget_max: Some(1_400.0),
        response_deadline: None,
    }
}

fn rfq_request(product_id: i32, title: &str) -> CreateRfqRequest {
    CreateRfqRequest {
        product_id,
        title: title.to_string(),
        description: Some("Delivery alongside at berth 7".into()),
        quantity: 120,
        budget_min: Some(900.0),
        budget_max: Some(1_400.0),
        response_deadline: None,
    }
}

fn move_to(status: RfqStatus) -> UpdateRfqStatusRequest {
    UpdateRfqStatusRequest {
        status,
        message: None,
        quoted_price: None,
        doq_reference: None,
    }
}

#[tokio::test]
async fn buyers_raise_rfqs_on_approved_products() {
    let h = Harbour::new().await;
    let pending = h
        .store
        .seed_product(h.seller.user_id, "Lube oil", ProductStatus::Submitted)
        .await;
    let di = testing::dependencies(&h.store, &RecordingMailer::new()).await;
    let command = &di.rfq_service.command;

    let created = command
        .create_rfq(&h.buyer(), &rfq_request(h.product_id, "MGO for MV Atlas"))
        .await
        .unwrap()
        .data;
    assert_eq!(created.status, "open");
    assert_eq!(created.seller_id, Some(h.seller.user_id));
    assert_eq!(created.product_name.as_deref(), Some("Marine gas oil"));

    let inbox = h.store.notifications_for(h.seller.user_id).await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title, "New RFQ received");
    assert_eq!(inbox[0].related_entity_id, Some(created.id));

    let unapproved = command
        .create_rfq(&h.buyer(), &rfq_request(pending.product_id, "Lube oil"))
        .await;
    assert!(matches!(unapproved, Err(ServiceError::Validation(_))));

    let missing = command
        .create_rfq(&h.buyer(), &rfq_request(9_999, "Ghost"))
        .await;
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));

    let as_seller = command
        .create_rfq(&h.seller(), &rfq_request(h.product_id, "Self quote"))
        .await;
    assert!(matches!(as_seller, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn listings_are_scoped_to_the_caller() {
    let h = Harbour::new().await;
    let other_buyer = h.store.seed_user("other", RoleCode::Buyer).await;
    let di = testing::dependencies(&h.store, &RecordingMailer::new()).await;
    let command = &di.rfq_service.command;
    let query = &di.rfq_service.query;

    let mine = command
        .create_rfq(&h.buyer(), &rfq_request(h.product_id, "Bunkers"))
        .await
        .unwrap()
        .data;
    command
        .create_rfq(
            &Actor::new(other_buyer.user_id, RoleCode::Buyer),
            &rfq_request(h.product_id, "Fresh water"),
        )
        .await
        .unwrap();

    let own = query
        .find_for_buyer(&h.buyer(), &FindAllRfqs::default())
        .await
        .unwrap();
    assert_eq!(own.pagination.total_items, 1);
    assert_eq!(own.data[0].id, mine.id);

    let incoming = query
        .find_for_seller(&h.seller(), &FindAllRfqs::default())
        .await
        .unwrap();
    assert_eq!(incoming.pagination.total_items, 2);

    let everything = query
        .find_all(&h.captain(), &FindAllRfqs::default())
        .await
        .unwrap();
    assert_eq!(everything.data[0].title, "Fresh water");

    let denied = query.find_all(&h.buyer(), &FindAllRfqs::default()).await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

    let stranger = query
        .find_by_id(&Actor::new(other_buyer.user_id, RoleCode::Buyer), mine.id)
        .await;
    assert!(matches!(stranger, Err(ServiceError::Forbidden(_))));
    assert!(query.find_by_id(&h.captain(), mine.id).await.is_ok());
}

#[tokio::test]
async fn negotiation_runs_through_the_status_machine() {
    let h = Harbour::new().await;
    let di = testing::dependencies(&h.store, &RecordingMailer::new()).await;
    let command = &di.rfq_service.command;

    let rfq = command
        .create_rfq(&h.buyer(), &rfq_request(h.product_id, "Bunkers"))
        .await
        .unwrap()
        .data;

    let empty_response = command
        .update_status(&h.seller(), rfq.id, &move_to(RfqStatus::Responded))
        .await;
    assert!(matches!(empty_response, Err(ServiceError::Validation(_))));

    let responded = command
        .update_status(
            &h.seller(),
            rfq.id,
            &UpdateRfqStatusRequest {
                quoted_price: Some(1_250.0),
                message: Some("Can deliver within 48 hours".into()),
                ..move_to(RfqStatus::Responded)
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(responded.status, "responded");
    assert_eq!(responded.quoted_price, Some(1_250.0));

    let no_reference = command
        .update_status(&h.captain(), rfq.id, &move_to(RfqStatus::DoqProvided))
        .await;
    assert!(matches!(no_reference, Err(ServiceError::Validation(_))));

    let doq = command
        .update_status(
            &h.captain(),
            rfq.id,
            &UpdateRfqStatusRequest {
                doq_reference: Some("DOQ-2025-0042".into()),
                ..move_to(RfqStatus::DoqProvided)
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(doq.doq_reference.as_deref(), Some("DOQ-2025-0042"));
    assert_eq!(doq.quoted_price, Some(1_250.0));

    let seller_accepts = command
        .update_status(&h.seller(), rfq.id, &move_to(RfqStatus::Accepted))
        .await;
    assert!(matches!(
        seller_accepts,
        Err(ServiceError::InvalidTransition(_))
    ));

    let accepted = command
        .update_status(&h.buyer(), rfq.id, &move_to(RfqStatus::Accepted))
        .await
        .unwrap()
        .data;
    assert_eq!(accepted.status, "accepted");

    let fulfilled = command
        .update_status(&h.seller(), rfq.id, &move_to(RfqStatus::Fulfilled))
        .await
        .unwrap()
        .data;
    assert_eq!(fulfilled.status, "fulfilled");

    // the captain's DOQ reached both sides
    let buyer_inbox = h.store.notifications_for(h.buyer.user_id).await;
    assert_eq!(buyer_inbox.len(), 3);
    let seller_inbox = h.store.notifications_for(h.seller.user_id).await;
    assert_eq!(seller_inbox.len(), 3);
}

#[tokio::test]
async fn buyer_edits_resubmit_answered_rfqs() {
    let h = Harbour::new().await;
    let di = testing::dependencies(&h.store, &RecordingMailer::new()).await;
    let command = &di.rfq_service.command;

    let rfq = command
        .create_rfq(&h.buyer(), &rfq_request(h.product_id, "Bunkers"))
        .await
        .unwrap()
        .data;

    let untouched = command
        .update_rfq(&h.buyer(), rfq.id, &rfq_edit("Bunkers, 150t"))
        .await
        .unwrap()
        .data;
    assert_eq!(untouched.status, "open");

    h.store.set_rfq_status(rfq.id, RfqStatus::Responded).await;
    let resubmitted = command
        .update_rfq(&h.buyer(), rfq.id, &rfq_edit("Bunkers, 180t"))
        .await
        .unwrap()
        .data;
    assert_eq!(resubmitted.status, "resubmitted");
    assert_eq!(resubmitted.title, "Bunkers, 180t");
    assert_eq!(resubmitted.quantity, 150);
    assert_eq!(resubmitted.product_id, h.product_id);

    let seller_inbox = h.store.notifications_for(h.seller.user_id).await;
    assert!(seller_inbox.iter().any(|n| n.title == "RFQ resubmitted"));

    let foreign = command
        .update_rfq(&h.seller(), rfq.id, &rfq_edit("Hijacked"))
        .await;
    assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));

    h.store.set_rfq_status(rfq.id, RfqStatus::Closed).await;
    let finished = command
        .update_rfq(&h.buyer(), rfq.id, &rfq_edit("Too late"))
        .await;
    assert!(matches!(finished, Err(ServiceError::InvalidTransition(_))));
}

#[tokio::test]
async fn only_open_rfqs_can_be_deleted() {
    let h = Harbour::new().await;
    let di = testing::dependencies(&h.store, &RecordingMailer::new()).await;
    let command = &di.rfq_service.command;

    let first = command
        .create_rfq(&h.buyer(), &rfq_request(h.product_id, "Bunkers"))
        .await
        .unwrap()
        .data;
    let second = command
        .create_rfq(&h.buyer(), &rfq_request(h.product_id, "Lubes"))
        .await
        .unwrap()
        .data;

    h.store.set_rfq_status(second.id, RfqStatus::Responded).await;
    let answered = command.delete_rfq(&h.buyer(), second.id).await;
    assert!(matches!(answered, Err(ServiceError::Conflict(_))));

    let foreign = command.delete_rfq(&h.seller(), first.id).await;
    assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));

    command.delete_rfq(&h.buyer(), first.id).await.unwrap();
    assert!(h.store.rfq(first.id).await.is_none());

    let gone = command.delete_rfq(&h.buyer(), first.id).await;
    assert!(matches!(gone, Err(ServiceError::NotFound(_))));
}
