use crate::{
    domain::{
        Actor, ProductStatus, RoleCode,
        requests::{CreateProductRequest, FindAllProducts, ProductDecision, ReviewProductRequest},
    },
    errors::ServiceError,
    testing::{self, MemoryStore, RecordingMailer},
};

fn product_request(name: &str, category_id: Option<i32>) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        description: Some("Certified for offshore use".into()),
        category_id,
        price: 89.9,
        currency: "EUR".into(),
        moq: 20,
        quantity: 400,
    }
}

#[tokio::test]
async fn sellers_submit_products_for_review() {
    let store = MemoryStore::new();
    let seller = store.seed_user("seller", RoleCode::Seller).await;
    let category = store.seed_category("Safety gear").await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let actor = Actor::new(seller.user_id, RoleCode::Seller);

    let created = di
        .product_service
        .command
        .create_product(&actor, &product_request("Life jacket", Some(category.category_id)))
        .await
        .unwrap()
        .data;
    assert_eq!(created.status, "submitted");
    assert!(!created.is_verified);
    assert_eq!(created.seller_id, seller.user_id);

    let unknown_category = di
        .product_service
        .command
        .create_product(&actor, &product_request("Flare kit", Some(9_999)))
        .await;
    assert!(matches!(unknown_category, Err(ServiceError::Validation(_))));

    let buyer = Actor::new(seller.user_id, RoleCode::Buyer);
    let denied = di
        .product_service
        .command
        .create_product(&buyer, &product_request("Flare kit", None))
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn shop_shows_only_approved_active_products() {
    let store = MemoryStore::new();
    let seller = store.seed_user("seller", RoleCode::Seller).await;
    let approved = store
        .seed_product(seller.user_id, "Mooring rope", ProductStatus::Approved)
        .await;
    let pending = store
        .seed_product(seller.user_id, "Mooring winch", ProductStatus::Submitted)
        .await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let query = &di.product_service.query;

    let shop = query
        .find_public(&FindAllProducts {
            search: "mooring".into(),
            ..FindAllProducts::default()
        })
        .await
        .unwrap();
    assert_eq!(shop.pagination.total_items, 1);
    assert_eq!(shop.data[0].id, approved.product_id);

    let anonymous = query.find_by_id(None, pending.product_id).await;
    assert!(matches!(anonymous, Err(ServiceError::NotFound(_))));

    let owner = Actor::new(seller.user_id, RoleCode::Seller);
    assert!(query.find_by_id(Some(&owner), pending.product_id).await.is_ok());

    let own = query
        .find_by_seller(&owner, &FindAllProducts::default())
        .await
        .unwrap();
    assert_eq!(own.pagination.total_items, 2);
}

#[tokio::test]
async fn captain_reviews_and_seller_is_notified() {
    let store = MemoryStore::new();
    let seller = store.seed_user("seller", RoleCode::Seller).await;
    let captain = store.seed_user("captain", RoleCode::Captain).await;
    let first = store
        .seed_product(seller.user_id, "Fender", ProductStatus::Submitted)
        .await;
    let second = store
        .seed_product(seller.user_id, "Buoy", ProductStatus::Submitted)
        .await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let actor = Actor::new(captain.user_id, RoleCode::Captain);
    let command = &di.product_service.command;

    let pending = di
        .product_service
        .query
        .find_pending(&actor, &FindAllProducts::default())
        .await
        .unwrap();
    assert_eq!(pending.data[0].id, first.product_id);

    let approved = command
        .review_product(
            &actor,
            first.product_id,
            &ReviewProductRequest {
                decision: ProductDecision::Approve,
                reason: None,
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(approved.status, "approved");
    assert!(approved.is_verified);

    let no_reason = command
        .review_product(
            &actor,
            second.product_id,
            &ReviewProductRequest {
                decision: ProductDecision::Reject,
                reason: Some("  ".into()),
            },
        )
        .await;
    assert!(matches!(no_reason, Err(ServiceError::Validation(_))));

    let rejected = command
        .review_product(
            &actor,
            second.product_id,
            &ReviewProductRequest {
                decision: ProductDecision::Reject,
                reason: Some("Missing certification".into()),
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(rejected.status, "rejected");
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Missing certification")
    );

    let inbox = store.notifications_for(seller.user_id).await;
    assert_eq!(inbox.len(), 2);
    assert!(
        inbox
            .iter()
            .all(|n| n.related_entity_type.as_deref() == Some("product"))
    );

    let seller_review = command
        .review_product(
            &Actor::new(seller.user_id, RoleCode::Seller),
            first.product_id,
            &ReviewProductRequest {
                decision: ProductDecision::Approve,
                reason: None,
            },
        )
        .await;
    assert!(matches!(seller_review, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn edits_send_products_back_to_review() {
    let store = MemoryStore::new();
    let seller = store.seed_user("seller", RoleCode::Seller).await;
    let rival = store.seed_user("rival", RoleCode::Seller).await;
    let product = store
        .seed_product(seller.user_id, "Anchor chain", ProductStatus::Approved)
        .await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let command = &di.product_service.command;

    let updated = command
        .update_product(
            &Actor::new(seller.user_id, RoleCode::Seller),
            product.product_id,
            &product_request("Anchor chain 32mm", None),
        )
        .await
        .unwrap()
        .data;
    assert_eq!(updated.status, "submitted");
    assert!(!updated.is_verified);
    assert_eq!(updated.name, "Anchor chain 32mm");

    let foreign = command
        .update_product(
            &Actor::new(rival.user_id, RoleCode::Seller),
            product.product_id,
            &product_request("Hijacked", None),
        )
        .await;
    assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn delete_is_a_soft_delete_for_owner_or_admin() {
    let store = MemoryStore::new();
    let seller = store.seed_user("seller", RoleCode::Seller).await;
    let admin = store.seed_user("root", RoleCode::Admin).await;
    let product = store
        .seed_product(seller.user_id, "Hull paint", ProductStatus::Approved)
        .await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let deleted = di
        .product_service
        .command
        .delete_product(&Actor::new(admin.user_id, RoleCode::Admin), product.product_id)
        .await
        .unwrap();
    assert!(!deleted.data.is_active);
    assert!(store.product(product.product_id).await.is_some());

    let again = di
        .product_service
        .command
        .delete_product(&Actor::new(seller.user_id, RoleCode::Seller), product.product_id)
        .await;
    assert!(matches!(again, Err(ServiceError::NotFound(_))));

    let shop = di
        .product_service
        .query
        .find_public(&FindAllProducts::default())
        .await
        .unwrap();
    assert_eq!(shop.pagination.total_items, 0);
}
