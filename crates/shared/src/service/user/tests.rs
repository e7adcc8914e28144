use crate::{
    domain::{
        Actor, RoleCode,
        requests::{CreateStaffRequest, FindAllUsers, UpdateProfileRequest},
    },
    errors::ServiceError,
    testing::{self, MemoryStore, RecordingMailer},
};

fn staff_request(username: &str, role: RoleCode) -> CreateStaffRequest {
    CreateStaffRequest {
        email: format!("{username}@marsafyi.test"),
        username: username.to_string(),
        password: "Captain-on-deck-1".into(),
        full_name: "Hassan Idrissi".into(),
        phone: None,
        role,
    }
}

#[tokio::test]
async fn hr_creates_verified_staff_and_welcomes_them() {
    let store = MemoryStore::new();
    let hr = store.seed_user("hr-lead", RoleCode::Hr).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let created = di
        .user_service
        .command
        .create_staff(
            &Actor::new(hr.user_id, RoleCode::Hr),
            &staff_request("hassan", RoleCode::Captain),
            None,
        )
        .await
        .unwrap()
        .data;

    assert_eq!(created.role, Some(RoleCode::Captain));
    assert!(created.user.is_verified);
    assert_eq!(created.user.company_name.as_deref(), Some("MarsaFyi"));
    assert!(created.user.vendor_code.starts_with("CAP-"));

    let inbox = store.notifications_for(created.user.id).await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title, "Welcome to MarsaFyi");
    assert_eq!(inbox[0].related_entity_type.as_deref(), Some("user"));
}

#[tokio::test]
async fn staff_creation_is_limited_to_staff_roles_and_hr() {
    let store = MemoryStore::new();
    let hr = store.seed_user("hr-lead", RoleCode::Hr).await;
    let seller = store.seed_user("seller", RoleCode::Seller).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let command = &di.user_service.command;

    let buyer_role = command
        .create_staff(
            &Actor::new(hr.user_id, RoleCode::Hr),
            &staff_request("fake-buyer", RoleCode::Buyer),
            None,
        )
        .await;
    assert!(matches!(buyer_role, Err(ServiceError::Validation(_))));

    let not_hr = command
        .create_staff(
            &Actor::new(seller.user_id, RoleCode::Seller),
            &staff_request("rogue", RoleCode::Captain),
            None,
        )
        .await;
    assert!(matches!(not_hr, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn admin_blocks_unblocks_and_verifies() {
    let store = MemoryStore::new();
    let admin = store.seed_user("root", RoleCode::Admin).await;
    let buyer = store.seed_user("buyer", RoleCode::Buyer).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let command = &di.user_service.command;
    let actor = Actor::new(admin.user_id, RoleCode::Admin);

    let blocked = command.block_user(&actor, buyer.user_id).await.unwrap();
    assert!(blocked.data.is_blocked);

    let unblocked = command.unblock_user(&actor, buyer.user_id).await.unwrap();
    assert!(!unblocked.data.is_blocked);

    let verified = command.verify_user(&actor, buyer.user_id).await.unwrap();
    assert!(verified.data.is_verified);

    let own = command.block_user(&actor, admin.user_id).await;
    assert!(matches!(own, Err(ServiceError::Validation(_))));

    let missing = command.block_user(&actor, 9_999).await;
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));

    let hr = Actor::new(buyer.user_id, RoleCode::Hr);
    let denied = command.block_user(&hr, admin.user_id).await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn listing_filters_by_role_and_search() {
    let store = MemoryStore::new();
    let hr = store.seed_user("hr-lead", RoleCode::Hr).await;
    store.seed_user("captain-nour", RoleCode::Captain).await;
    store.seed_user("buyer-adam", RoleCode::Buyer).await;
    store.seed_user("buyer-ines", RoleCode::Buyer).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let actor = Actor::new(hr.user_id, RoleCode::Hr);

    let buyers = di
        .user_service
        .query
        .find_all(
            &actor,
            &FindAllUsers {
                role: Some(RoleCode::Buyer),
                ..FindAllUsers::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(buyers.pagination.total_items, 2);

    let searched = di
        .user_service
        .query
        .find_all(
            &actor,
            &FindAllUsers {
                search: "INES".into(),
                ..FindAllUsers::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(searched.data.len(), 1);
    assert_eq!(searched.data[0].user.username, "buyer-ines");

    let staff = di
        .user_service
        .query
        .find_staff(&actor, &FindAllUsers::default())
        .await
        .unwrap();
    assert_eq!(staff.pagination.total_items, 2);
    assert!(staff.data.iter().all(|u| matches!(
        u.role,
        Some(RoleCode::Captain) | Some(RoleCode::Hr)
    )));

    let denied = di
        .user_service
        .query
        .find_all(
            &Actor::new(hr.user_id, RoleCode::Buyer),
            &FindAllUsers::default(),
        )
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn profile_update_touches_only_the_caller() {
    let store = MemoryStore::new();
    let buyer = store.seed_user("buyer", RoleCode::Buyer).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let updated = di
        .user_service
        .command
        .update_profile(
            &Actor::new(buyer.user_id, RoleCode::Buyer),
            &UpdateProfileRequest {
                full_name: "Adam Benali".into(),
                company_name: Some("Benali Shipping".into()),
                phone: Some("+212600000000".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.data.id, buyer.user_id);
    assert_eq!(updated.data.full_name, "Adam Benali");
    assert_eq!(
        store.user(buyer.user_id).await.unwrap().company_name.as_deref(),
        Some("Benali Shipping")
    );
}
