use crate::{
    domain::{
        Actor, RoleCode,
        requests::{AssignRoleRequest, CreateRoleRequest, UpdateRoleRequest},
    },
    errors::ServiceError,
    testing::{self, MemoryStore, RecordingMailer},
};

#[tokio::test]
async fn lists_the_seeded_roles() {
    let store = MemoryStore::new();
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let roles = di.role_service.query.find_active().await.unwrap().data;
    let codes: Vec<&str> = roles.iter().map(|r| r.code.as_str()).collect();

    assert_eq!(codes, ["buyer", "seller", "captain", "hr", "admin"]);
}

#[tokio::test]
async fn admin_manages_role_lifecycle() {
    let store = MemoryStore::new();
    let admin = store.seed_user("root", RoleCode::Admin).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let actor = Actor::new(admin.user_id, RoleCode::Admin);
    let command = &di.role_service.command;

    let created = command
        .create_role(
            &actor,
            &CreateRoleRequest {
                name: "Surveyor".into(),
                code: " Surveyor ".into(),
                description: None,
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(created.code, "surveyor");

    let renamed = command
        .update_role(
            &actor,
            &UpdateRoleRequest {
                id: created.id,
                name: "Marine Surveyor".into(),
                description: Some("Inspects cargo".into()),
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(renamed.name, "Marine Surveyor");

    let retired = command.deactivate_role(&actor, created.id).await.unwrap().data;
    assert!(!retired.is_active);

    let hr = Actor::new(admin.user_id, RoleCode::Hr);
    let denied = command
        .create_role(
            &hr,
            &CreateRoleRequest {
                name: "Pilot".into(),
                code: "pilot".into(),
                description: None,
            },
        )
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn hr_assigns_only_staff_roles() {
    let store = MemoryStore::new();
    let hr = store.seed_user("hr-lead", RoleCode::Hr).await;
    let user = store.seed_user("rania", RoleCode::Buyer).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let actor = Actor::new(hr.user_id, RoleCode::Hr);
    let command = &di.role_service.command;

    let admin_role = command
        .assign_role(
            &actor,
            user.user_id,
            &AssignRoleRequest {
                role_code: RoleCode::Admin,
                is_primary: true,
            },
        )
        .await;
    assert!(matches!(admin_role, Err(ServiceError::Forbidden(_))));

    let assigned = command
        .assign_role(
            &actor,
            user.user_id,
            &AssignRoleRequest {
                role_code: RoleCode::Captain,
                is_primary: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(assigned.data.code, "captain");
    assert_eq!(store.primary_role(user.user_id).await.as_deref(), Some("captain"));

    let inbox = store.notifications_for(user.user_id).await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].related_entity_type.as_deref(), Some("role"));

    let missing_user = command
        .assign_role(
            &actor,
            9_999,
            &AssignRoleRequest {
                role_code: RoleCode::Hr,
                is_primary: false,
            },
        )
        .await;
    assert!(matches!(missing_user, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn only_admin_removes_roles() {
    let store = MemoryStore::new();
    let admin = store.seed_user("root", RoleCode::Admin).await;
    let user = store.seed_user("tarik", RoleCode::Seller).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let command = &di.role_service.command;

    let denied = command
        .remove_role(
            &Actor::new(admin.user_id, RoleCode::Hr),
            user.user_id,
            RoleCode::Seller,
        )
        .await;
    assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

    command
        .remove_role(
            &Actor::new(admin.user_id, RoleCode::Admin),
            user.user_id,
            RoleCode::Seller,
        )
        .await
        .unwrap();
    assert_eq!(store.primary_role(user.user_id).await, None);
}
