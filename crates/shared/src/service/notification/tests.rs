use crate::{
    abstract_trait::DynNotificationCommandRepository,
    domain::{
        Actor, RoleCode,
        requests::{CreateNotificationRequest, FindAllNotifications},
    },
    errors::ServiceError,
    service::notify,
    testing::{self, MemoryStore, RecordingMailer},
};
use std::sync::Arc;

async fn seed_inbox(store: &MemoryStore, user_id: i32, count: usize) {
    let command = Arc::new(store.clone()) as DynNotificationCommandRepository;
    for n in 0..count {
        notify(
            &command,
            CreateNotificationRequest::new(user_id, format!("Notice {n}"), "Berth schedule changed")
                .related_to("rfq", n as i32),
        )
        .await;
    }
}

#[tokio::test]
async fn lists_newest_first_and_counts_unread() {
    let store = MemoryStore::new();
    let user = store.seed_user("nadia", RoleCode::Buyer).await;
    seed_inbox(&store, user.user_id, 3).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let actor = Actor::new(user.user_id, RoleCode::Buyer);

    let page = di
        .notification_service
        .query
        .find_all(&actor, &FindAllNotifications::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total_items, 3);
    assert_eq!(page.data[0].title, "Notice 2");

    let unread = di
        .notification_service
        .query
        .unread_count(&actor)
        .await
        .unwrap();
    assert_eq!(unread.data.unread, 3);
}

#[tokio::test]
async fn marking_read_updates_counts_and_filters() {
    let store = MemoryStore::new();
    let user = store.seed_user("nadia", RoleCode::Buyer).await;
    seed_inbox(&store, user.user_id, 2).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let actor = Actor::new(user.user_id, RoleCode::Buyer);
    let first = store.notifications_for(user.user_id).await[0].notification_id;

    let read = di
        .notification_service
        .command
        .mark_read(&actor, first)
        .await
        .unwrap();
    assert!(read.data.is_read);

    let unread_only = di
        .notification_service
        .query
        .find_all(
            &actor,
            &FindAllNotifications {
                unread_only: true,
                ..FindAllNotifications::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unread_only.data.len(), 1);

    let flipped = di
        .notification_service
        .command
        .mark_all_read(&actor)
        .await
        .unwrap();
    assert_eq!(flipped.data, 1);
}

#[tokio::test]
async fn other_users_notifications_look_missing() {
    let store = MemoryStore::new();
    let owner = store.seed_user("owner", RoleCode::Seller).await;
    let other = store.seed_user("other", RoleCode::Admin).await;
    seed_inbox(&store, owner.user_id, 1).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let id = store.notifications_for(owner.user_id).await[0].notification_id;
    let intruder = Actor::new(other.user_id, RoleCode::Admin);

    let read = di.notification_service.command.mark_read(&intruder, id).await;
    assert!(matches!(read, Err(ServiceError::NotFound(_))));

    let delete = di
        .notification_service
        .command
        .delete_notification(&intruder, id)
        .await;
    assert!(matches!(delete, Err(ServiceError::NotFound(_))));

    di.notification_service
        .command
        .delete_notification(&Actor::new(owner.user_id, RoleCode::Seller), id)
        .await
        .unwrap();
    assert!(store.notifications_for(owner.user_id).await.is_empty());
}
