mod command;
mod query;

pub use self::command::{
    DynNotificationCommandRepository, DynNotificationCommandService,
    NotificationCommandRepositoryTrait, NotificationCommandServiceTrait,
};
pub use self::query::{
    DynNotificationQueryRepository, DynNotificationQueryService, NotificationQueryRepositoryTrait,
    NotificationQueryServiceTrait,
};
