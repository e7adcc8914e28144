mod command;
mod query;

pub use self::command::{
    DynUserCommandRepository, DynUserCommandService, UserCommandRepositoryTrait,
    UserCommandServiceTrait,
};
pub use self::query::{
    DynUserQueryRepository, DynUserQueryService, UserQueryRepositoryTrait, UserQueryServiceTrait,
};
