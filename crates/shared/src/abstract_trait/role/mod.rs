mod command;
mod query;

pub use self::command::{
    DynRoleCommandRepository, DynRoleCommandService, DynUserRoleRepository,
    RoleCommandRepositoryTrait, RoleCommandServiceTrait, UserRoleRepositoryTrait,
};
pub use self::query::{
    DynRoleQueryRepository, DynRoleQueryService, RoleQueryRepositoryTrait, RoleQueryServiceTrait,
};
