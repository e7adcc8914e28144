mod auth;
mod category;
mod dashboard;
mod email;
mod hashing;
mod jwt;
mod notification;
mod product;
mod reset_token;
mod rfq;
mod role;
mod user;

pub use self::auth::{
    DynIdentityService, DynLoginService, DynPasswordResetService, DynRegisterService,
    IdentityServiceTrait, LoginServiceTrait, PasswordResetServiceTrait, RegisterServiceTrait,
};
pub use self::category::{
    CategoryRepositoryTrait, CategoryServiceTrait, DynCategoryRepository, DynCategoryService,
};
pub use self::dashboard::{
    DashboardRepositoryTrait, DashboardServiceTrait, DynDashboardRepository, DynDashboardService,
};
pub use self::email::{DynEmailService, EmailRequest, EmailServiceTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::notification::{
    DynNotificationCommandRepository, DynNotificationCommandService,
    DynNotificationQueryRepository, DynNotificationQueryService,
    NotificationCommandRepositoryTrait, NotificationCommandServiceTrait,
    NotificationQueryRepositoryTrait, NotificationQueryServiceTrait,
};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::reset_token::{
    DynResetTokenCommandRepository, DynResetTokenQueryRepository,
    ResetTokenCommandRepositoryTrait, ResetTokenQueryRepositoryTrait,
};
pub use self::rfq::{
    DynRfqCommandRepository, DynRfqCommandService, DynRfqQueryRepository, DynRfqQueryService,
    RfqCommandRepositoryTrait, RfqCommandServiceTrait, RfqQueryRepositoryTrait,
    RfqQueryServiceTrait,
};
pub use self::role::{
    DynRoleCommandRepository, DynRoleCommandService, DynRoleQueryRepository,
    DynRoleQueryService, DynUserRoleRepository, RoleCommandRepositoryTrait,
    RoleCommandServiceTrait, RoleQueryRepositoryTrait, RoleQueryServiceTrait,
    UserRoleRepositoryTrait,
};
pub use self::user::{
    DynUserCommandRepository, DynUserCommandService, DynUserQueryRepository,
    DynUserQueryService, UserCommandRepositoryTrait, UserCommandServiceTrait,
    UserQueryRepositoryTrait, UserQueryServiceTrait,
};
