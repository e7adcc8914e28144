use crate::{
    abstract_trait::{
        DynCategoryRepository, DynCategoryService, DynDashboardRepository, DynDashboardService,
        DynEmailService, DynHashing, DynJwtService, DynNotificationCommandRepository,
        DynNotificationQueryRepository,
        DynProductCommandRepository, DynProductQueryRepository, DynResetTokenCommandRepository,
        DynResetTokenQueryRepository, DynRfqCommandRepository, DynRfqQueryRepository,
        DynRoleCommandRepository, DynRoleQueryRepository, DynUserCommandRepository,
        DynUserQueryRepository, DynUserRoleRepository,
    },
    config::ConnectionPool,
    repository::{
        CategoryRepository, DashboardRepository, NotificationRepository, ProductRepository,
        ResetTokenRepository, RfqRepository, RoleRepository, UserRepository,
    },
    service::{
        AuthService, AuthServiceDeps, CategoryService, DashboardService, NotificationService,
        ProductService, ProductServiceDeps, RfqService, RfqServiceDeps, RoleService,
        RoleServiceDeps, UserService, UserServiceDeps,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

/// Every repository a service may depend on, as trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub role_query: DynRoleQueryRepository,
    pub role_command: DynRoleCommandRepository,
    pub user_role: DynUserRoleRepository,
    pub reset_query: DynResetTokenQueryRepository,
    pub reset_command: DynResetTokenCommandRepository,
    pub category: DynCategoryRepository,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub rfq_query: DynRfqQueryRepository,
    pub rfq_command: DynRfqCommandRepository,
    pub notification_query: DynNotificationQueryRepository,
    pub notification_command: DynNotificationCommandRepository,
    pub dashboard: DynDashboardRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        let user = UserRepository::new(pool.clone());
        let role = RoleRepository::new(pool.clone());
        let reset_token = ResetTokenRepository::new(pool.clone());
        let product = ProductRepository::new(pool.clone());
        let rfq = RfqRepository::new(pool.clone());
        let notification = NotificationRepository::new(pool.clone());

        Self {
            user_query: user.query,
            user_command: user.command,
            role_query: role.query,
            role_command: role.command,
            user_role: role.user_role,
            reset_query: reset_token.query,
            reset_command: reset_token.command,
            category: Arc::new(CategoryRepository::new(pool.clone())) as DynCategoryRepository,
            product_query: product.query,
            product_command: product.command,
            rfq_query: rfq.query,
            rfq_command: rfq.command,
            notification_query: notification.query,
            notification_command: notification.command,
            dashboard: Arc::new(DashboardRepository::new(pool)) as DynDashboardRepository,
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub role_service: RoleService,
    pub category_service: DynCategoryService,
    pub product_service: ProductService,
    pub rfq_service: RfqService,
    pub notification_service: NotificationService,
    pub dashboard_service: DynDashboardService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("user_service", &"<UserService>")
            .field("role_service", &"<RoleService>")
            .field("category_service", &"<CategoryService>")
            .field("product_service", &"<ProductService>")
            .field("rfq_service", &"<RfqService>")
            .field("notification_service", &"<NotificationService>")
            .field("dashboard_service", &"<DashboardService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub mailer: DynEmailService,
    pub frontend_url: String,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            repositories: repos,
            hash,
            jwt_config,
            mailer,
            frontend_url,
            registry,
        } = deps;

        let auth_service = AuthService::new(AuthServiceDeps {
            hash: hash.clone(),
            jwt: jwt_config,
            mailer,
            frontend_url,
            user_query: repos.user_query.clone(),
            user_command: repos.user_command.clone(),
            role_query: repos.role_query.clone(),
            reset_query: repos.reset_query.clone(),
            reset_command: repos.reset_command.clone(),
            registry: registry.clone(),
        })
        .await;

        let user_service = UserService::new(UserServiceDeps {
            hash,
            user_query: repos.user_query.clone(),
            user_command: repos.user_command.clone(),
            role_query: repos.role_query.clone(),
            notification: repos.notification_command.clone(),
            registry: registry.clone(),
        })
        .await;

        let role_service = RoleService::new(RoleServiceDeps {
            role_query: repos.role_query.clone(),
            role_command: repos.role_command.clone(),
            user_role: repos.user_role.clone(),
            user_query: repos.user_query.clone(),
            notification: repos.notification_command.clone(),
            registry: registry.clone(),
        })
        .await;

        let category_service =
            Arc::new(CategoryService::new(repos.category.clone(), registry.clone()).await)
                as DynCategoryService;

        let product_service = ProductService::new(ProductServiceDeps {
            product_query: repos.product_query.clone(),
            product_command: repos.product_command.clone(),
            category: repos.category.clone(),
            notification: repos.notification_command.clone(),
            registry: registry.clone(),
        })
        .await;

        let rfq_service = RfqService::new(RfqServiceDeps {
            rfq_query: repos.rfq_query.clone(),
            rfq_command: repos.rfq_command.clone(),
            product_query: repos.product_query.clone(),
            notification: repos.notification_command.clone(),
            registry: registry.clone(),
        })
        .await;

        let notification_service = NotificationService::new(
            repos.notification_query.clone(),
            repos.notification_command.clone(),
            registry.clone(),
        )
        .await;

        let dashboard_service = Arc::new(
            DashboardService::new(repos.dashboard, repos.notification_query, registry).await,
        ) as DynDashboardService;

        Self {
            auth_service,
            user_service,
            role_service,
            category_service,
            product_service,
            rfq_service,
            notification_service,
            dashboard_service,
        }
    }
}
