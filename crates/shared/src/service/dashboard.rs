use crate::{
    abstract_trait::{DashboardServiceTrait, DynDashboardRepository, DynNotificationQueryRepository},
    domain::{
        Actor, ProductStatus, RoleCode,
        requests::RfqScope,
        responses::{
            AdminDashboard, ApiResponse, BuyerDashboard, CaptainDashboard, HrDashboard,
            SellerDashboard, StatusCount,
        },
    },
    errors::ServiceError,
    model::StatusTally,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct DashboardService {
    repository: DynDashboardRepository,
    notification: DynNotificationQueryRepository,
    metrics: Metrics,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService")
            .field("repository", &"Arc<dyn DashboardRepositoryTrait>")
            .finish()
    }
}

fn counts(rows: Vec<StatusTally>) -> Vec<StatusCount> {
    rows.into_iter().map(StatusCount::from).collect()
}

fn count_of(rows: &[StatusTally], status: &str) -> i64 {
    rows.iter()
        .find(|row| row.status == status)
        .map_or(0, |row| row.total)
}

impl DashboardService {
    pub async fn new(
        repository: DynDashboardRepository,
        notification: DynNotificationQueryRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "dashboard_service");

        Self {
            repository,
            notification,
            metrics,
        }
    }

    async fn build_buyer(&self, actor: &Actor) -> Result<BuyerDashboard, ServiceError> {
        actor.require_any(&[RoleCode::Buyer])?;

        let rfqs = self
            .repository
            .rfq_status_counts(RfqScope::Buyer(actor.user_id))
            .await?;
        let unread_notifications = self.notification.count_unread(actor.user_id).await?;

        Ok(BuyerDashboard {
            total_rfqs: rfqs.iter().map(|row| row.total).sum(),
            rfqs_by_status: counts(rfqs),
            unread_notifications,
        })
    }

    async fn build_seller(&self, actor: &Actor) -> Result<SellerDashboard, ServiceError> {
        actor.require_any(&[RoleCode::Seller])?;

        let products = self
            .repository
            .product_status_counts(Some(actor.user_id))
            .await?;
        let rfqs = self
            .repository
            .rfq_status_counts(RfqScope::Seller(actor.user_id))
            .await?;
        let unread_notifications = self.notification.count_unread(actor.user_id).await?;

        Ok(SellerDashboard {
            products_by_status: counts(products),
            rfqs_by_status: counts(rfqs),
            unread_notifications,
        })
    }

    async fn build_captain(&self, actor: &Actor) -> Result<CaptainDashboard, ServiceError> {
        actor.require_any(&[RoleCode::Captain])?;

        let products = self.repository.product_status_counts(None).await?;
        let rfqs = self.repository.rfq_status_counts(RfqScope::All).await?;

        Ok(CaptainDashboard {
            pending_products: count_of(&products, ProductStatus::Submitted.as_str()),
            rfqs_by_status: counts(rfqs),
        })
    }

    async fn build_admin(&self, actor: &Actor) -> Result<AdminDashboard, ServiceError> {
        actor.require_any(&[RoleCode::Admin])?;

        let users = self.repository.user_role_counts().await?;
        let blocked_users = self.repository.count_blocked_users().await?;
        let products = self.repository.product_status_counts(None).await?;
        let rfqs = self.repository.rfq_status_counts(RfqScope::All).await?;

        Ok(AdminDashboard {
            users_by_role: counts(users),
            blocked_users,
            products_by_status: counts(products),
            rfqs_by_status: counts(rfqs),
        })
    }

    async fn build_hr(&self, actor: &Actor) -> Result<HrDashboard, ServiceError> {
        actor.require_any(&[RoleCode::Hr])?;

        let users = self.repository.user_role_counts().await?;
        let unverified_users = self.repository.count_unverified_users().await?;

        Ok(HrDashboard {
            captains: count_of(&users, RoleCode::Captain.as_str()),
            hr_staff: count_of(&users, RoleCode::Hr.as_str()),
            unverified_users,
        })
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn buyer(&self, actor: &Actor) -> Result<ApiResponse<BuyerDashboard>, ServiceError> {
        info!("📊 Buyer dashboard for user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.build_buyer(actor).await;
        self.metrics
            .complete(Method::Get, "BuyerDashboard", started, &result);

        Ok(ApiResponse::ok("Dashboard fetched successfully", result?))
    }

    async fn seller(&self, actor: &Actor) -> Result<ApiResponse<SellerDashboard>, ServiceError> {
        info!("📊 Seller dashboard for user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.build_seller(actor).await;
        self.metrics
            .complete(Method::Get, "SellerDashboard", started, &result);

        Ok(ApiResponse::ok("Dashboard fetched successfully", result?))
    }

    async fn captain(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<CaptainDashboard>, ServiceError> {
        info!("📊 Captain dashboard for user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.build_captain(actor).await;
        self.metrics
            .complete(Method::Get, "CaptainDashboard", started, &result);

        Ok(ApiResponse::ok("Dashboard fetched successfully", result?))
    }

    async fn admin(&self, actor: &Actor) -> Result<ApiResponse<AdminDashboard>, ServiceError> {
        info!("📊 Admin dashboard for user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.build_admin(actor).await;
        self.metrics
            .complete(Method::Get, "AdminDashboard", started, &result);

        Ok(ApiResponse::ok("Dashboard fetched successfully", result?))
    }

    async fn hr(&self, actor: &Actor) -> Result<ApiResponse<HrDashboard>, ServiceError> {
        info!("📊 HR dashboard for user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.build_hr(actor).await;
        self.metrics.complete(Method::Get, "HrDashboard", started, &result);

        Ok(ApiResponse::ok("Dashboard fetched successfully", result?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            RfqStatus,
            requests::{AssignRoleRequest, CreateRfqRequest, RegisterRequest},
        },
        model::User,
        testing::{self, MemoryStore, RecordingMailer},
    };

    fn tally(status: &str, total: i64) -> StatusTally {
        StatusTally {
            status: status.into(),
            total,
        }
    }

    #[test]
    fn missing_statuses_count_as_zero() {
        let rows = vec![tally("submitted", 4), tally("approved", 9)];
        assert_eq!(count_of(&rows, "submitted"), 4);
        assert_eq!(count_of(&rows, "rejected"), 0);
    }

    fn status_counts(pairs: &[(&str, i64)]) -> Vec<StatusCount> {
        pairs
            .iter()
            .map(|(status, count)| StatusCount {
                status: status.to_string(),
                count: *count,
            })
            .collect()
    }

    fn rfq(product_id: i32, title: &str) -> CreateRfqRequest {
        CreateRfqRequest {
            product_id,
            title: title.to_string(),
            description: None,
            quantity: 40,
            budget_min: None,
            budget_max: None,
            response_deadline: None,
        }
    }

    /// Two buyers, two sellers and one of each staff role, with RFQs in
    /// several states across both sellers' catalogues.
    struct Port {
        store: MemoryStore,
        di: crate::di::DependenciesInject,
        salma: User,
        omar: User,
        karim: User,
        nour: User,
        admin: Actor,
    }

    impl Port {
        async fn new() -> Self {
            let store = MemoryStore::new();
            let salma = store.seed_user("salma", RoleCode::Buyer).await;
            let omar = store.seed_user("omar", RoleCode::Buyer).await;
            let karim = store.seed_user("karim", RoleCode::Seller).await;
            let nour = store.seed_user("nour", RoleCode::Seller).await;
            store.seed_user("hamid", RoleCode::Captain).await;
            store.seed_user("leila", RoleCode::Hr).await;
            let admin = store.seed_user("harbourmaster", RoleCode::Admin).await;

            let ropes = store
                .seed_product(karim.user_id, "Mooring ropes", ProductStatus::Approved)
                .await;
            store
                .seed_product(karim.user_id, "Fenders", ProductStatus::Submitted)
                .await;
            let paint = store
                .seed_product(nour.user_id, "Antifouling paint", ProductStatus::Approved)
                .await;
            store
                .seed_product(nour.user_id, "Bilge pumps", ProductStatus::Rejected)
                .await;

            let di = testing::dependencies(&store, &RecordingMailer::new()).await;
            let rfqs = &di.rfq_service.command;
            let as_salma = Actor::new(salma.user_id, RoleCode::Buyer);
            let as_omar = Actor::new(omar.user_id, RoleCode::Buyer);

            let answered = rfqs
                .create_rfq(&as_salma, &rfq(ropes.product_id, "Ropes for MV Tarik"))
                .await
                .unwrap()
                .data;
            rfqs.create_rfq(&as_salma, &rfq(ropes.product_id, "Spare ropes"))
                .await
                .unwrap();
            rfqs.create_rfq(&as_salma, &rfq(paint.product_id, "Hull paint"))
                .await
                .unwrap();
            rfqs.create_rfq(&as_omar, &rfq(ropes.product_id, "Ropes for MV Noor"))
                .await
                .unwrap();
            store.set_rfq_status(answered.id, RfqStatus::Responded).await;

            Self {
                store,
                di,
                salma,
                omar,
                karim,
                nour,
                admin: Actor::new(admin.user_id, RoleCode::Admin),
            }
        }

        fn as_role(&self, user: &User, role: RoleCode) -> Actor {
            Actor::new(user.user_id, role)
        }
    }

    #[tokio::test]
    async fn buyer_dashboard_counts_only_own_rfqs() {
        let port = Port::new().await;
        let dashboards = &port.di.dashboard_service;

        let salma = dashboards
            .buyer(&port.as_role(&port.salma, RoleCode::Buyer))
            .await
            .unwrap()
            .data;
        assert_eq!(
            salma.rfqs_by_status,
            status_counts(&[("open", 2), ("responded", 1)])
        );
        assert_eq!(salma.total_rfqs, 3);
        assert_eq!(salma.unread_notifications, 0);

        port.di
            .role_service
            .command
            .assign_role(
                &port.admin,
                port.salma.user_id,
                &AssignRoleRequest {
                    role_code: RoleCode::Captain,
                    is_primary: false,
                },
            )
            .await
            .unwrap();

        let omar = dashboards
            .buyer(&port.as_role(&port.omar, RoleCode::Buyer))
            .await
            .unwrap()
            .data;
        assert_eq!(omar.rfqs_by_status, status_counts(&[("open", 1)]));
        assert_eq!(omar.total_rfqs, 1);

        let salma = dashboards
            .buyer(&port.as_role(&port.salma, RoleCode::Buyer))
            .await
            .unwrap()
            .data;
        assert_eq!(salma.unread_notifications, 1);
    }

    #[tokio::test]
    async fn seller_dashboard_covers_own_catalogue() {
        let port = Port::new().await;
        let dashboards = &port.di.dashboard_service;

        let karim = dashboards
            .seller(&port.as_role(&port.karim, RoleCode::Seller))
            .await
            .unwrap()
            .data;
        assert_eq!(
            karim.products_by_status,
            status_counts(&[("approved", 1), ("submitted", 1)])
        );
        assert_eq!(
            karim.rfqs_by_status,
            status_counts(&[("open", 2), ("responded", 1)])
        );
        assert_eq!(karim.unread_notifications, 3);

        let nour = dashboards
            .seller(&port.as_role(&port.nour, RoleCode::Seller))
            .await
            .unwrap()
            .data;
        assert_eq!(
            nour.products_by_status,
            status_counts(&[("approved", 1), ("rejected", 1)])
        );
        assert_eq!(nour.rfqs_by_status, status_counts(&[("open", 1)]));
        assert_eq!(nour.unread_notifications, 1);
    }

    #[tokio::test]
    async fn captain_dashboard_sees_the_whole_port() {
        let port = Port::new().await;

        let captain = port
            .di
            .dashboard_service
            .captain(&Actor::new(0, RoleCode::Captain))
            .await
            .unwrap()
            .data;
        assert_eq!(captain.pending_products, 1);
        assert_eq!(
            captain.rfqs_by_status,
            status_counts(&[("open", 3), ("responded", 1)])
        );
    }

    #[tokio::test]
    async fn admin_and_hr_count_primary_roles_and_account_flags() {
        let port = Port::new().await;

        port.di
            .role_service
            .command
            .assign_role(
                &port.admin,
                port.salma.user_id,
                &AssignRoleRequest {
                    role_code: RoleCode::Captain,
                    is_primary: false,
                },
            )
            .await
            .unwrap();
        port.di
            .user_service
            .command
            .block_user(&port.admin, port.omar.user_id)
            .await
            .unwrap();
        port.di
            .auth_service
            .register
            .register(
                &RegisterRequest {
                    email: "rashid@harbour.example".into(),
                    username: "rashid".into(),
                    password: "Quay-side-42".into(),
                    confirm_password: "Quay-side-42".into(),
                    full_name: "Rashid Alaoui".into(),
                    company_name: None,
                    phone: None,
                    role: RoleCode::Seller,
                },
                None,
            )
            .await
            .unwrap();

        let admin = port
            .di
            .dashboard_service
            .admin(&port.admin)
            .await
            .unwrap()
            .data;
        assert_eq!(
            admin.users_by_role,
            status_counts(&[
                ("admin", 1),
                ("buyer", 2),
                ("captain", 1),
                ("hr", 1),
                ("seller", 3),
            ])
        );
        assert_eq!(admin.blocked_users, 1);
        assert_eq!(
            admin.products_by_status,
            status_counts(&[("approved", 2), ("rejected", 1), ("submitted", 1)])
        );
        assert_eq!(
            admin.rfqs_by_status,
            status_counts(&[("open", 3), ("responded", 1)])
        );

        let hr = port
            .di
            .dashboard_service
            .hr(&Actor::new(0, RoleCode::Hr))
            .await
            .unwrap()
            .data;
        assert_eq!(hr.captains, 1);
        assert_eq!(hr.hr_staff, 1);
        assert_eq!(hr.unverified_users, 1);

        let as_admin = port.di.dashboard_service.hr(&port.admin).await;
        assert!(as_admin.is_ok());
        assert_eq!(port.store.primary_role(port.salma.user_id).await.as_deref(), Some("buyer"));
    }

    #[tokio::test]
    async fn dashboards_refuse_other_roles() {
        let port = Port::new().await;
        let dashboards = &port.di.dashboard_service;
        let buyer = port.as_role(&port.salma, RoleCode::Buyer);
        let seller = port.as_role(&port.karim, RoleCode::Seller);

        assert!(matches!(
            dashboards.hr(&buyer).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            dashboards.admin(&seller).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            dashboards.seller(&buyer).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            dashboards.buyer(&Actor::new(0, RoleCode::Captain)).await,
            Err(ServiceError::Forbidden(_))
        ));
    }
}
