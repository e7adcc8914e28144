use super::{TEST_BCRYPT_COST, TEST_PASSWORD};
use crate::{
    abstract_trait::{
        CategoryRepositoryTrait, DashboardRepositoryTrait, NotificationCommandRepositoryTrait,
        NotificationQueryRepositoryTrait, ProductCommandRepositoryTrait,
        ProductQueryRepositoryTrait, ResetTokenCommandRepositoryTrait,
        ResetTokenQueryRepositoryTrait, RfqCommandRepositoryTrait, RfqQueryRepositoryTrait,
        RoleCommandRepositoryTrait, RoleQueryRepositoryTrait, UserCommandRepositoryTrait,
        UserQueryRepositoryTrait, UserRoleRepositoryTrait,
    },
    di::Repositories,
    domain::{
        ProductStatus, RfqStatus, RoleCode,
        requests::{
            CreateCategoryRequest, CreateNotificationRequest, CreateResetTokenRequest,
            CreateRoleRequest, CreateUserRequest, FindAllNotifications, FindAllProducts,
            FindAllRfqs, FindAllUsers, NewProduct, NewRfq, RfqScope, UpdateProfileRequest,
            UpdateRfqStatusRequest, UpdateRoleRequest,
        },
        responses::Pagination,
    },
    errors::RepositoryError,
    model::{
        Category, Notification, Product, ResetToken, Rfq, RfqWithSeller, Role, StatusTally, User,
        UserRole, UserWithRole,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn matches_search(search: &str, fields: &[Option<&str>]) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
}

fn paginate<T>(rows: Vec<T>, page: i32, page_size: i32) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    let (limit, offset) = Pagination::limit_offset(page, page_size);
    let rows = rows
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();
    (rows, total)
}

fn tally<'a>(statuses: impl Iterator<Item = &'a str>) -> Vec<StatusTally> {
    let mut buckets = BTreeMap::<&str, i64>::new();
    for status in statuses {
        *buckets.entry(status).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(status, total)| StatusTally {
            status: status.to_string(),
            total,
        })
        .collect()
}

#[derive(Default)]
struct State {
    last_id: i32,
    users: Vec<User>,
    roles: Vec<Role>,
    user_roles: Vec<UserRole>,
    reset_tokens: Vec<ResetToken>,
    categories: Vec<Category>,
    products: Vec<Product>,
    rfqs: Vec<Rfq>,
    notifications: Vec<Notification>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn primary_role_code(&self, user_id: i32) -> Option<String> {
        self.user_roles
            .iter()
            .find(|ur| ur.user_id == user_id && ur.is_primary)
            .and_then(|ur| self.roles.iter().find(|r| r.role_id == ur.role_id))
            .map(|role| role.role_code.clone())
    }

    fn user_mut(&mut self, user_id: i32) -> Result<&mut User, RepositoryError> {
        self.users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or(RepositoryError::NotFound)
    }

    fn role_mut(&mut self, role_id: i32) -> Result<&mut Role, RepositoryError> {
        self.roles
            .iter_mut()
            .find(|r| r.role_id == role_id)
            .ok_or(RepositoryError::NotFound)
    }

    fn product_mut(&mut self, product_id: i32) -> Result<&mut Product, RepositoryError> {
        self.products
            .iter_mut()
            .find(|p| p.product_id == product_id)
            .ok_or(RepositoryError::NotFound)
    }

    fn rfq_mut(&mut self, rfq_id: i32) -> Result<&mut Rfq, RepositoryError> {
        self.rfqs
            .iter_mut()
            .find(|q| q.rfq_id == rfq_id)
            .ok_or(RepositoryError::NotFound)
    }

    fn with_seller(&self, rfq: &Rfq) -> Option<RfqWithSeller> {
        self.products
            .iter()
            .find(|p| p.product_id == rfq.product_id)
            .map(|product| RfqWithSeller {
                rfq: rfq.clone(),
                seller_id: product.seller_id,
                product_name: product.name.clone(),
            })
    }

    fn insert_user(&mut self, req: &CreateUserRequest) -> Result<User, RepositoryError> {
        let email = req.email.to_lowercase();
        for user in &self.users {
            if user.email.to_lowercase() == email {
                return Err(RepositoryError::AlreadyExists("users_email_key".into()));
            }
            if user.username == req.username {
                return Err(RepositoryError::AlreadyExists("users_username_key".into()));
            }
            if user.vendor_code == req.vendor_code {
                return Err(RepositoryError::AlreadyExists(
                    "users_vendor_code_key".into(),
                ));
            }
        }

        let user = User {
            user_id: self.next_id(),
            email: req.email.clone(),
            username: req.username.clone(),
            password: req.password.clone(),
            full_name: req.full_name.clone(),
            company_name: req.company_name.clone(),
            phone: req.phone.clone(),
            vendor_code: req.vendor_code.clone(),
            ip_address: req.ip_address.clone(),
            is_verified: req.is_verified,
            is_blocked: false,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn grant(&mut self, user_id: i32, role_id: i32, is_primary: bool) -> UserRole {
        if is_primary {
            for ur in self.user_roles.iter_mut().filter(|ur| ur.user_id == user_id) {
                ur.is_primary = ur.role_id == role_id;
            }
        }

        if let Some(existing) = self
            .user_roles
            .iter_mut()
            .find(|ur| ur.user_id == user_id && ur.role_id == role_id)
        {
            existing.is_primary |= is_primary;
            return existing.clone();
        }

        let user_role = UserRole {
            user_role_id: self.next_id(),
            user_id,
            role_id,
            is_primary,
            created_at: Some(now()),
        };
        self.user_roles.push(user_role.clone());
        user_role
    }

    fn products_page(
        &self,
        req: &FindAllProducts,
        status: Option<&str>,
        seller_id: Option<i32>,
        oldest_first: bool,
    ) -> (Vec<Product>, i64) {
        let mut rows: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| {
                matches_search(&req.search, &[Some(p.name.as_str()), p.description.as_deref()])
            })
            .filter(|p| req.category_id.is_none() || p.category_id == req.category_id)
            .filter(|p| status.is_none_or(|s| p.status == s))
            .filter(|p| seller_id.is_none_or(|id| p.seller_id == id))
            .cloned()
            .collect();

        rows.sort_by_key(|p| p.product_id);
        if !oldest_first {
            rows.reverse();
        }

        paginate(rows, req.page, req.page_size)
    }
}

/// Every repository trait over one shared in-memory state.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store holding the seeded platform roles.
    pub fn new() -> Self {
        let mut state = State::default();

        for (name, code) in [
            ("Buyer", RoleCode::Buyer),
            ("Seller", RoleCode::Seller),
            ("Captain", RoleCode::Captain),
            ("HR", RoleCode::Hr),
            ("Admin", RoleCode::Admin),
        ] {
            let role_id = state.next_id();
            state.roles.push(Role {
                role_id,
                role_name: name.to_string(),
                role_code: code.as_str().to_string(),
                description: None,
                is_active: true,
                created_at: Some(now()),
                updated_at: Some(now()),
            });
        }

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            user_query: Arc::new(self.clone()),
            user_command: Arc::new(self.clone()),
            role_query: Arc::new(self.clone()),
            role_command: Arc::new(self.clone()),
            user_role: Arc::new(self.clone()),
            reset_query: Arc::new(self.clone()),
            reset_command: Arc::new(self.clone()),
            category: Arc::new(self.clone()),
            product_query: Arc::new(self.clone()),
            product_command: Arc::new(self.clone()),
            rfq_query: Arc::new(self.clone()),
            rfq_command: Arc::new(self.clone()),
            notification_query: Arc::new(self.clone()),
            notification_command: Arc::new(self.clone()),
            dashboard: Arc::new(self.clone()),
        }
    }

    /// A verified account with `role` as primary role and [`TEST_PASSWORD`] as password.
    pub async fn seed_user(&self, username: &str, role: RoleCode) -> User {
        let password = bcrypt::hash(TEST_PASSWORD, TEST_BCRYPT_COST).expect("bcrypt hash");
        let mut state = self.state.lock().await;

        let vendor_code = format!("{}-25-{:06}", role.vendor_prefix(), state.last_id + 1);
        let user = state
            .insert_user(&CreateUserRequest {
                email: format!("{username}@marsa.test"),
                username: username.to_string(),
                password,
                full_name: username.to_string(),
                company_name: None,
                phone: None,
                vendor_code,
                ip_address: None,
                is_verified: true,
            })
            .expect("unique seed user");

        let role_id = state
            .roles
            .iter()
            .find(|r| r.role_code == role.as_str())
            .map(|r| r.role_id)
            .expect("seeded role");
        state.grant(user.user_id, role_id, true);

        user
    }

    pub async fn seed_category(&self, name: &str) -> Category {
        let mut state = self.state.lock().await;
        let category = Category {
            category_id: state.next_id(),
            name: name.to_string(),
            description: None,
            is_active: true,
            created_at: Some(now()),
        };
        state.categories.push(category.clone());
        category
    }

    pub async fn seed_product(&self, seller_id: i32, name: &str, status: ProductStatus) -> Product {
        let mut state = self.state.lock().await;
        let product = Product {
            product_id: state.next_id(),
            seller_id,
            category_id: None,
            name: name.to_string(),
            description: Some(format!("{name} for port operations")),
            price: 250.0,
            currency: "USD".into(),
            moq: 5,
            quantity: 100,
            status: status.as_str().to_string(),
            rejection_reason: None,
            is_verified: status == ProductStatus::Approved,
            is_active: true,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.products.push(product.clone());
        product
    }

    pub async fn set_rfq_status(&self, rfq_id: i32, status: RfqStatus) {
        let mut state = self.state.lock().await;
        if let Ok(rfq) = state.rfq_mut(rfq_id) {
            rfq.status = status.as_str().to_string();
        }
    }

    pub async fn user(&self, user_id: i32) -> Option<User> {
        let state = self.state.lock().await;
        state.users.iter().find(|u| u.user_id == user_id).cloned()
    }

    pub async fn product(&self, product_id: i32) -> Option<Product> {
        let state = self.state.lock().await;
        state
            .products
            .iter()
            .find(|p| p.product_id == product_id)
            .cloned()
    }

    pub async fn rfq(&self, rfq_id: i32) -> Option<Rfq> {
        let state = self.state.lock().await;
        state.rfqs.iter().find(|q| q.rfq_id == rfq_id).cloned()
    }

    pub async fn notifications_for(&self, user_id: i32) -> Vec<Notification> {
        let state = self.state.lock().await;
        state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn primary_role(&self, user_id: i32) -> Option<String> {
        self.state.lock().await.primary_role_code(user_id)
    }

    pub async fn reset_tokens_for(&self, user_id: i32) -> Vec<ResetToken> {
        let state = self.state.lock().await;
        state
            .reset_tokens
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Moves a reset token's expiry, e.g. into the past.
    pub async fn set_token_expiry(&self, token: &str, expires_at: NaiveDateTime) {
        let mut state = self.state.lock().await;
        if let Some(found) = state.reset_tokens.iter_mut().find(|t| t.token == token) {
            found.expires_at = expires_at;
        }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryStore {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserWithRole>, i64), RepositoryError> {
        let state = self.state.lock().await;
        let mut rows: Vec<UserWithRole> = state
            .users
            .iter()
            .filter(|u| {
                matches_search(
                    &req.search,
                    &[
                        Some(u.email.as_str()),
                        Some(u.username.as_str()),
                        Some(u.full_name.as_str()),
                    ],
                )
            })
            .map(|u| UserWithRole {
                user: u.clone(),
                role_code: state.primary_role_code(u.user_id),
            })
            .filter(|u| req.role.is_none_or(|r| u.role_code.as_deref() == Some(r.as_str())))
            .collect();
        rows.reverse();

        Ok(paginate(rows, req.page, req.page_size))
    }

    async fn find_staff(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserWithRole>, i64), RepositoryError> {
        let (rows, _) = UserQueryRepositoryTrait::find_all(
            self,
            &FindAllUsers {
                page: 1,
                page_size: i32::MAX,
                ..req.clone()
            },
        )
        .await?;

        let staff = rows
            .into_iter()
            .filter(|u| {
                u.role_code
                    .as_deref()
                    .and_then(|code| code.parse::<RoleCode>().ok())
                    .is_some_and(|code| code.is_staff())
            })
            .collect();

        Ok(paginate(staff, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.user(id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        let email = email.to_lowercase();
        Ok(state
            .users
            .iter()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryStore {
    async fn create_user(
        &self,
        req: &CreateUserRequest,
        primary_role_id: i32,
    ) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.roles.iter().any(|r| r.role_id == primary_role_id) {
            return Err(RepositoryError::ForeignKey("user_roles_role_id_fkey".into()));
        }
        let user = state.insert_user(req)?;
        state.grant(user.user_id, primary_role_id, true);
        Ok(user)
    }

    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        let user = state.user_mut(user_id)?;
        user.full_name = req.full_name.clone();
        user.company_name = req.company_name.clone();
        user.phone = req.phone.clone();
        user.updated_at = Some(now());
        Ok(user.clone())
    }

    async fn update_password(&self, user_id: i32, password: &str) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        let user = state.user_mut(user_id)?;
        user.password = password.to_string();
        user.updated_at = Some(now());
        Ok(user.clone())
    }

    async fn update_blocked(&self, user_id: i32, is_blocked: bool) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        let user = state.user_mut(user_id)?;
        user.is_blocked = is_blocked;
        Ok(user.clone())
    }

    async fn update_verified(
        &self,
        user_id: i32,
        is_verified: bool,
    ) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        let user = state.user_mut(user_id)?;
        user.is_verified = is_verified;
        Ok(user.clone())
    }
}

#[async_trait]
impl RoleQueryRepositoryTrait for MemoryStore {
    async fn find_active(&self) -> Result<Vec<Role>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.roles.iter().filter(|r| r.is_active).cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.roles.iter().find(|r| r.role_id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Role>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.roles.iter().find(|r| r.role_code == code).cloned())
    }

    async fn find_primary_by_user(&self, user_id: i32) -> Result<Option<Role>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.primary_role_code(user_id).and_then(|code| {
            state
                .roles
                .iter()
                .find(|r| r.role_code == code && r.is_active)
                .cloned()
        }))
    }
}

#[async_trait]
impl RoleCommandRepositoryTrait for MemoryStore {
    async fn create_role(&self, req: &CreateRoleRequest) -> Result<Role, RepositoryError> {
        let mut state = self.state.lock().await;
        let code = req.code.trim().to_lowercase();
        if state.roles.iter().any(|r| r.role_code == code) {
            return Err(RepositoryError::AlreadyExists("roles_role_code_key".into()));
        }

        let role = Role {
            role_id: state.next_id(),
            role_name: req.name.trim().to_string(),
            role_code: code,
            description: req.description.clone(),
            is_active: true,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn update_role(&self, req: &UpdateRoleRequest) -> Result<Role, RepositoryError> {
        let mut state = self.state.lock().await;
        let role = state.role_mut(req.id)?;
        role.role_name = req.name.trim().to_string();
        role.description = req.description.clone();
        role.updated_at = Some(now());
        Ok(role.clone())
    }

    async fn deactivate_role(&self, id: i32) -> Result<Role, RepositoryError> {
        let mut state = self.state.lock().await;
        let role = state.role_mut(id)?;
        role.is_active = false;
        Ok(role.clone())
    }
}

#[async_trait]
impl UserRoleRepositoryTrait for MemoryStore {
    async fn assign_role(
        &self,
        user_id: i32,
        role_id: i32,
        is_primary: bool,
    ) -> Result<UserRole, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.users.iter().any(|u| u.user_id == user_id) {
            return Err(RepositoryError::ForeignKey("user_roles_user_id_fkey".into()));
        }
        Ok(state.grant(user_id, role_id, is_primary))
    }

    async fn remove_role(&self, user_id: i32, role_id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let before = state.user_roles.len();
        state
            .user_roles
            .retain(|ur| !(ur.user_id == user_id && ur.role_id == role_id));

        if state.user_roles.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ResetTokenQueryRepositoryTrait for MemoryStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<ResetToken>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.reset_tokens.iter().find(|t| t.token == token).cloned())
    }
}

#[async_trait]
impl ResetTokenCommandRepositoryTrait for MemoryStore {
    async fn create_reset_token(
        &self,
        request: &CreateResetTokenRequest,
    ) -> Result<ResetToken, RepositoryError> {
        let mut state = self.state.lock().await;
        let token = ResetToken {
            reset_token_id: state.next_id(),
            user_id: request.user_id,
            token: request.token.clone(),
            expires_at: request.expires_at,
            used: false,
            created_at: Some(now()),
        };
        state.reset_tokens.push(token.clone());
        Ok(token)
    }

    async fn mark_used(&self, reset_token_id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let token = state
            .reset_tokens
            .iter_mut()
            .find(|t| t.reset_token_id == reset_token_id)
            .ok_or(RepositoryError::NotFound)?;
        token.used = true;
        Ok(())
    }

    async fn delete_unused_by_user(&self, user_id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        state
            .reset_tokens
            .retain(|t| t.user_id != user_id || t.used);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepositoryTrait for MemoryStore {
    async fn find_active(&self) -> Result<Vec<Category>, RepositoryError> {
        let state = self.state.lock().await;
        let mut rows: Vec<Category> = state
            .categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .categories
            .iter()
            .find(|c| c.category_id == id && c.is_active)
            .cloned())
    }

    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<Category, RepositoryError> {
        let mut state = self.state.lock().await;
        let name = req.name.trim();
        if state.categories.iter().any(|c| c.name == name) {
            return Err(RepositoryError::AlreadyExists("categories_name_key".into()));
        }

        let category = Category {
            category_id: state.next_id(),
            name: name.to_string(),
            description: req.description.clone(),
            is_active: true,
            created_at: Some(now()),
        };
        state.categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryStore {
    async fn find_public(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.products_page(req, Some(ProductStatus::Approved.as_str()), None, false))
    }

    async fn find_by_seller(
        &self,
        seller_id: i32,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let state = self.state.lock().await;
        let status = req.status.map(|s| s.as_str());
        Ok(state.products_page(req, status, Some(seller_id), false))
    }

    async fn find_pending(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.products_page(req, Some(ProductStatus::Submitted.as_str()), None, true))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.product(id).await)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryStore {
    async fn create_product(&self, req: &NewProduct) -> Result<Product, RepositoryError> {
        let mut state = self.state.lock().await;
        let product = Product {
            product_id: state.next_id(),
            seller_id: req.seller_id,
            category_id: req.category_id,
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            currency: req.currency.clone(),
            moq: req.moq,
            quantity: req.quantity,
            status: ProductStatus::Submitted.as_str().to_string(),
            rejection_reason: None,
            is_verified: false,
            is_active: true,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i32, req: &NewProduct) -> Result<Product, RepositoryError> {
        let mut state = self.state.lock().await;
        let product = state.product_mut(id)?;
        product.category_id = req.category_id;
        product.name = req.name.clone();
        product.description = req.description.clone();
        product.price = req.price;
        product.currency = req.currency.clone();
        product.moq = req.moq;
        product.quantity = req.quantity;
        product.status = ProductStatus::Submitted.as_str().to_string();
        product.is_verified = false;
        product.rejection_reason = None;
        product.updated_at = Some(now());
        Ok(product.clone())
    }

    async fn review_product(
        &self,
        id: i32,
        status: ProductStatus,
        rejection_reason: Option<String>,
    ) -> Result<Product, RepositoryError> {
        let mut state = self.state.lock().await;
        let product = state.product_mut(id)?;
        product.status = status.as_str().to_string();
        product.is_verified = status == ProductStatus::Approved;
        product.rejection_reason = rejection_reason;
        product.updated_at = Some(now());
        Ok(product.clone())
    }

    async fn deactivate_product(&self, id: i32) -> Result<Product, RepositoryError> {
        let mut state = self.state.lock().await;
        let product = state.product_mut(id)?;
        product.is_active = false;
        product.updated_at = Some(now());
        Ok(product.clone())
    }
}

#[async_trait]
impl RfqQueryRepositoryTrait for MemoryStore {
    async fn find_all(
        &self,
        scope: RfqScope,
        req: &FindAllRfqs,
    ) -> Result<(Vec<RfqWithSeller>, i64), RepositoryError> {
        let state = self.state.lock().await;
        let mut rows: Vec<RfqWithSeller> = state
            .rfqs
            .iter()
            .filter_map(|rfq| state.with_seller(rfq))
            .filter(|q| scope.buyer_id().is_none_or(|id| q.rfq.buyer_id == id))
            .filter(|q| scope.seller_id().is_none_or(|id| q.seller_id == id))
            .filter(|q| req.status.is_none_or(|s| q.rfq.status == s.as_str()))
            .filter(|q| matches_search(&req.search, &[Some(q.rfq.title.as_str())]))
            .collect();
        rows.reverse();

        Ok(paginate(rows, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<RfqWithSeller>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .rfqs
            .iter()
            .find(|q| q.rfq_id == id)
            .and_then(|rfq| state.with_seller(rfq)))
    }
}

#[async_trait]
impl RfqCommandRepositoryTrait for MemoryStore {
    async fn create_rfq(&self, req: &NewRfq) -> Result<Rfq, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.products.iter().any(|p| p.product_id == req.product_id) {
            return Err(RepositoryError::ForeignKey("rfqs_product_id_fkey".into()));
        }

        let rfq = Rfq {
            rfq_id: state.next_id(),
            buyer_id: req.buyer_id,
            product_id: req.product_id,
            title: req.title.clone(),
            description: req.description.clone(),
            quantity: req.quantity,
            budget_min: req.budget_min,
            budget_max: req.budget_max,
            response_deadline: req.response_deadline,
            status: RfqStatus::Open.as_str().to_string(),
            response_message: None,
            quoted_price: None,
            doq_reference: None,
            created_at: Some(now()),
            updated_at: Some(now()),
        };
        state.rfqs.push(rfq.clone());
        Ok(rfq)
    }

    async fn update_rfq(
        &self,
        id: i32,
        req: &NewRfq,
        status: RfqStatus,
    ) -> Result<Rfq, RepositoryError> {
        let mut state = self.state.lock().await;
        let rfq = state.rfq_mut(id)?;
        rfq.title = req.title.clone();
        rfq.description = req.description.clone();
        rfq.quantity = req.quantity;
        rfq.budget_min = req.budget_min;
        rfq.budget_max = req.budget_max;
        rfq.response_deadline = req.response_deadline;
        rfq.status = status.as_str().to_string();
        rfq.updated_at = Some(now());
        Ok(rfq.clone())
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateRfqStatusRequest,
    ) -> Result<Rfq, RepositoryError> {
        let mut state = self.state.lock().await;
        let rfq = state.rfq_mut(id)?;
        rfq.status = req.status.as_str().to_string();
        if req.message.is_some() {
            rfq.response_message = req.message.clone();
        }
        if req.quoted_price.is_some() {
            rfq.quoted_price = req.quoted_price;
        }
        if req.doq_reference.is_some() {
            rfq.doq_reference = req.doq_reference.clone();
        }
        rfq.updated_at = Some(now());
        Ok(rfq.clone())
    }

    async fn delete_rfq(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let before = state.rfqs.len();
        state.rfqs.retain(|q| q.rfq_id != id);

        if state.rfqs.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationQueryRepositoryTrait for MemoryStore {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllNotifications,
    ) -> Result<(Vec<Notification>, i64), RepositoryError> {
        let state = self.state.lock().await;
        let mut rows: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && (!req.unread_only || !n.is_read))
            .cloned()
            .collect();
        rows.reverse();

        Ok(paginate(rows, req.page, req.page_size))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Notification>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .find(|n| n.notification_id == id)
            .cloned())
    }

    async fn count_unread(&self, user_id: i32) -> Result<i64, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }
}

#[async_trait]
impl NotificationCommandRepositoryTrait for MemoryStore {
    async fn create_notification(
        &self,
        req: &CreateNotificationRequest,
    ) -> Result<Notification, RepositoryError> {
        let mut state = self.state.lock().await;
        let notification = Notification {
            notification_id: state.next_id(),
            user_id: req.user_id,
            title: req.title.clone(),
            message: req.message.clone(),
            is_read: false,
            related_entity_type: req.related_entity_type.clone(),
            related_entity_id: req.related_entity_id,
            created_at: Some(now()),
        };
        state.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn mark_read(&self, id: i32) -> Result<Notification, RepositoryError> {
        let mut state = self.state.lock().await;
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.notification_id == id)
            .ok_or(RepositoryError::NotFound)?;
        notification.is_read = true;
        Ok(notification.clone())
    }

    async fn mark_all_read(&self, user_id: i32) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().await;
        let mut flipped = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn delete_notification(&self, id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.notification_id != id);

        if state.notifications.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl DashboardRepositoryTrait for MemoryStore {
    async fn rfq_status_counts(&self, scope: RfqScope) -> Result<Vec<StatusTally>, RepositoryError> {
        let state = self.state.lock().await;
        let rows: Vec<RfqWithSeller> = state
            .rfqs
            .iter()
            .filter_map(|rfq| state.with_seller(rfq))
            .filter(|q| scope.buyer_id().is_none_or(|id| q.rfq.buyer_id == id))
            .filter(|q| scope.seller_id().is_none_or(|id| q.seller_id == id))
            .collect();

        Ok(tally(rows.iter().map(|q| q.rfq.status.as_str())))
    }

    async fn product_status_counts(
        &self,
        seller_id: Option<i32>,
    ) -> Result<Vec<StatusTally>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(tally(
            state
                .products
                .iter()
                .filter(|p| p.is_active && seller_id.is_none_or(|id| p.seller_id == id))
                .map(|p| p.status.as_str()),
        ))
    }

    async fn user_role_counts(&self) -> Result<Vec<StatusTally>, RepositoryError> {
        let state = self.state.lock().await;
        let codes: Vec<String> = state
            .users
            .iter()
            .filter_map(|u| state.primary_role_code(u.user_id))
            .collect();

        Ok(tally(codes.iter().map(String::as_str)))
    }

    async fn count_blocked_users(&self) -> Result<i64, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().filter(|u| u.is_blocked).count() as i64)
    }

    async fn count_unverified_users(&self) -> Result<i64, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().filter(|u| !u.is_verified).count() as i64)
    }
}
