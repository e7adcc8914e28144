mod identity;
mod login;
mod password_reset;
mod register;

use self::identity::IdentityService;
use self::login::LoginService;
use self::password_reset::PasswordResetService;
use self::register::RegisterService;
use crate::{
    abstract_trait::{
        DynEmailService, DynHashing, DynIdentityService, DynJwtService, DynLoginService,
        DynPasswordResetService, DynRegisterService, DynResetTokenCommandRepository,
        DynResetTokenQueryRepository, DynRoleQueryRepository, DynUserCommandRepository,
        DynUserQueryRepository,
    },
    service::auth::{
        identity::IdentityServiceDeps, login::LoginServiceDeps,
        password_reset::PasswordResetServiceDeps, register::RegisterServiceDeps,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AuthService {
    pub register: DynRegisterService,
    pub login: DynLoginService,
    pub identity: DynIdentityService,
    pub password_reset: DynPasswordResetService,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub mailer: DynEmailService,
    pub frontend_url: String,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub role_query: DynRoleQueryRepository,
    pub reset_query: DynResetTokenQueryRepository,
    pub reset_command: DynResetTokenCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let register_deps = RegisterServiceDeps {
            hash: deps.hash.clone(),
            user_query: deps.user_query.clone(),
            user_command: deps.user_command.clone(),
            role_query: deps.role_query.clone(),
            registry: deps.registry.clone(),
        };

        let register = Arc::new(RegisterService::new(register_deps).await) as DynRegisterService;

        let login_deps = LoginServiceDeps {
            hash: deps.hash.clone(),
            jwt: deps.jwt.clone(),
            user_query: deps.user_query.clone(),
            role_query: deps.role_query.clone(),
            registry: deps.registry.clone(),
        };

        let login = Arc::new(LoginService::new(login_deps).await) as DynLoginService;

        let identity_deps = IdentityServiceDeps {
            hash: deps.hash.clone(),
            user_query: deps.user_query.clone(),
            user_command: deps.user_command.clone(),
            role_query: deps.role_query.clone(),
            registry: deps.registry.clone(),
        };

        let identity = Arc::new(IdentityService::new(identity_deps).await) as DynIdentityService;

        let password_deps = PasswordResetServiceDeps {
            hash: deps.hash,
            mailer: deps.mailer,
            frontend_url: deps.frontend_url,
            user_query: deps.user_query,
            user_command: deps.user_command,
            reset_query: deps.reset_query,
            reset_command: deps.reset_command,
            registry: deps.registry,
        };

        let password_reset =
            Arc::new(PasswordResetService::new(password_deps).await) as DynPasswordResetService;

        Self {
            register,
            login,
            identity,
            password_reset,
        }
    }
}

#[cfg(test)]
mod tests;
