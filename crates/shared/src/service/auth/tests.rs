use crate::{
    abstract_trait::UserCommandRepositoryTrait,
    domain::{
        Actor, RoleCode,
        requests::{
            ChangePasswordRequest, CreateResetPasswordRequest, CreateUserRequest,
            ForgotPasswordRequest, LoginRequest, RegisterRequest,
        },
    },
    errors::{RepositoryError, ServiceError},
    testing::{self, MemoryStore, RecordingMailer, TEST_FRONTEND_URL, TEST_PASSWORD},
};
use chrono::{Duration, Utc};

fn register_request(username: &str, role: RoleCode) -> RegisterRequest {
    RegisterRequest {
        email: format!("{username}@Harbour.Example"),
        username: username.to_string(),
        password: "Quay-side-42".into(),
        confirm_password: "Quay-side-42".into(),
        full_name: "Youssef Amrani".into(),
        company_name: Some("Atlas Chandlers".into()),
        phone: None,
        role,
    }
}

fn login_request(identifier: &str, password: &str) -> LoginRequest {
    LoginRequest {
        identifier: identifier.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn register_assigns_primary_role_and_vendor_code() {
    let store = MemoryStore::new();
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let response = di
        .auth_service
        .register
        .register(&register_request("youssef", RoleCode::Seller), Some("10.0.0.7".into()))
        .await
        .unwrap();

    let profile = response.data;
    assert_eq!(profile.role, Some(RoleCode::Seller));
    assert_eq!(profile.user.email, "youssef@harbour.example");
    assert!(profile.user.vendor_code.starts_with("SELL-"));
    assert!(!profile.user.is_verified);
    assert_eq!(
        store.primary_role(profile.user.id).await.as_deref(),
        Some("seller")
    );
}

#[tokio::test]
async fn register_refuses_staff_roles_and_duplicates() {
    let store = MemoryStore::new();
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let register = &di.auth_service.register;

    let staff = register
        .register(&register_request("sneaky", RoleCode::Admin), None)
        .await;
    assert!(matches!(staff, Err(ServiceError::Validation(_))));

    register
        .register(&register_request("youssef", RoleCode::Buyer), None)
        .await
        .unwrap();

    let same_email = register
        .register(&register_request("youssef", RoleCode::Buyer), None)
        .await;
    assert!(matches!(same_email, Err(ServiceError::Conflict(_))));

    let mut other_email = register_request("youssef", RoleCode::Buyer);
    other_email.email = "another@harbour.example".into();
    let same_username = register.register(&other_email, None).await;
    assert!(matches!(same_username, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn failed_role_grant_leaves_no_account_behind() {
    let store = MemoryStore::new();
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let orphan = CreateUserRequest {
        email: "rania@harbour.example".into(),
        username: "rania".into(),
        password: "hashed".into(),
        full_name: "Rania Tazi".into(),
        company_name: None,
        phone: None,
        vendor_code: "BUY-25-RANIA1".into(),
        ip_address: None,
        is_verified: false,
    };
    let failed = store.repositories().user_command.create_user(&orphan, 9_999).await;
    assert!(matches!(failed, Err(RepositoryError::ForeignKey(_))));

    let retried = di
        .auth_service
        .register
        .register(&register_request("rania", RoleCode::Buyer), None)
        .await
        .unwrap();
    assert_eq!(
        store.primary_role(retried.data.user.id).await.as_deref(),
        Some("buyer")
    );
}

#[tokio::test]
async fn login_accepts_email_or_username() {
    let store = MemoryStore::new();
    let user = store.seed_user("amina", RoleCode::Buyer).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let by_username = di
        .auth_service
        .login
        .login(&login_request("amina", TEST_PASSWORD))
        .await
        .unwrap();
    assert_eq!(by_username.data.token_type, "Bearer");
    assert_eq!(by_username.data.user.role, Some(RoleCode::Buyer));

    let claims = testing::jwt()
        .verify_token(&by_username.data.access_token)
        .unwrap();
    assert_eq!(claims.user_id, user.user_id);
    assert_eq!(claims.role, RoleCode::Buyer);

    let by_email = di
        .auth_service
        .login
        .login(&login_request("AMINA@marsa.test", TEST_PASSWORD))
        .await;
    assert!(by_email.is_ok());
}

#[tokio::test]
async fn email_login_is_not_shadowed_by_an_email_shaped_username() {
    let store = MemoryStore::new();
    // Row left over from before usernames were restricted.
    let squatter = store
        .seed_user("victim@harbour.example", RoleCode::Buyer)
        .await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;
    let auth = &di.auth_service;

    let lookalike = auth
        .register
        .register(&register_request("copycat@harbour.example", RoleCode::Buyer), None)
        .await;
    assert!(matches!(lookalike, Err(ServiceError::Validation(_))));

    let owner = auth
        .register
        .register(&register_request("victim", RoleCode::Seller), None)
        .await
        .unwrap()
        .data;
    assert_eq!(owner.user.email, "victim@harbour.example");

    let by_email = auth
        .login
        .login(&login_request("victim@harbour.example", "Quay-side-42"))
        .await
        .unwrap();
    assert_eq!(by_email.data.user.user.id, owner.user.id);
    assert_ne!(by_email.data.user.user.id, squatter.user_id);

    let by_username = auth
        .login
        .login(&login_request("victim", "Quay-side-42"))
        .await
        .unwrap();
    assert_eq!(by_username.data.user.user.id, owner.user.id);
}

#[tokio::test]
async fn login_rejects_bad_password_and_blocked_accounts() {
    let store = MemoryStore::new();
    let admin = store.seed_user("root", RoleCode::Admin).await;
    let user = store.seed_user("karim", RoleCode::Seller).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let wrong = di
        .auth_service
        .login
        .login(&login_request("karim", "not-the-password"))
        .await;
    assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));

    let unknown = di
        .auth_service
        .login
        .login(&login_request("nobody", TEST_PASSWORD))
        .await;
    assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)));

    di.user_service
        .command
        .block_user(&Actor::new(admin.user_id, RoleCode::Admin), user.user_id)
        .await
        .unwrap();

    let blocked = di
        .auth_service
        .login
        .login(&login_request("karim", TEST_PASSWORD))
        .await;
    assert!(matches!(blocked, Err(ServiceError::Blocked)));
}

#[tokio::test]
async fn change_password_checks_current_password() {
    let store = MemoryStore::new();
    let user = store.seed_user("leila", RoleCode::Buyer).await;
    let actor = Actor::new(user.user_id, RoleCode::Buyer);
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    let wrong = di
        .auth_service
        .identity
        .change_password(
            &actor,
            &ChangePasswordRequest {
                current_password: "guess".into(),
                new_password: "Anchor-Point-9".into(),
                confirm_password: "Anchor-Point-9".into(),
            },
        )
        .await;
    assert!(matches!(wrong, Err(ServiceError::Validation(_))));

    di.auth_service
        .identity
        .change_password(
            &actor,
            &ChangePasswordRequest {
                current_password: TEST_PASSWORD.into(),
                new_password: "Anchor-Point-9".into(),
                confirm_password: "Anchor-Point-9".into(),
            },
        )
        .await
        .unwrap();

    assert!(
        di.auth_service
            .login
            .login(&login_request("leila", "Anchor-Point-9"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn password_reset_round_trip() {
    let store = MemoryStore::new();
    let mailer = RecordingMailer::new();
    let user = store.seed_user("omar", RoleCode::Seller).await;
    let di = testing::dependencies(&store, &mailer).await;
    let reset = &di.auth_service.password_reset;

    reset
        .forgot_password(&ForgotPasswordRequest {
            email: "omar@marsa.test".into(),
        })
        .await
        .unwrap();

    let tokens = store.reset_tokens_for(user.user_id).await;
    assert_eq!(tokens.len(), 1);
    let token = tokens[0].token.clone();

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(
        sent[0]
            .body
            .contains(&format!("{TEST_FRONTEND_URL}/reset-password?token={token}"))
    );

    let request = CreateResetPasswordRequest {
        token: token.clone(),
        password: "Fresh-Tide-77".into(),
        confirm_password: "Fresh-Tide-77".into(),
    };
    reset.reset_password(&request).await.unwrap();

    let reused = reset.reset_password(&request).await;
    assert!(matches!(reused, Err(ServiceError::Validation(_))));

    assert!(
        di.auth_service
            .login
            .login(&login_request("omar", "Fresh-Tide-77"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn forgot_password_is_silent_for_unknown_email() {
    let store = MemoryStore::new();
    let mailer = RecordingMailer::new();
    let di = testing::dependencies(&store, &mailer).await;

    let response = di
        .auth_service
        .password_reset
        .forgot_password(&ForgotPasswordRequest {
            email: "ghost@nowhere.test".into(),
        })
        .await
        .unwrap();

    assert!(response.success);
    assert!(mailer.sent().await.is_empty());
}

#[tokio::test]
async fn expired_reset_token_is_refused() {
    let store = MemoryStore::new();
    let user = store.seed_user("sara", RoleCode::Buyer).await;
    let di = testing::dependencies(&store, &RecordingMailer::new()).await;

    di.auth_service
        .password_reset
        .forgot_password(&ForgotPasswordRequest {
            email: "sara@marsa.test".into(),
        })
        .await
        .unwrap();

    let token = store.reset_tokens_for(user.user_id).await[0].token.clone();
    store
        .set_token_expiry(&token, (Utc::now() - Duration::minutes(5)).naive_utc())
        .await;

    let expired = di
        .auth_service
        .password_reset
        .reset_password(&CreateResetPasswordRequest {
            token,
            password: "Fresh-Tide-77".into(),
            confirm_password: "Fresh-Tide-77".into(),
        })
        .await;
    assert!(matches!(expired, Err(ServiceError::TokenExpired)));
}
