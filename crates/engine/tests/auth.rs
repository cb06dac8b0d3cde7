use sea_orm::Database;

use engine::{Engine, EngineError, RegisterCmd};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn register_cmd() -> RegisterCmd {
    RegisterCmd {
        email: "farmer@example.com".to_string(),
        password: "secret123".to_string(),
        full_name: "Trần Thị B".to_string(),
        phone: None,
        role: None,
    }
}

#[tokio::test]
async fn register_then_login_rotates_token() {
    let engine = engine_with_db().await;

    let user = engine.register_user(register_cmd()).await.unwrap();
    assert_eq!(user.role, "user");
    assert!(!user.token.is_empty());

    let logged_in = engine
        .login("farmer@example.com", "secret123")
        .await
        .unwrap();
    assert_ne!(logged_in.token, user.token);

    // Only the fresh token resolves.
    let err = engine.user_by_token(&user.token).await.unwrap_err();
    assert_eq!(err, EngineError::InvalidCredentials);
    let resolved = engine.user_by_token(&logged_in.token).await.unwrap();
    assert_eq!(resolved.email, "farmer@example.com");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let engine = engine_with_db().await;

    engine.register_user(register_cmd()).await.unwrap();
    let mut cmd = register_cmd();
    cmd.email = "FARMER@example.com".to_string();
    let err = engine.register_user(cmd).await.unwrap_err();
    assert!(matches!(err, EngineError::DuplicateName(_)));
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let engine = engine_with_db().await;
    engine.register_user(register_cmd()).await.unwrap();

    let err = engine
        .login("farmer@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidCredentials);

    let err = engine
        .login("stranger@example.com", "secret123")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidCredentials);
}

#[tokio::test]
async fn weak_passwords_and_bad_emails_are_rejected() {
    let engine = engine_with_db().await;

    let mut cmd = register_cmd();
    cmd.password = "short".to_string();
    let err = engine.register_user(cmd).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidOperation(_)));

    let mut cmd = register_cmd();
    cmd.email = "not-an-email".to_string();
    let err = engine.register_user(cmd).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn only_known_roles_are_accepted() {
    let engine = engine_with_db().await;

    let mut cmd = register_cmd();
    cmd.role = Some("superuser".to_string());
    let err = engine.register_user(cmd).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidType(_)));

    let mut cmd = register_cmd();
    cmd.role = Some("admin".to_string());
    let user = engine.register_user(cmd).await.unwrap();
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn profile_updates_are_persisted() {
    let engine = engine_with_db().await;
    let user = engine.register_user(register_cmd()).await.unwrap();

    let updated = engine
        .update_profile(&user.email, Some("Trần Thị C"), Some("0905555555"))
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Trần Thị C");

    let resolved = engine.user_by_token(&user.token).await.unwrap();
    assert_eq!(resolved.full_name, "Trần Thị C");
    assert_eq!(resolved.phone, "0905555555");
}
