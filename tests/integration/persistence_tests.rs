//! Flat-file user storage across restarts
use crate::test_utils::{login, me, register, test_settings};
use axum::http::StatusCode;
use backend_lib::{router::create_router, storage::USERS_LOG, AppState};
use tempfile::TempDir;

#[tokio::test]
async fn test_users_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let mut settings = test_settings();
    settings.data_dir = Some(temp_dir.path().to_path_buf());

    {
        let app = create_router(AppState::from_settings(&settings).await.unwrap());
        let (status, _) = register(&app, "Ada", "ada@x.com", "secret1").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let log = std::fs::read_to_string(temp_dir.path().join(USERS_LOG)).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(!log.contains("secret1"));

    let app = create_router(AppState::from_settings(&settings).await.unwrap());
    let (status, _) = register(&app, "Ada again", "ada@x.com", "secret2").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = login(&app, "ada@x.com", "secret1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, profile) = me(&app, body["token"].as_str()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Ada");
}

#[tokio::test]
async fn test_corrupted_store_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(USERS_LOG), "{not json\n").unwrap();

    let mut settings = test_settings();
    settings.data_dir = Some(temp_dir.path().to_path_buf());

    assert!(AppState::from_settings(&settings).await.is_err());
}
