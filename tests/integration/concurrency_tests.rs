//! Concurrent registrations through the HTTP stack
use crate::test_utils::{login, register, setup_test_app};
use axum::http::StatusCode;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registrations_same_email() {
    let app = setup_test_app().await;
    let attempts = 24;

    let handles: Vec<_> = (0..attempts)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                register(&app, &format!("Ada {i}"), "race@x.com", "secret1").await.0
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, attempts - 1);

    let (status, _) = login(&app, "race@x.com", "secret1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_registrations_distinct_emails() {
    let app = setup_test_app().await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                register(&app, "User", &format!("user{i}@x.com"), "secret1").await.0
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    for i in 0..16 {
        let (status, _) = login(&app, &format!("user{i}@x.com"), "secret1").await;
        assert_eq!(status, StatusCode::OK);
    }
}
