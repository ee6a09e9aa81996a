use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use munisipyo::{
    api,
    auth::AuthService,
    config::Settings,
    integrations::IntegrationManager,
    repository::{
        SqlitePostRepository, SqliteServiceRequestRepository, SqliteUserRepository,
        SqliteVerificationRepository,
    },
    service::{InvalidationBus, ListingService, ServiceContext},
};
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn test_app() -> anyhow::Result<axum::Router> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let post_repo = Arc::new(SqlitePostRepository::new(pool.clone()));

    let listing_service = Arc::new(ListingService::new(
        post_repo.clone(),
        Duration::from_secs(5),
    ));
    listing_service.refresh_all().await;

    let service_context = Arc::new(ServiceContext::new(
        post_repo,
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteVerificationRepository::new(pool.clone())),
        Arc::new(SqliteServiceRequestRepository::new(pool.clone())),
        Arc::new(IntegrationManager::new()),
        Arc::new(AuthService::new(pool.clone())),
        Arc::new(InvalidationBus::new()),
        pool,
    ));

    let state = api::state::AppState::new(
        service_context,
        listing_service,
        Arc::new(Settings::default()),
    );

    Ok(api::create_app(state))
}

#[tokio::test]
async fn test_health_endpoint() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_public_listing_responds_with_tiers() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(Request::builder().uri("/public/news").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;

    assert_eq!(body["kind"], "news");
    assert!(body["showcase"].is_array());
    assert_eq!(body["normal"]["page"], 1);
    assert_eq!(body["normal"]["total_pages"], 1);
    Ok(())
}

#[tokio::test]
async fn test_filters_do_not_leak_between_requests() -> anyhow::Result<()> {
    let app = test_app().await?;

    // One client narrows the window and pages ahead.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/public/news?window=last-24-hours&normal_page=2")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // The next client's bare request must see the defaults again.
    let response = app
        .oneshot(Request::builder().uri("/public/news").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;

    assert_eq!(body["window"], "all");
    assert_eq!(body["category"], "All");
    assert_eq!(body["normal"]["page"], 1);
    assert_eq!(body["low"]["page"], 1);
    Ok(())
}

#[tokio::test]
async fn test_unknown_window_is_rejected() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/public/events?window=fortnight")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_staff_routes_require_session() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(Request::builder().uri("/api/posts").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_barangay_lookup() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/public/barangays/poblacion")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/public/barangays/nowhere")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
