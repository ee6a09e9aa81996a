use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use munisipyo::{
    api,
    auth::AuthService,
    config::Settings,
    integrations::{webhook::WebhookIntegration, IntegrationManager},
    repository,
    service::{InvalidationBus, ListingService, ServiceContext},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "munisipyo=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting Munisipyo server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(db_pool.clone()));

    // Initialize repositories
    let post_repo = Arc::new(repository::SqlitePostRepository::new(db_pool.clone()));
    let user_repo = Arc::new(repository::SqliteUserRepository::new(db_pool.clone()));
    let verification_repo = Arc::new(repository::SqliteVerificationRepository::new(db_pool.clone()));
    let service_request_repo =
        Arc::new(repository::SqliteServiceRequestRepository::new(db_pool.clone()));

    // Initialize integration manager
    let integration_manager = Arc::new(IntegrationManager::new());

    if let Some(webhook) = WebhookIntegration::new(settings.integrations.webhook.clone()) {
        integration_manager.register(Arc::new(webhook)).await;
    }

    // Check integration health
    let health_results = integration_manager.health_check_all().await;
    for (name, result) in health_results {
        match result {
            Ok(_) => tracing::info!("Integration {} is healthy", name),
            Err(e) => tracing::warn!("Integration {} health check failed: {:?}", name, e),
        }
    }

    // Kind-scoped invalidation bus: admin mutations publish, listings re-fetch.
    let invalidations = Arc::new(InvalidationBus::new());

    // Warm the public listings and keep them fresh.
    let listing_service = Arc::new(ListingService::new(
        post_repo.clone(),
        Duration::from_secs(settings.listing.rotation_interval_secs),
    ));
    listing_service.refresh_all().await;
    listing_service.spawn_invalidation_listener(&invalidations);

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        post_repo,
        user_repo,
        verification_repo,
        service_request_repo,
        integration_manager,
        auth_service,
        invalidations,
        db_pool.clone(),
    ));

    let app_state = api::state::AppState::new(
        service_context,
        listing_service,
        Arc::new(settings.clone()),
    );
    let app = api::create_app(app_state);

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
