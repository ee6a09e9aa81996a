pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

pub fn create_app(app_state: AppState) -> Router {
    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Auth routes
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/me",
            get(handlers::auth::me).route_layer(axum::middleware::from_fn_with_state(
                app_state.clone(),
                middleware::auth::require_auth,
            )),
        )

        // Staff/admin API routes
        .nest("/api", api_routes(app_state.clone()))

        // Public routes (consumed by the portal frontend)
        .nest("/public", public_routes())

        // Admin routes
        .nest("/admin", admin_routes(app_state.clone()))

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/posts", post_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/service-requests", service_request_routes(state.clone()))
        .nest("/verifications", verification_routes(state))
}

fn post_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::posts::list))
        .route("/", post(handlers::posts::create))
        .route("/:id", get(handlers::posts::get))
        .route("/:id", put(handlers::posts::update))
        .route("/:id", delete(handlers::posts::delete))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_staff,
        ))
}

fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::users::list))
        .route("/", post(handlers::users::create))
        .route("/:id", get(handlers::users::get))
        .route("/:id", put(handlers::users::update))
        .route("/:id", delete(handlers::users::delete))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_admin,
        ))
}

fn service_request_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::service_requests::list))
        .route("/:id", get(handlers::service_requests::get))
        .route("/:id/status", put(handlers::service_requests::update_status))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_staff,
        ))
}

fn verification_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::verifications::list))
        .route("/:id", get(handlers::verifications::get))
        .route("/:id/review", post(handlers::verifications::review))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_staff,
        ))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(handlers::public::list_news))
        .route("/announcements", get(handlers::public::list_announcements))
        .route("/events", get(handlers::public::list_events))
        .route("/barangays", get(handlers::barangays::list))
        .route("/barangays/:slug", get(handlers::barangays::get))
        .route("/service-requests", post(handlers::public::submit_service_request))
        .route("/verification", post(handlers::public::submit_verification))
        .route("/feed/rss", get(handlers::public::rss_feed))
        .route("/feed/calendar", get(handlers::public::calendar_feed))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::admin::stats))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_admin,
        ))
}
