pub mod listing_service;
pub mod seed;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::integrations::IntegrationManager;
use crate::repository::*;

pub use listing_service::{InvalidationBus, ListingService};

pub struct ServiceContext {
    pub post_repo: Arc<dyn PostRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub verification_repo: Arc<dyn VerificationRepository>,
    pub service_request_repo: Arc<dyn ServiceRequestRepository>,
    pub integration_manager: Arc<IntegrationManager>,
    pub auth_service: Arc<AuthService>,
    pub invalidations: Arc<InvalidationBus>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        user_repo: Arc<dyn UserRepository>,
        verification_repo: Arc<dyn VerificationRepository>,
        service_request_repo: Arc<dyn ServiceRequestRepository>,
        integration_manager: Arc<IntegrationManager>,
        auth_service: Arc<AuthService>,
        invalidations: Arc<InvalidationBus>,
        db_pool: SqlitePool,
    ) -> Self {
        Self {
            post_repo,
            user_repo,
            verification_repo,
            service_request_repo,
            integration_manager,
            auth_service,
            invalidations,
            db_pool,
        }
    }
}
