use std::sync::Arc;

use crate::{config::Settings, service::{ListingService, ServiceContext}};

#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub listing_service: Arc<ListingService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        listing_service: Arc<ListingService>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            service_context,
            listing_service,
            settings,
        }
    }
}
