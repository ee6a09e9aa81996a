use async_trait::async_trait;
use serde_json::json;

use crate::{
    config::WebhookConfig,
    error::{AppError, Result},
    integrations::{BaseIntegration, Integration, PortalEvent},
};

/// Posts a JSON summary of portal events to a configured HTTP endpoint, used
/// by the municipality to mirror publications into its SMS/notification
/// pipeline. Delivery failures are logged by the manager and never block the
/// originating request.
pub struct WebhookIntegration {
    base: BaseIntegration,
    config: WebhookConfig,
    client: reqwest::Client,
}

impl WebhookIntegration {
    pub fn new(config: Option<WebhookConfig>) -> Option<Self> {
        config.and_then(|cfg| {
            if cfg.enabled {
                Some(Self {
                    base: BaseIntegration::new("Webhook", cfg.enabled),
                    config: cfg,
                    client: reqwest::Client::new(),
                })
            } else {
                None
            }
        })
    }

    async fn deliver(&self, payload: serde_json::Value) -> Result<()> {
        let mut request = self.client.post(&self.config.url).json(&payload);

        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Integration(format!("Webhook delivery failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Integration(format!(
                "Webhook endpoint returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Integration for WebhookIntegration {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn is_enabled(&self) -> bool {
        self.base.enabled
    }

    async fn health_check(&self) -> Result<()> {
        if self.config.url.is_empty() {
            return Err(AppError::Integration(
                "Webhook URL not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn handle_event(&self, event: &PortalEvent) -> Result<()> {
        let payload = match event {
            PortalEvent::PostPublished(post) => json!({
                "event": "post.published",
                "kind": post.kind.as_str(),
                "id": post.id,
                "title": post.title,
                "priority": post.priority.as_str(),
            }),
            PortalEvent::PostUnpublished(post) => json!({
                "event": "post.unpublished",
                "kind": post.kind.as_str(),
                "id": post.id,
                "title": post.title,
            }),
            PortalEvent::ServiceRequestSubmitted(request) => json!({
                "event": "service_request.submitted",
                "id": request.id,
                "service_type": request.service_type.as_str(),
                "barangay": request.barangay,
            }),
            PortalEvent::VerificationReviewed(request) => json!({
                "event": "verification.reviewed",
                "id": request.id,
                "status": request.status.as_str(),
            }),
        };

        self.deliver(payload).await
    }
}
