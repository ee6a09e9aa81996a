use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub listing: ListingConfigSection,
    #[serde(default)]
    pub integrations: IntegrationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_duration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfigSection {
    /// Seconds between showcase rotation steps.
    pub rotation_interval_secs: u64,
}

impl Default for ListingConfigSection {
    fn default() -> Self {
        Self {
            rotation_interval_secs: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IntegrationConfig {
    pub webhook: Option<WebhookConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            .set_default("auth.session_duration_hours", 24)?
            .set_default("listing.rotation_interval_secs", 5)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with MUNISIPYO__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("MUNISIPYO").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://munisipyo.db".to_string(),
                max_connections: 10,
            },
            auth: AuthConfig {
                session_duration_hours: 24,
            },
            listing: ListingConfigSection::default(),
            integrations: IntegrationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sessions are random server-side tokens; auth needs no signing secret,
    // only a lifetime.
    #[test]
    fn test_auth_config_is_duration_only() {
        let settings = Settings::default();
        assert_eq!(settings.auth.session_duration_hours, 24);

        let parsed: AuthConfig =
            serde_json::from_str(r#"{ "session_duration_hours": 12 }"#).unwrap();
        assert_eq!(parsed.session_duration_hours, 12);
    }
}
