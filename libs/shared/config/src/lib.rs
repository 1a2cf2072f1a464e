use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub platform_api_url: String,
    pub platform_api_key: String,
    pub session_jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            platform_api_url: env::var("PLATFORM_API_URL")
                .unwrap_or_else(|_| {
                    warn!("PLATFORM_API_URL not set, using empty value");
                    String::new()
                }),
            platform_api_key: env::var("PLATFORM_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("PLATFORM_API_KEY not set, using empty value");
                    String::new()
                }),
            session_jwt_secret: env::var("SESSION_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SESSION_JWT_SECRET not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.platform_api_url.is_empty()
            && !self.platform_api_key.is_empty()
            && !self.session_jwt_secret.is_empty()
    }
}
