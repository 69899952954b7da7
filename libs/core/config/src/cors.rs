use crate::{env_or_default, ConfigError, FromEnv};

pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Single browser origin allowed to call the API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl FromEnv for CorsConfig {
    /// - FRONTEND_URL: defaults to http://localhost:5173
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origin = env_or_default("FRONTEND_URL", DEFAULT_FRONTEND_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();

        if allowed_origin.is_empty() {
            return Err(ConfigError::ParseError {
                key: "FRONTEND_URL".to_string(),
                details: "origin cannot be empty".to_string(),
            });
        }

        Ok(Self { allowed_origin })
    }
}
