//! Configuration module

use std::env;

/// Fallback JWT secret for local development only
const DEFAULT_JWT_SECRET: &str = "subsiguard-dev-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server port
    pub port: u16,

    /// JWT secret key
    pub jwt_secret: String,

    /// JWT expiration in hours
    pub jwt_expiration_hours: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://subsiguard.db".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),

            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Refuse the built-in development secret outside development
    pub fn check_production_secrets(&self) -> Result<(), String> {
        if self.is_production() && self.jwt_secret == DEFAULT_JWT_SECRET {
            return Err("JWT_SECRET must be set explicitly in production".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str, jwt_secret: &str) -> Config {
        Config {
            database_url: "sqlite://subsiguard.db".to_string(),
            port: 8000,
            jwt_secret: jwt_secret.to_string(),
            jwt_expiration_hours: 24,
            environment: environment.to_string(),
        }
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        let cfg = config("production", DEFAULT_JWT_SECRET);
        assert!(cfg.is_production());
        assert!(cfg.check_production_secrets().is_err());
    }

    #[test]
    fn test_default_secret_allowed_in_development() {
        let cfg = config("development", DEFAULT_JWT_SECRET);
        assert!(!cfg.is_production());
        assert!(cfg.check_production_secrets().is_ok());
    }

    #[test]
    fn test_explicit_secret_allowed_in_production() {
        let cfg = config("production", "a-real-secret");
        assert!(cfg.check_production_secrets().is_ok());
    }
}
