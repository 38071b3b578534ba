//! Configuration management for the gateway console

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Redis configuration
    pub redis: RedisConfig,
    /// Console admin account
    pub admin: AdminConfig,
    /// Login session configuration
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Local admin account the console login checks against
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a login marker stays valid in the cache
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: 1800 }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            },
            admin: AdminConfig {
                user: env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string()),
                password: env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD is required")?,
            },
            session: SessionConfig {
                ttl_secs: env::var("SESSION_TTL_SECS")
                    .unwrap_or_else(|_| "1800".to_string())
                    .parse()
                    .unwrap_or(1800),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            http_host: "127.0.0.1".to_string(),
            http_port: 8080,
            database: DatabaseConfig {
                url: "mysql://localhost/gateway".to_string(),
                max_connections: 10,
                min_connections: 2,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
            },
            admin: AdminConfig {
                user: "admin".to_string(),
                password: "secret".to_string(),
            },
            session: SessionConfig::default(),
        }
    }

    #[test]
    fn test_config_http_addr() {
        let config = test_config();
        assert_eq!(config.http_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_http_addr_custom_port() {
        let mut config = test_config();
        config.http_host = "0.0.0.0".to_string();
        config.http_port = 3000;
        assert_eq!(config.http_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_session_config_default_ttl() {
        let session = SessionConfig::default();
        assert_eq!(session.ttl_secs, 1800);
    }

    #[test]
    fn test_from_env_defaults_and_required_vars() {
        // Env vars are process-global, so every from_env scenario lives in
        // this one test instead of racing across parallel tests.
        for var in [
            "HTTP_HOST",
            "HTTP_PORT",
            "DATABASE_URL",
            "DATABASE_MAX_CONNECTIONS",
            "DATABASE_MIN_CONNECTIONS",
            "REDIS_URL",
            "ADMIN_USER",
            "ADMIN_PASSWORD",
            "SESSION_TTL_SECS",
        ] {
            env::remove_var(var);
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        env::set_var("DATABASE_URL", "mysql://localhost/gateway");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("ADMIN_PASSWORD"));

        env::set_var("ADMIN_PASSWORD", "secret");
        let config = Config::from_env().unwrap();
        assert_eq!(config.http_host, "0.0.0.0");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database.url, "mysql://localhost/gateway");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert_eq!(config.admin.user, "admin");
        assert_eq!(config.session.ttl_secs, 1800);

        env::set_var("HTTP_HOST", "127.0.0.1");
        env::set_var("HTTP_PORT", "9090");
        env::set_var("ADMIN_USER", "ops");
        env::set_var("SESSION_TTL_SECS", "60");
        let config = Config::from_env().unwrap();
        assert_eq!(config.http_host, "127.0.0.1");
        assert_eq!(config.http_port, 9090);
        assert_eq!(config.admin.user, "ops");
        assert_eq!(config.session.ttl_secs, 60);

        env::set_var("HTTP_PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("HTTP_PORT"));

        for var in [
            "HTTP_HOST",
            "HTTP_PORT",
            "DATABASE_URL",
            "ADMIN_USER",
            "ADMIN_PASSWORD",
            "SESSION_TTL_SECS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_clone() {
        let config1 = test_config();
        let config2 = config1.clone();

        assert_eq!(config1.http_host, config2.http_host);
        assert_eq!(config1.database.url, config2.database.url);
        assert_eq!(config1.admin.user, config2.admin.user);
    }

    #[test]
    fn test_config_debug_contains_sections() {
        let config = test_config();
        let debug_str = format!("{:?}", config);

        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("DatabaseConfig"));
        assert!(debug_str.contains("RedisConfig"));
    }
}
