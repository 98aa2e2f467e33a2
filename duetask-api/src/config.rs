/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `SESSION_TTL_HOURS`: Session lifetime in hours (default: 168)
/// - `SMS_API_URL`: SMS gateway endpoint (required)
/// - `SMS_API_TOKEN`: SMS gateway bearer token (required)
/// - `SMS_FROM_NUMBER`: Sender number shown to recipients (required)
/// - `SMS_COUNTRY_PREFIX`: Prefix prepended to stored mobiles (default: +61)
/// - `REMINDER_HOUR`: Local hour of the daily reminder run (default: 23)
/// - `REMINDER_MINUTE`: Local minute of the daily reminder run (default: 0)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use duetask_api::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session configuration
    pub session: SessionConfig,

    /// SMS gateway configuration
    pub sms: SmsConfig,

    /// Reminder schedule configuration
    pub reminder: ReminderConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Hours a session cookie stays valid after login
    pub ttl_hours: i64,
}

/// SMS gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Gateway endpoint URL
    pub api_url: String,

    /// Gateway bearer token
    ///
    /// IMPORTANT: Keep this out of logs and version control.
    pub api_token: String,

    /// Sender number shown to recipients
    pub from_number: String,

    /// Dialing prefix prepended to every stored mobile number
    pub country_prefix: String,
}

/// Reminder schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Local hour of day at which the daily run fires (0-23)
    pub hour: u32,

    /// Local minute of the hour at which the daily run fires (0-59)
    pub minute: u32,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    ///
    /// # Example
    ///
    /// ```no_run
    /// use duetask_api::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_env()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "168".to_string())
            .parse::<i64>()?;

        if ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }

        let sms_api_url = env::var("SMS_API_URL")
            .map_err(|_| anyhow::anyhow!("SMS_API_URL environment variable is required"))?;

        let sms_api_token = env::var("SMS_API_TOKEN")
            .map_err(|_| anyhow::anyhow!("SMS_API_TOKEN environment variable is required"))?;

        let sms_from_number = env::var("SMS_FROM_NUMBER")
            .map_err(|_| anyhow::anyhow!("SMS_FROM_NUMBER environment variable is required"))?;

        let country_prefix = env::var("SMS_COUNTRY_PREFIX").unwrap_or_else(|_| "+61".to_string());

        let reminder_hour = env::var("REMINDER_HOUR")
            .unwrap_or_else(|_| "23".to_string())
            .parse::<u32>()?;

        let reminder_minute = env::var("REMINDER_MINUTE")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u32>()?;

        if reminder_hour > 23 {
            anyhow::bail!("REMINDER_HOUR must be between 0 and 23");
        }
        if reminder_minute > 59 {
            anyhow::bail!("REMINDER_MINUTE must be between 0 and 59");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig { ttl_hours },
            sms: SmsConfig {
                api_url: sms_api_url,
                api_token: sms_api_token,
                from_number: sms_from_number,
                country_prefix,
            },
            reminder: ReminderConfig {
                hour: reminder_hour,
                minute: reminder_minute,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            session: SessionConfig { ttl_hours: 168 },
            sms: SmsConfig {
                api_url: "https://sms.example.com/v1/messages".to_string(),
                api_token: "test-token".to_string(),
                from_number: "+61400000000".to_string(),
                country_prefix: "+61".to_string(),
            },
            reminder: ReminderConfig {
                hour: 23,
                minute: 0,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        let config = sample_config();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
