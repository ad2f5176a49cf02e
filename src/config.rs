use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to a value that does not parse.
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
    /// A required setting is missing or out of range.
    #[error("{0}")]
    Validation(&'static str),
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQL dialect; informational, only Postgres is wired up.
    pub dialect: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub host: String,
    pub port: i32,
    pub ssl_mode: String,
    pub schema: String,
    pub conn_max_lifetime: Duration,
    pub max_open_conns: u32,
    pub max_idle_conns: u32,
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port < 0 {
            return Err(ConfigError::Validation("Invalid database port (DB_PORT)"));
        }
        if self.user.is_empty() {
            return Err(ConfigError::Validation("Invalid database user (DB_USER)"));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Validation("Invalid database password (DB_PASSWORD)"));
        }
        if self.name.is_empty() {
            return Err(ConfigError::Validation("Invalid database name (DB_NAME)"));
        }
        if self.host.is_empty() {
            return Err(ConfigError::Validation("Invalid database host (DB_HOST)"));
        }
        if self.ssl_mode.is_empty() {
            return Err(ConfigError::Validation("Invalid database SSL mode (DB_SSL_MODE)"));
        }
        if self.schema.is_empty() {
            return Err(ConfigError::Validation("Invalid database schema (DB_SCHEMA)"));
        }
        Ok(())
    }
}

/// Transport-level settings. Only validated today; the bot itself talks to
/// Telegram over long polling and binds no listener.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub address: String,
    pub port: i32,
}

impl TransportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port < 0 {
            return Err(ConfigError::Validation("Invalid transport port (TRANSPORT_PORT)"));
        }
        Ok(())
    }
}

/// Telegram bot settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub token: String,
}

impl TelegramConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_empty() {
            return Err(ConfigError::Validation("Invalid telegram token (TELEGRAM_TOKEN)"));
        }
        Ok(())
    }
}

/// Logging settings; see [`crate::logging::init`] for how they are applied.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level: trace, debug, info, warn or error.
    pub level: String,
    /// "stdout", "stderr" or a file path.
    pub output: String,
    /// "json" or "text".
    pub formatter: String,
}

/// Service configuration, loaded once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: TransportConfig,
    pub logger: LoggerConfig,
    pub telegram: TelegramConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from environment variables, applying defaults for
    /// anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Tests use this with a map instead
    /// of mutating the process environment.
    fn load_from(vars: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = DatabaseConfig {
            dialect: string_or(vars, "DB_DIALECT", "postgres"),
            user: string_or(vars, "DB_USER", ""),
            password: string_or(vars, "DB_PASSWORD", ""),
            name: string_or(vars, "DB_NAME", ""),
            host: string_or(vars, "DB_HOST", ""),
            port: parse_or(vars, "DB_PORT", 5432)?,
            ssl_mode: string_or(vars, "DB_SSL_MODE", ""),
            schema: string_or(vars, "DB_SCHEMA", ""),
            conn_max_lifetime: duration_or(
                vars,
                "DB_CONN_MAX_LIFETIME",
                Duration::from_secs(10 * 60),
            )?,
            max_open_conns: parse_or(vars, "DB_MAX_OPEN_CONNS", 25)?,
            max_idle_conns: parse_or(vars, "DB_MAX_IDLE_CONNS", 25)?,
        };

        let transport = TransportConfig {
            address: string_or(vars, "TRANSPORT_ADDRESS", ""),
            port: parse_or(vars, "TRANSPORT_PORT", 8080)?,
        };

        let telegram = TelegramConfig {
            token: string_or(vars, "TELEGRAM_TOKEN", ""),
        };

        let logger = LoggerConfig {
            level: string_or(vars, "LOGGER_LEVEL", "warn"),
            output: string_or(vars, "LOGGER_OUTPUT", "stdout"),
            formatter: string_or(vars, "LOGGER_FORMATTER", "json"),
        };

        Ok(Self { transport, logger, telegram, database })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transport.validate()?;
        self.telegram.validate()?;
        self.database.validate()?;
        Ok(())
    }
}

fn string_or(vars: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    vars(key).unwrap_or_else(|| default.to_string())
}

fn parse_or<T: FromStr>(
    vars: &dyn Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match vars(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var: key, value }),
        None => Ok(default),
    }
}

fn duration_or(
    vars: &dyn Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match vars(key) {
        Some(value) => humantime::parse_duration(&value)
            .map_err(|_| ConfigError::InvalidValue { var: key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::load_from(&|key| map.get(key).map(|v| v.to_string()))
    }

    fn valid_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DB_USER", "bot"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "faq"),
            ("DB_HOST", "localhost"),
            ("DB_SSL_MODE", "disable"),
            ("DB_SCHEMA", "public"),
            ("TELEGRAM_TOKEN", "123456789:ABCdef"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&valid_env()).expect("should load");
        assert_eq!(config.database.dialect, "postgres");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.max_open_conns, 25);
        assert_eq!(config.database.max_idle_conns, 25);
        assert_eq!(config.database.conn_max_lifetime, Duration::from_secs(600));
        assert_eq!(config.transport.port, 8080);
        assert_eq!(config.logger.level, "warn");
        assert_eq!(config.logger.output, "stdout");
        assert_eq!(config.logger.formatter, "json");
    }

    #[test]
    fn test_valid_config_passes_validation() {
        let config = load(&valid_env()).expect("should load");
        config.validate().expect("should validate");
    }

    #[test]
    fn test_env_overrides_defaults() {
        let mut env = valid_env();
        env.push(("DB_PORT", "6432"));
        env.push(("DB_CONN_MAX_LIFETIME", "30m"));
        env.push(("LOGGER_FORMATTER", "text"));
        let config = load(&env).expect("should load");
        assert_eq!(config.database.port, 6432);
        assert_eq!(config.database.conn_max_lifetime, Duration::from_secs(30 * 60));
        assert_eq!(config.logger.formatter, "text");
    }

    #[test]
    fn test_negative_database_port_rejected() {
        let mut env = valid_env();
        env.push(("DB_PORT", "-1"));
        let config = load(&env).expect("should load");
        let err = config.validate().expect_err("should reject negative port");
        assert!(err.to_string().contains("DB_PORT"));
    }

    #[test]
    fn test_negative_transport_port_rejected() {
        let mut env = valid_env();
        env.push(("TRANSPORT_PORT", "-8080"));
        let config = load(&env).expect("should load");
        let err = config.validate().expect_err("should reject negative port");
        assert!(err.to_string().contains("TRANSPORT_PORT"));
    }

    #[test]
    fn test_unparsable_port_rejected_at_load() {
        let mut env = valid_env();
        env.push(("DB_PORT", "not-a-port"));
        let err = load(&env).expect_err("should fail to parse");
        assert!(matches!(err, ConfigError::InvalidValue { var: "DB_PORT", .. }));
    }

    #[test]
    fn test_unparsable_lifetime_rejected_at_load() {
        let mut env = valid_env();
        env.push(("DB_CONN_MAX_LIFETIME", "soon"));
        let err = load(&env).expect_err("should fail to parse");
        assert!(matches!(err, ConfigError::InvalidValue { var: "DB_CONN_MAX_LIFETIME", .. }));
    }

    #[test]
    fn test_empty_required_database_fields_rejected() {
        for missing in ["DB_USER", "DB_PASSWORD", "DB_NAME", "DB_HOST", "DB_SSL_MODE", "DB_SCHEMA"] {
            let env: Vec<_> = valid_env().into_iter().filter(|(k, _)| *k != missing).collect();
            let config = load(&env).expect("should load");
            let err = config.validate().expect_err("should reject missing field");
            assert!(err.to_string().contains(missing), "expected error naming {missing}");
        }
    }

    #[test]
    fn test_empty_token_rejected() {
        let env: Vec<_> = valid_env()
            .into_iter()
            .filter(|(k, _)| *k != "TELEGRAM_TOKEN")
            .collect();
        let config = load(&env).expect("should load");
        let err = config.validate().expect_err("should reject empty token");
        assert!(err.to_string().contains("TELEGRAM_TOKEN"));
    }
}
