/*
 * Responsibility
 * - load settings from the environment (.env included)
 * - validation (malformed or zero values fail startup; unset values take defaults;
 *   DATABASE_URL is optional)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // None -> every lookup is served from the fallback posts
    pub database_url: Option<String>,
    pub posts_table: String,
    pub db_max_connections: u32,
    pub fetch_timeout: Duration,

    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_parse_or("PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let posts_table = std::env::var("POSTS_TABLE").unwrap_or_else(|_| "posts".to_string());
        if !is_sql_identifier(&posts_table) {
            return Err(ConfigError::Invalid("POSTS_TABLE"));
        }

        let db_max_connections: u32 =
            non_zero("DB_MAX_CONNECTIONS", env_parse_or("DB_MAX_CONNECTIONS", 5)?)?;

        let fetch_timeout = Duration::from_millis(non_zero(
            "FETCH_TIMEOUT_MS",
            env_parse_or("FETCH_TIMEOUT_MS", 3000)?,
        )?);

        let request_timeout = Duration::from_secs(non_zero(
            "REQUEST_TIMEOUT_SECS",
            env_parse_or("REQUEST_TIMEOUT_SECS", 30)?,
        )?);

        let cors_allowed_origins =
            split_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Ok(Self {
            addr,
            app_env,
            database_url,
            posts_table,
            db_max_connections,
            fetch_timeout,
            request_timeout,
            cors_allowed_origins,
        })
    }
}

fn env_parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    parse_or(key, std::env::var(key).ok().as_deref(), default)
}

// unset or blank -> default; set but malformed -> error
fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<&str>,
    default: T,
) -> Result<T, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

fn non_zero<T: Default + PartialEq>(key: &'static str, value: T) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Plain (optionally schema-qualified) identifier: `posts`, `public.posts`.
/// The table name is interpolated into SQL, so nothing else is accepted.
fn is_sql_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').count() <= 2
        && value.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
