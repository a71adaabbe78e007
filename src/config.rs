/*
 * Responsibility
 * - load settings from the environment (DATABASE_URL, CORS allowlist, access-token keys, ...)
 * - validate them (startup fails when something is missing)
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

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
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
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Key material used to verify access tokens.
///
/// A PEM public key is preferred; the shared secret exists for local development.
#[derive(Clone)]
pub enum AccessKey {
    Ed25519PublicPem(String),
    SharedSecret(String),
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKey::Ed25519PublicPem(_) => f.write_str("Ed25519PublicPem(..)"),
            AccessKey::SharedSecret(_) => f.write_str("SharedSecret(..)"),
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_leeway_seconds: u64,
    pub access_key: AccessKey,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parsed_or("PORT", 3000);
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let database_max_connections = parsed_or("DATABASE_MAX_CONNECTIONS", 10);
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"));
        }

        let app_env = AppEnv::from_env();
        let cors_allowed_origins =
            parse_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;
        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;
        let access_token_leeway_seconds = parsed_or("ACCESS_TOKEN_LEEWAY_SECONDS", 60);

        let access_key = match (
            std::env::var("ACCESS_JWT_PUBLIC_KEY_PEM").ok(),
            std::env::var("ACCESS_JWT_SECRET").ok(),
        ) {
            (Some(pem), _) => AccessKey::Ed25519PublicPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) if !secret.is_empty() => AccessKey::SharedSecret(secret),
            (None, Some(_)) => return Err(ConfigError::Invalid("ACCESS_JWT_SECRET")),
            (None, None) => return Err(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM")),
        };
        if app_env.is_production() && matches!(access_key, AccessKey::SharedSecret(_)) {
            return Err(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM"));
        }

        let request_timeout = Duration::from_secs(parsed_or("REQUEST_TIMEOUT_SECONDS", 30));
        let request_body_limit_bytes = parsed_or("REQUEST_BODY_LIMIT_BYTES", 1024 * 1024);

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            access_key,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}
