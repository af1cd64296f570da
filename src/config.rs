/*
 * Responsibility
 * - 環境変数や設定の読み込み (listen addr, back office path, content seed, Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - from_lookup: 任意の key -> value 関数から読む (tests)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::middleware::http::HttpLimits;
use crate::services::routing::ControllerRegistration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn from_value(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
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

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub public_base_url: Url,

    pub backoffice_path: String,
    pub reserved_paths: Vec<String>,
    pub content_seed_path: Option<PathBuf>,
    pub content_controllers: Vec<ControllerRegistration>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_leeway_seconds: u64,
    pub access_jwt_public_key_pem: String,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

fn comma_list(value: Option<String>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_value(lookup("APP_ENV"));

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port));
        let public_base_url =
            Url::parse(&public_base_url).map_err(|_| ConfigError::Invalid("PUBLIC_BASE_URL"))?;

        let backoffice_path =
            lookup("BACKOFFICE_PATH").unwrap_or_else(|| "/backoffice".to_string());
        let backoffice_path = backoffice_path.trim().trim_end_matches('/').to_string();
        if !backoffice_path.starts_with('/') || backoffice_path.len() < 2 {
            return Err(ConfigError::Invalid("BACKOFFICE_PATH"));
        }

        let reserved_paths = comma_list(lookup("RESERVED_PATHS"));

        let content_seed_path = lookup("CONTENT_SEED_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let content_controllers = comma_list(lookup("CONTENT_CONTROLLERS"))
            .iter()
            .map(|s| s.parse::<ControllerRegistration>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::Invalid("CONTENT_CONTROLLERS"))?;

        let auth_issuer = lookup("AUTH_ISSUER").ok_or(ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience = lookup("AUTH_AUDIENCE").ok_or(ConfigError::Missing("AUTH_AUDIENCE"))?;

        let access_token_leeway_seconds = lookup("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let access_jwt_public_key_pem = lookup("ACCESS_JWT_PUBLIC_KEY_PEM")
            .ok_or(ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let request_timeout = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let request_body_limit_bytes = lookup("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            public_base_url,
            backoffice_path,
            reserved_paths,
            content_seed_path,
            content_controllers,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            access_jwt_public_key_pem,
            request_timeout,
            request_body_limit_bytes,
        })
    }

    pub fn http_limits(&self) -> HttpLimits {
        HttpLimits {
            timeout: self.request_timeout,
            body_limit_bytes: self.request_body_limit_bytes,
        }
    }
}
