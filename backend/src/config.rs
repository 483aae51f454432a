//! # config — read backend Config from environment variables
//!
//! `.env` is loaded by `main` before [`Config::from_env`] runs.

use std::net::SocketAddr;

use anyhow::{bail, Context};

pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_GOOGLE_API_BASE: &str = "https://www.googleapis.com";
pub const DEFAULT_GOOGLE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload";

/// Deployment environment. Switches the CORS allow-list and error verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "" | "dev" | "development" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            other => bail!("Unknown APP_ENV: '{other}'. Use 'development' or 'production'"),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Google OAuth client + endpoints.
///
/// The endpoints default to Google's, but can be pointed elsewhere (tests run
/// a local stand-in server).
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id:     String,
    pub client_secret: String,
    pub redirect_uri:  String,
    pub auth_url:      String,
    pub token_url:     String,
    /// Base for `drive/v3/...` metadata calls
    pub api_base:      String,
    /// Base for `drive/v3/files?uploadType=multipart`
    pub upload_base:   String,
}

impl GoogleConfig {
    /// Same client settings, every endpoint rooted at `base`.
    #[cfg(test)]
    pub fn pointed_at(base: &str) -> Self {
        Self {
            client_id:     "client-id".into(),
            client_secret: "client-secret".into(),
            redirect_uri:  "http://localhost:3001/api/auth/google/callback".into(),
            auth_url:      format!("{base}/o/oauth2/v2/auth"),
            token_url:     format!("{base}/token"),
            api_base:      base.to_string(),
            upload_base:   format!("{base}/upload"),
        }
    }
}

/// Everything the backend needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr:    SocketAddr,
    pub environment:  Environment,
    /// Raw comma-separated `CRYPTO_LIST`
    pub crypto_list:  String,
    /// Where the OAuth callback sends the browser afterwards
    pub frontend_url: String,
    pub cors_origins: Vec<String>,
    pub google:       GoogleConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::parse(&env_or("APP_ENV", "development"))?;

        let bind_addr: SocketAddr = env_or("BIND_ADDR", "0.0.0.0:3001")
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3001")?;

        let frontend_url = std::env::var("FRONTEND_URL")
            .or_else(|_| std::env::var("CORS_ORIGIN"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(list) => split_list(&list),
            Err(_) => default_origins(environment, &frontend_url),
        };

        let google = GoogleConfig {
            client_id:     std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri:  env_or("GOOGLE_REDIRECT_URI", "http://localhost:3001/api/auth/google/callback"),
            auth_url:      env_or("GOOGLE_AUTH_URL", DEFAULT_GOOGLE_AUTH_URL),
            token_url:     env_or("GOOGLE_TOKEN_URL", DEFAULT_GOOGLE_TOKEN_URL),
            api_base:      env_or("GOOGLE_API_BASE", DEFAULT_GOOGLE_API_BASE),
            upload_base:   env_or("GOOGLE_UPLOAD_BASE", DEFAULT_GOOGLE_UPLOAD_BASE),
        };

        Ok(Self {
            bind_addr,
            environment,
            crypto_list: std::env::var("CRYPTO_LIST").unwrap_or_default(),
            frontend_url,
            cors_origins,
            google,
        })
    }
}

/// Allow-list used when `CORS_ORIGINS` is not set.
pub fn default_origins(environment: Environment, frontend_url: &str) -> Vec<String> {
    match environment {
        Environment::Development => vec![
            "http://localhost:3000".to_string(),
            "http://localhost:3002".to_string(),
        ],
        Environment::Production => vec![frontend_url.to_string()],
    }
}

/// `true` unless `APP_ENV` says production. Read on demand by the error
/// responder, which has no access to [`Config`].
pub fn is_development() -> bool {
    std::env::var("APP_ENV")
        .map(|v| Environment::parse(&v).unwrap_or(Environment::Production) == Environment::Development)
        .unwrap_or(true)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing() {
        assert_eq!(Environment::parse("").unwrap(), Environment::Development);
        assert_eq!(Environment::parse("Production").unwrap(), Environment::Production);
        assert!(Environment::parse("staging").is_err());
    }

    #[test]
    fn origins_switch_by_environment() {
        let dev = default_origins(Environment::Development, "https://notes.example");
        assert_eq!(dev, vec!["http://localhost:3000", "http://localhost:3002"]);

        let prod = default_origins(Environment::Production, "https://notes.example");
        assert_eq!(prod, vec!["https://notes.example"]);
    }

    #[test]
    fn split_list_drops_blanks() {
        assert_eq!(split_list(" a, ,b ,"), vec!["a", "b"]);
    }
}
