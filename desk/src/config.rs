//! # config — Desk settings from environment variables

use std::path::PathBuf;

const ANALYSES_FILE: &str = "analyses.json";
const TOKEN_FILE: &str = "access_token";

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API root, e.g. `http://localhost:3001/api`
    pub api_url:    String,
    /// Holds `analyses.json` and `access_token`
    pub data_dir:   PathBuf,
    /// Where downloaded CSV reports are written
    pub report_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var("DESK_API_URL")
            .unwrap_or_else(|_| "http://localhost:3001/api".to_string())
            .trim_end_matches('/')
            .to_string();

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            anyhow::bail!("DESK_API_URL must be an http(s) URL, got '{api_url}'");
        }

        Ok(Self {
            api_url,
            data_dir:   std::env::var("DESK_DATA_DIR").unwrap_or_else(|_| ".coinnotes".into()).into(),
            report_dir: std::env::var("DESK_REPORT_DIR").unwrap_or_else(|_| ".".into()).into(),
        })
    }

    pub fn analyses_path(&self) -> PathBuf {
        self.data_dir.join(ANALYSES_FILE)
    }

    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE)
    }
}
