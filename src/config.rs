// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 HD Notes

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for persistent storage | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | Shared secret for session token signing | Required |
//! | `TOKEN_TTL_DAYS` | Session token lifetime in days | `30` |
//! | `MAIL_API_URL` | Transactional-mail API endpoint | Required |
//! | `MAIL_API_KEY` | Mail API credential | Required |
//! | `MAIL_SENDER_EMAIL` | Sender address for OTP mails | Required |
//! | `MAIL_SENDER_NAME` | Sender display name | Optional |
//! | `ALLOWED_ORIGINS` | Comma-separated CORS origin allow-list | Empty |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::auth::DEFAULT_TOKEN_TTL_DAYS;
use crate::mail::MailSettings;
use crate::storage::paths::DATA_ROOT;

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Minutes an OTP code stays valid after issuance.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Logging output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Application configuration, loaded from the environment.
#[derive(Clone)]
pub struct Config {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Root directory for persistent storage.
    pub data_dir: PathBuf,
    /// Shared secret for session token signing.
    pub jwt_secret: String,
    /// Session token lifetime in days.
    pub token_ttl_days: i64,
    /// Origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
    /// Outbound mail settings.
    pub mail: MailSettings,
    /// Logging format.
    pub log_format: LogFormat,
}

impl Config {
    /// Load the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DATA_ROOT));

        let jwt_secret = require("JWT_SECRET")?;
        let token_ttl_days = match env::var("TOKEN_TTL_DAYS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("TOKEN_TTL_DAYS", raw))?,
            Err(_) => DEFAULT_TOKEN_TTL_DAYS,
        };

        let mail = MailSettings {
            api_url: require("MAIL_API_URL")?,
            api_key: require("MAIL_API_KEY")?,
            sender_email: require("MAIL_SENDER_EMAIL")?,
            sender_name: env::var("MAIL_SENDER_NAME").ok().filter(|v| !v.is_empty()),
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            jwt_secret,
            token_ttl_days,
            allowed_origins,
            mail,
            log_format,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::Missing(name))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value)
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("http://localhost:5173, https://notes.example.com");
        assert_eq!(
            origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://notes.example.com".to_string()
            ]
        );
    }

    #[test]
    fn parse_origins_drops_empty_entries() {
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ,").is_empty());
    }
}
