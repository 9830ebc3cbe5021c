//! # Client Configuration
//!
//! Configuration loaded from environment variables (a `.env` file is read
//! first by the binary via `dotenvy`). Validated once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `UMINT_API_URL` | production or development URL below |
//! | `UMINT_ENV` | `development`; `production` selects `https://api.u-mint.com` |
//! | `UMINT_ENABLE_WALLET_CONNECT` | `1` |
//! | `UMINT_STORAGE_PATH` | `~/.umint/session.json` |
//! | `UMINT_KEYPAIR_PATH` | `~/.config/solana/id.json` |
//! | `UMINT_WALLET_KIND` | `phantom` |
//! | `UMINT_WALLET_TRUSTED` | `0` |
//! | `UMINT_REQUEST_TIMEOUT_SECS` | unset (no timeout) |
//! | `UMINT_LOG_DIR` | unset (log to stderr) |
//! | `UMINT_LOG_JSON` | `0`; `1` writes JSON lines |
//! | `RUST_LOG` | `umint=info,warn` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::wallet::WalletKind;

/// Production API endpoint
pub const PRODUCTION_API_URL: &str = "https://api.u-mint.com";

/// Local development API endpoint
pub const DEVELOPMENT_API_URL: &str = "http://localhost:8080";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every API path is appended to (no trailing slash)
    pub api_base_url: String,
    /// Running against the production backend
    pub production: bool,
    /// Feature flag: offer wallet connection at all
    pub enable_wallet_connect: bool,
    /// File holding the persisted session
    pub storage_path: PathBuf,
    /// Solana CLI keypair file used by the native wallet provider
    pub keypair_path: PathBuf,
    /// Provider family the keypair file is presented as
    pub wallet_kind: WalletKind,
    /// Treat the keypair wallet as already authorized (non-interactive probe succeeds)
    pub wallet_trusted: bool,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Directory for rotating log files; `None` logs to stderr
    pub log_dir: Option<PathBuf>,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Log filter directive
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let home = home_dir();
        Self {
            api_base_url: DEVELOPMENT_API_URL.to_string(),
            production: false,
            enable_wallet_connect: true,
            storage_path: home.join(".umint").join("session.json"),
            keypair_path: home.join(".config").join("solana").join("id.json"),
            wallet_kind: WalletKind::Phantom,
            wallet_trusted: false,
            request_timeout: None,
            log_dir: None,
            log_json: false,
            log_level: "umint=info,warn".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let production = env::var("UMINT_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let api_base_url = env::var("UMINT_API_URL").unwrap_or_else(|_| {
            if production {
                PRODUCTION_API_URL.to_string()
            } else {
                DEVELOPMENT_API_URL.to_string()
            }
        });

        let wallet_kind = match env::var("UMINT_WALLET_KIND") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.wallet_kind,
        };

        let request_timeout = match env::var("UMINT_REQUEST_TIMEOUT_SECS") {
            Ok(v) => Some(Duration::from_secs(v.parse().map_err(|e| {
                format!("UMINT_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {}", e)
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            production,
            enable_wallet_connect: env_flag("UMINT_ENABLE_WALLET_CONNECT", defaults.enable_wallet_connect),
            storage_path: env::var("UMINT_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            keypair_path: env::var("UMINT_KEYPAIR_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.keypair_path),
            wallet_kind,
            wallet_trusted: env_flag("UMINT_WALLET_TRUSTED", defaults.wallet_trusted),
            request_timeout,
            log_dir: env::var("UMINT_LOG_DIR").ok().map(PathBuf::from),
            log_json: env_flag("UMINT_LOG_JSON", defaults.log_json),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.is_empty() {
            return Err("UMINT_API_URL must not be empty".to_string());
        }

        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(format!("UMINT_API_URL must be an http(s) URL, got {}", self.api_base_url));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err("UMINT_REQUEST_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// `1`/`true`/`yes` are on, `0`/`false`/`no` are off, anything else keeps the default.
fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name).map(|v| v.to_ascii_lowercase()) {
        Ok(v) if matches!(v.as_str(), "1" | "true" | "yes") => true,
        Ok(v) if matches!(v.as_str(), "0" | "false" | "no") => false,
        _ => default,
    }
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
