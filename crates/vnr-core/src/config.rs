use std::{env, fmt, path::Path};

use crate::{errors::Error, Result};

pub const DEFAULT_INTERFACE: &str = "eth0";
pub const DEFAULT_LIMIT_GIB: f64 = 1024.0;

/// Typed configuration for a single report run.
#[derive(Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,

    /// Interface passed to `vnstat -i`.
    pub interface: String,
    /// Monthly transmit quota in GiB.
    pub limit_gib: f64,
}

impl Config {
    /// Load from the process environment, after merging a `.env` file from the
    /// working directory if one exists.
    pub fn load() -> Result<Self> {
        load_dotenv(None);
        Self::from_lookup(env_str)
    }

    /// Resolve every value through `lookup` (a key -> value function).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interface = lookup("INTERFACE")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_INTERFACE.to_string());

        let limit_gib = match lookup("LIMIT_GIB").and_then(non_empty) {
            Some(raw) => parse_limit(&raw).unwrap_or(DEFAULT_LIMIT_GIB),
            None => DEFAULT_LIMIT_GIB,
        };

        // Required env vars
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN").and_then(non_empty);
        let telegram_chat_id = lookup("TELEGRAM_CHAT_ID").and_then(non_empty);
        let (Some(telegram_bot_token), Some(telegram_chat_id)) =
            (telegram_bot_token, telegram_chat_id)
        else {
            return Err(Error::MissingCredentials);
        };

        Ok(Self {
            telegram_bot_token,
            telegram_chat_id,
            interface,
            limit_gib,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("telegram_bot_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("interface", &self.interface)
            .field("limit_gib", &self.limit_gib)
            .finish()
    }
}

/// Merge a dotenv file into the process env; existing variables are kept.
/// Returns whether a file was loaded. Failures are only logged.
fn load_dotenv(path: Option<&Path>) -> bool {
    let loaded = match path {
        Some(p) => dotenvy::from_path(p).map(|()| p.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            true
        }
        Err(e) => {
            tracing::warn!("Error loading .env file: {e}");
            false
        }
    }
}

fn parse_limit(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("ignoring LIMIT_GIB={raw:?}: {e}");
            None
        }
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
