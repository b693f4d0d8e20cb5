//! Bot configuration.
//!
//! Settings come from the process environment. A dotenv file fills in any
//! variable the environment does not define:
//!
//! - `TELEGRAM_BOT_TOKEN` (required): token from @BotFather
//! - `WEBAPP_URL` (optional): HTTPS address of the Mini App
//!
//! Without `--env-file`, `.env.local` and then `.env` in the working directory
//! are consulted when present.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{BotError, Result};
use crate::keyboard::normalize_webapp_url;

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable holding the Mini App address.
pub const WEBAPP_URL_ENV: &str = "WEBAPP_URL";

/// Token value shipped in sample env files.
pub const PLACEHOLDER_TOKEN: &str = "dummy";

/// Env files tried in order when none is given explicitly.
const DEFAULT_ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Immutable configuration snapshot, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    token: String,
    webapp_url: Option<String>,
}

impl Config {
    /// Load from the process environment, falling back to the env file.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        let file_vars = read_env_file(env_file)?;
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Fails with [`BotError::NoToken`] when the token is missing or blank and
    /// with [`BotError::PlaceholderToken`] when it equals [`PLACEHOLDER_TOKEN`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(BotError::NoToken)?;

        if token == PLACEHOLDER_TOKEN {
            return Err(BotError::PlaceholderToken);
        }

        let webapp_url = lookup(WEBAPP_URL_ENV);

        Ok(Self { token, webapp_url })
    }

    /// The bot token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The raw `WEBAPP_URL` value, exactly as configured.
    pub fn raw_webapp_url(&self) -> Option<&str> {
        self.webapp_url.as_deref()
    }

    /// The normalized Mini App address, recomputed on every call.
    pub fn webapp_url(&self) -> Option<String> {
        normalize_webapp_url(self.raw_webapp_url())
    }

    /// Check that a configured `WEBAPP_URL` is an absolute URL.
    ///
    /// An absent URL is fine: the bot runs in degraded mode and tells users
    /// the address is not configured.
    pub fn validate_webapp_url(&self) -> Result<()> {
        let Some(url) = self.webapp_url() else {
            return Ok(());
        };
        url::Url::parse(&url)
            .map(|_| ())
            .map_err(|e| BotError::InvalidWebAppUrl {
                url,
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &mask_token(&self.token))
            .field("webapp_url", &self.webapp_url)
            .finish()
    }
}

/// Mask a token for logging: first 4 chars, `***`, last 4 chars.
///
/// Tokens of 12 chars or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Read variables from a dotenv file.
///
/// An explicit path must exist. Without one, the first of `.env.local` or
/// `.env` that exists is used; if neither does, the result is empty.
pub fn read_env_file(path: Option<&Path>) -> Result<HashMap<String, String>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match DEFAULT_ENV_FILES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
        {
            Some(p) => p.to_path_buf(),
            None => return Ok(HashMap::new()),
        },
    };

    debug!(path = %path.display(), "Reading env file");

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(&path)? {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    Ok(vars)
}
