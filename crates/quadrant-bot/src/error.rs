//! Error types for the Quadrant bot.

use thiserror::Error;

/// Errors that can occur while configuring or starting the bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    NoToken,

    /// Bot token left at the placeholder value.
    #[error("TELEGRAM_BOT_TOKEN is still set to the placeholder value. Use the token from @BotFather.")]
    PlaceholderToken,

    /// `WEBAPP_URL` is set but cannot be used as a button target.
    #[error("Invalid WEBAPP_URL {url:?}: {reason}")]
    InvalidWebAppUrl { url: String, reason: String },

    /// Settings file could not be read or parsed.
    #[error("Failed to load env file: {0}")]
    EnvFile(String),

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    StartupFailed(String),

    /// Telegram API request error.
    #[error("Telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;

impl From<dotenvy::Error> for BotError {
    fn from(e: dotenvy::Error) -> Self {
        BotError::EnvFile(e.to_string())
    }
}
