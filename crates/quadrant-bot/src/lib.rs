//! Telegram bot front-end for the Quadrant Mini App.
//!
//! The bot greets users, explains how to open the Mini App and offers two
//! keyboards pointing at it: a persistent reply keyboard and an inline
//! keyboard with "open inside Telegram" and "open in browser" buttons.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//!
//! Optional:
//! - `WEBAPP_URL`: HTTPS address of the Mini App. Without it the bot still
//!   answers, but shows a configuration warning instead of buttons.
//!
//! # Example
//!
//! ```no_run
//! use quadrant_bot::{Config, QuadrantBot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     let bot = QuadrantBot::new(config)?;
//!     bot.start_polling().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/start` - Greeting with the Mini App buttons
//! - `/help` - How to use the bot

pub mod bot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod keyboard;

pub use bot::QuadrantBot;
pub use config::Config;
pub use error::{BotError, Result};
pub use handlers::{Command, Reply, Route};
pub use keyboard::{build_keyboards, normalize_webapp_url, Keyboards};
