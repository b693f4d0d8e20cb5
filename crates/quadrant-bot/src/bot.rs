//! Bot startup and the long-polling receive loop.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{BotError, Result};
use crate::handlers::{handle_message, menu_commands};

/// The Telegram bot for the Quadrant Mini App.
pub struct QuadrantBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Configuration shared with every handler.
    config: Arc<Config>,
}

impl QuadrantBot {
    /// Create a bot from a loaded configuration.
    ///
    /// Fails if `WEBAPP_URL` is set but is not an absolute URL. A missing
    /// `WEBAPP_URL` only produces a warning.
    pub fn new(config: Config) -> Result<Self> {
        config.validate_webapp_url()?;

        match config.webapp_url() {
            Some(url) => info!(webapp_url = %url, "Mini App address configured"),
            None => warn!("WEBAPP_URL is not set; Mini App buttons will not be shown"),
        }

        let bot = Bot::new(config.token());

        Ok(Self {
            bot,
            config: Arc::new(config),
        })
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::StartupFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Drop any webhook and pending updates, then publish the command menu.
    pub async fn register_commands(&self) -> Result<()> {
        self.bot.delete_webhook().drop_pending_updates(true).await?;
        info!("Webhook removed, pending updates dropped");

        self.bot.set_my_commands(menu_commands()).await?;
        info!("Command menu registered");
        Ok(())
    }

    /// Register the command menu and run the polling loop until Ctrl+C.
    pub async fn start_polling(&self) -> Result<()> {
        let bot_username: Arc<str> = Arc::from(self.get_me().await?);

        self.register_commands().await?;

        let config = Arc::clone(&self.config);
        let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            let config = Arc::clone(&config);
            let bot_username = Arc::clone(&bot_username);
            async move { handle_message(bot, msg, config, bot_username).await }
        });

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Bot stopped");
        Ok(())
    }
}
