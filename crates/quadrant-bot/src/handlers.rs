//! Message handlers for the Quadrant bot.
//!
//! Each handler first composes its replies as plain [`Reply`] values and then
//! sends them in order, so the composition can be tested without Telegram.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode, ReplyMarkup};
use teloxide::utils::command::BotCommands;
use teloxide::utils::html;
use tracing::{debug, info};

use crate::config::Config;
use crate::keyboard::build_keyboards;

/// Prompt sent together with the inline keyboard.
pub const OPEN_APP_PROMPT: &str = "Open the application:";

const START_LINES: [&str; 2] = [
    "🚀 Quadrant Mini App — the same interface and data as on iOS.",
    "Tap the button below to open the Mini App right inside Telegram and sign in.",
];

const START_MISSING_URL: &str = "⚠️ Set WEBAPP_URL to make the open button work.";

const HELP_LINES: [&str; 3] = [
    "1) Make sure the Mini App is served over HTTPS (Vercel or ngrok).",
    "2) Tap «Open Quadrant» — the Mini App opens with the same account.",
    "3) Inside the Mini App data is loaded via X-Telegram-Init-Data.",
];

const FALLBACK_TEXT: &str = "Send /start to open the Mini App.";

const FALLBACK_MISSING_URL: &str = "Mini App address is not configured (WEBAPP_URL).";

/// Bot commands that can be invoked with /.
///
/// Trailing arguments are accepted and ignored, except the `/start` payload
/// which is kept for logging.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Launch Mini App")]
    Start(String),

    #[command(description = "How to use the bot")]
    Help(String),
}

/// Command menu registered with Telegram at startup.
pub fn menu_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Launch Mini App"),
        BotCommand::new("help", "How to use the bot"),
    ]
}

/// Which handler an inbound message is routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/start`, with an optional deep-link payload.
    Start { payload: String },
    /// `/help`.
    Help,
    /// Anything else, including non-text messages and unknown commands.
    Other,
}

impl Route {
    /// Classify a message by its text.
    ///
    /// `bot_username` lets `/start@name` addressed to this bot match, while the
    /// same command addressed to another bot falls through to [`Route::Other`].
    pub fn classify(text: Option<&str>, bot_username: &str) -> Self {
        match text.and_then(|t| Command::parse(t, bot_username).ok()) {
            Some(Command::Start(payload)) => Route::Start {
                payload: payload.trim().to_string(),
            },
            Some(Command::Help(_)) => Route::Help,
            None => Route::Other,
        }
    }
}

/// A single outbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTML-formatted text.
    pub text: String,
    /// Keyboard attached to the message, if any.
    pub markup: Option<ReplyMarkup>,
}

impl Reply {
    /// A reply without a keyboard.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
        }
    }

    /// A reply with an optional keyboard.
    pub fn with_markup(text: impl Into<String>, markup: Option<impl Into<ReplyMarkup>>) -> Self {
        Self {
            text: text.into(),
            markup: markup.map(Into::into),
        }
    }
}

/// Replies for `/start`: greeting with the reply keyboard, then the inline prompt.
pub fn start_replies(webapp_url: Option<&str>) -> Vec<Reply> {
    let keyboards = build_keyboards(webapp_url);

    let mut lines: Vec<&str> = START_LINES.to_vec();
    if webapp_url.is_none() {
        lines.push(START_MISSING_URL);
    }

    let mut replies = vec![Reply::with_markup(lines.join("\n"), keyboards.reply)];
    if let Some(inline) = keyboards.inline {
        replies.push(Reply::with_markup(OPEN_APP_PROMPT, Some(inline)));
    }
    replies
}

/// Reply for `/help`: usage steps, plus the Mini App link when configured.
pub fn help_replies(webapp_url: Option<&str>) -> Vec<Reply> {
    let mut lines: Vec<String> = HELP_LINES.iter().map(|l| l.to_string()).collect();
    if let Some(url) = webapp_url {
        lines.push(format!("Mini App link: {}", html::escape(url)));
    }
    vec![Reply::text(lines.join("\n"))]
}

/// Replies for any other message: a pointer to `/start` and the keyboards.
pub fn fallback_replies(webapp_url: Option<&str>) -> Vec<Reply> {
    let keyboards = build_keyboards(webapp_url);

    let mut text = FALLBACK_TEXT.to_string();
    if webapp_url.is_none() {
        text.push('\n');
        text.push_str(FALLBACK_MISSING_URL);
    }

    let mut replies = vec![Reply::with_markup(text, keyboards.reply)];
    if let Some(inline) = keyboards.inline {
        replies.push(Reply::with_markup(OPEN_APP_PROMPT, Some(inline)));
    }
    replies
}

/// Compose the replies for a route, reading the Mini App address fresh.
pub fn replies_for(route: &Route, config: &Config) -> Vec<Reply> {
    let webapp_url = config.webapp_url();
    match route {
        Route::Start { .. } => start_replies(webapp_url.as_deref()),
        Route::Help => help_replies(webapp_url.as_deref()),
        Route::Other => fallback_replies(webapp_url.as_deref()),
    }
}

/// Send replies to a chat in order, stopping at the first failure.
async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> ResponseResult<()> {
    for reply in replies {
        let mut req = bot
            .send_message(chat_id, reply.text)
            .parse_mode(ParseMode::Html);
        if let Some(markup) = reply.markup {
            req = req.reply_markup(markup);
        }
        req.await?;
    }
    Ok(())
}

/// Handle the /start command.
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    config: Arc<Config>,
    payload: String,
) -> ResponseResult<()> {
    if !payload.is_empty() {
        debug!(chat_id = %msg.chat.id, payload = %payload, "Start payload ignored");
    }

    let route = Route::Start { payload };
    send_replies(&bot, msg.chat.id, replies_for(&route, &config)).await?;

    info!(chat_id = %msg.chat.id, user = ?msg.from.as_ref().map(|u| &u.username), "User started bot");
    Ok(())
}

/// Handle the /help command.
pub async fn handle_help(bot: Bot, msg: Message, config: Arc<Config>) -> ResponseResult<()> {
    send_replies(&bot, msg.chat.id, replies_for(&Route::Help, &config)).await?;
    debug!(chat_id = %msg.chat.id, "Help sent");
    Ok(())
}

/// Handle any message that is not a known command.
pub async fn handle_fallback(bot: Bot, msg: Message, config: Arc<Config>) -> ResponseResult<()> {
    debug!(chat_id = %msg.chat.id, text = ?msg.text(), "Fallback reply");
    send_replies(&bot, msg.chat.id, replies_for(&Route::Other, &config)).await
}

/// Route a message to exactly one handler.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    config: Arc<Config>,
    bot_username: Arc<str>,
) -> ResponseResult<()> {
    match Route::classify(msg.text(), &bot_username) {
        Route::Start { payload } => handle_start(bot, msg, config, payload).await,
        Route::Help => handle_help(bot, msg, config).await,
        Route::Other => handle_fallback(bot, msg, config).await,
    }
}
