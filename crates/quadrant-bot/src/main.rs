//! Quadrant Telegram Bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx WEBAPP_URL=https://app.example.com cargo run -p quadrant-bot
//! ```

use std::path::PathBuf;

use clap::Parser;
use quadrant_bot::{Config, QuadrantBot};
use tracing_subscriber::EnvFilter;

/// Quadrant Telegram Bot - opens the Quadrant Mini App from Telegram
#[derive(Parser, Debug)]
#[command(name = "quadrant-bot")]
#[command(about = "Telegram bot that opens the Quadrant Mini App")]
struct Args {
    /// Env file to read settings from (default: .env.local or .env)
    #[arg(long, env = "QUADRANT_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let filter = match args.verbose {
        0 => "quadrant_bot=info,teloxide=warn",
        1 => "quadrant_bot=debug,teloxide=info",
        2 => "quadrant_bot=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::load(args.env_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    tracing::debug!(config = ?config, "Configuration loaded");

    let bot = QuadrantBot::new(config)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n[robot] Quadrant Telegram Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\n[phone] Open Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await?;

    Ok(())
}
