//! Integration tests for the bot's conversation flow.
//!
//! These exercise routing and reply composition end to end through the
//! public API, with configuration built from an in-memory lookup.

use quadrant_bot::config::{TOKEN_ENV, WEBAPP_URL_ENV};
use quadrant_bot::handlers::{replies_for, OPEN_APP_PROMPT};
use quadrant_bot::{BotError, Config, QuadrantBot, Route};
use teloxide::types::{InlineKeyboardButtonKind, ReplyMarkup};
use url::Url;

const BOT: &str = "quadrant_bot";

fn config_with_url(url: Option<&str>) -> Config {
    Config::from_lookup(|key| match key {
        TOKEN_ENV => Some("123456789:AAH-test-token".to_string()),
        WEBAPP_URL_ENV => url.map(str::to_string),
        _ => None,
    })
    .unwrap()
}

#[test]
fn test_start_with_trailing_slash_url() {
    let config = config_with_url(Some("https://app.example.com/"));
    let route = Route::classify(Some("/start"), BOT);
    let replies = replies_for(&route, &config);

    assert_eq!(replies.len(), 2, "greeting then inline prompt");
    assert!(matches!(replies[0].markup, Some(ReplyMarkup::Keyboard(_))));
    assert_eq!(replies[1].text, OPEN_APP_PROMPT);

    let expected = Url::parse("https://app.example.com").unwrap();
    let Some(ReplyMarkup::InlineKeyboard(inline)) = &replies[1].markup else {
        panic!("second reply must carry the inline keyboard");
    };
    match &inline.inline_keyboard[0][0].kind {
        InlineKeyboardButtonKind::WebApp(info) => assert_eq!(info.url, expected),
        other => panic!("expected web app button, got {:?}", other),
    }
    match &inline.inline_keyboard[1][0].kind {
        InlineKeyboardButtonKind::Url(url) => assert_eq!(url, &expected),
        other => panic!("expected url button, got {:?}", other),
    }
}

#[test]
fn test_start_without_url_warns_once() {
    let config = config_with_url(None);
    let replies = replies_for(&Route::classify(Some("/start"), BOT), &config);

    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("WEBAPP_URL"));
    assert!(replies[0].markup.is_none());
}

#[test]
fn test_empty_url_counts_as_missing() {
    let config = config_with_url(Some(""));
    let replies = replies_for(&Route::classify(Some("/start"), BOT), &config);
    assert_eq!(replies.len(), 1);
    assert!(replies[0].markup.is_none());
}

#[test]
fn test_help_lists_link() {
    let config = config_with_url(Some("https://x.io"));
    let replies = replies_for(&Route::classify(Some("/help"), BOT), &config);

    assert_eq!(replies.len(), 1);
    assert!(replies[0].markup.is_none());
    let lines: Vec<&str> = replies[0].text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[3].contains("https://x.io"));
}

#[test]
fn test_free_text_goes_to_fallback() {
    let config = config_with_url(Some("https://x.io"));
    let route = Route::classify(Some("hello"), BOT);
    assert_eq!(route, Route::Other);

    let replies = replies_for(&route, &config);
    assert!(replies[0].text.contains("/start"));
    assert!(!replies[0].text.contains("Quadrant Mini App —"));
    assert_eq!(replies.len(), 2);
}

#[test]
fn test_placeholder_token_never_builds_a_bot() {
    let result = Config::from_lookup(|key| (key == TOKEN_ENV).then(|| "dummy".to_string()));
    assert!(matches!(result, Err(BotError::PlaceholderToken)));

    let result = Config::from_lookup(|_| None);
    assert!(matches!(result, Err(BotError::NoToken)));
}

#[test]
fn test_malformed_url_rejected_at_startup() {
    let config = config_with_url(Some("app.example.com/"));
    let result = QuadrantBot::new(config);
    assert!(matches!(result, Err(BotError::InvalidWebAppUrl { .. })));
}

#[test]
fn test_bot_builds_without_url() {
    assert!(QuadrantBot::new(config_with_url(None)).is_ok());
}
