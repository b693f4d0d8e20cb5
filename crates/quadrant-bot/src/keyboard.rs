//! Mini App URL normalization and keyboard construction.

use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    WebAppInfo,
};
use tracing::warn;
use url::Url;

/// Label of the persistent reply keyboard button.
pub const REPLY_BUTTON_LABEL: &str = "Open Quadrant";

/// Label of the inline web-app button.
pub const INLINE_WEBAPP_LABEL: &str = "Open Mini App";

/// Label of the inline plain-link button.
pub const INLINE_BROWSER_LABEL: &str = "Open in browser";

/// Keyboards offered alongside a reply.
///
/// Either both are present or neither is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keyboards {
    /// Persistent keyboard shown in place of the text input.
    pub reply: Option<KeyboardMarkup>,
    /// Keyboard attached to the "open the application" prompt.
    pub inline: Option<InlineKeyboardMarkup>,
}

impl Keyboards {
    /// No keyboards (Mini App address not configured).
    pub fn none() -> Self {
        Self::default()
    }
}

/// Normalize the configured Mini App address.
///
/// Returns `None` for an absent or blank value. Otherwise surrounding
/// whitespace and every trailing `/` are removed. The value is not validated.
pub fn normalize_webapp_url(raw: Option<&str>) -> Option<String> {
    let url = raw?.trim().trim_end_matches('/');
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

/// Build the reply and inline keyboards for a normalized Mini App address.
pub fn build_keyboards(webapp_url: Option<&str>) -> Keyboards {
    let Some(raw) = webapp_url else {
        return Keyboards::none();
    };

    // Startup validation rejects URLs that fail here.
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %raw, error = %e, "Cannot build Mini App buttons");
            return Keyboards::none();
        }
    };

    let reply = KeyboardMarkup::new(vec![vec![KeyboardButton::new(REPLY_BUTTON_LABEL)
        .request(ButtonRequest::WebApp(WebAppInfo { url: url.clone() }))]])
    .resize_keyboard()
    .persistent();

    let inline = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::web_app(
            INLINE_WEBAPP_LABEL,
            WebAppInfo { url: url.clone() },
        )],
        vec![InlineKeyboardButton::url(INLINE_BROWSER_LABEL, url)],
    ]);

    Keyboards {
        reply: Some(reply),
        inline: Some(inline),
    }
}
