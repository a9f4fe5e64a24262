//! Message row rendering.
//!
//! The chat list lives in server-rendered markup that LiveView does not
//! patch, so rows are built here as escaped HTML and appended by the view.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime};

use crate::net::types::ChatMessage;

pub const MESSAGE_ROW_CLASS: &str = "flex space-x-3 p-2 hover:bg-gray-50 dark:hover:bg-gray-700 rounded";

const INVALID_DATE: &str = "Invalid Date";

/// Display-ready form of a [`ChatMessage`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageCard {
    /// Upper-cased first character of the username, for the avatar bubble.
    pub initial: String,
    pub username: String,
    pub time_label: String,
    pub content: String,
}

impl MessageCard {
    #[must_use]
    pub fn from_message(message: &ChatMessage) -> Self {
        Self {
            initial: avatar_initial(&message.user.username),
            username: message.user.username.clone(),
            time_label: time_label(&message.inserted_at),
            content: message.content.clone(),
        }
    }

    /// Inner HTML of the message row. Every interpolated value is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="flex-shrink-0">
  <div class="h-8 w-8 rounded-full bg-indigo-600 flex items-center justify-center">
    <span class="text-xs font-medium text-white">{initial}</span>
  </div>
</div>
<div class="flex-1 min-w-0">
  <div class="flex items-baseline space-x-2">
    <p class="text-sm font-medium text-gray-900 dark:text-white">{username}</p>
    <time class="text-xs text-gray-500 dark:text-gray-400">{time}</time>
  </div>
  <p class="text-sm text-gray-700 dark:text-gray-300 mt-1 break-words">{content}</p>
</div>"#,
            initial = escape_html(&self.initial),
            username = escape_html(&self.username),
            time = escape_html(&self.time_label),
            content = escape_html(&self.content),
        )
    }
}

#[must_use]
pub fn avatar_initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Local wall-clock label for a server timestamp, e.g. `"1:04:05 PM"`.
///
/// Timestamps with an offset are converted to local time; naive ones are
/// taken as already local.
#[must_use]
pub fn time_label(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return clock(dt.with_timezone(&Local).time());
    }
    match raw.parse::<NaiveDateTime>() {
        Ok(naive) => clock(naive.time()),
        Err(_) => INVALID_DATE.to_owned(),
    }
}

fn clock(time: NaiveTime) -> String {
    time.format("%-I:%M:%S %p").to_string()
}

#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
