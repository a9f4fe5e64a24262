//! Client configuration read from the page.
//!
//! Every value has a compiled-in default. Overrides are looked up by key; in
//! the browser the lookup reads `<meta name="KEY" content="...">` tags, so a
//! template can tune paths and timings without rebuilding the bundle.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

use crate::error::ChatError;

pub const DEFAULT_SOCKET_PATH: &str = "/socket";
pub const DEFAULT_LIVE_PATH: &str = "/live";
pub const DEFAULT_LONG_POLL_FALLBACK_MS: u64 = 2500;
pub const DEFAULT_TYPING_EXPIRY_MS: u64 = 3000;
pub const DEFAULT_TYPING_IDLE_MS: u64 = 1000;

/// Meta tag carrying the LiveView CSRF token.
pub const CSRF_META: &str = "csrf-token";

/// Data attribute (camelCase `dataset` key) holding the channel id.
pub const CHANNEL_ID_ATTR: &str = "channelId";
/// Data attribute (camelCase `dataset` key) holding the socket token.
pub const SOCKET_TOKEN_ATTR: &str = "socketToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint of the realtime chat socket.
    pub socket_path: String,
    /// Endpoint of the LiveView socket.
    pub live_path: String,
    pub long_poll_fallback_ms: u64,
    /// How long a `user_typing` notice keeps its sender on the indicator.
    pub typing_expiry: Duration,
    /// Idle timer re-armed on every keystroke.
    pub typing_idle: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_path: DEFAULT_SOCKET_PATH.to_owned(),
            live_path: DEFAULT_LIVE_PATH.to_owned(),
            long_poll_fallback_ms: DEFAULT_LONG_POLL_FALLBACK_MS,
            typing_expiry: Duration::from_millis(DEFAULT_TYPING_EXPIRY_MS),
            typing_idle: Duration::from_millis(DEFAULT_TYPING_IDLE_MS),
        }
    }
}

impl ClientConfig {
    /// Build config from a key lookup.
    ///
    /// Optional keys:
    /// - `chat-socket-path`: default `/socket`
    /// - `chat-live-path`: default `/live`
    /// - `chat-long-poll-fallback-ms`: default 2500
    /// - `chat-typing-expiry-ms`: default 3000
    /// - `chat-typing-idle-ms`: default 1000
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let socket_path = lookup("chat-socket-path")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOCKET_PATH.to_owned());
        let live_path = lookup("chat-live-path")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LIVE_PATH.to_owned());

        Self {
            socket_path,
            live_path,
            long_poll_fallback_ms: parse_u64(&lookup, "chat-long-poll-fallback-ms", DEFAULT_LONG_POLL_FALLBACK_MS),
            typing_expiry: Duration::from_millis(parse_u64(&lookup, "chat-typing-expiry-ms", DEFAULT_TYPING_EXPIRY_MS)),
            typing_idle: Duration::from_millis(parse_u64(&lookup, "chat-typing-idle-ms", DEFAULT_TYPING_IDLE_MS)),
        }
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

/// Per-element settings read when a chat hook mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountConfig {
    pub channel_id: String,
    /// Token for the socket connection. Only the first mount's token is
    /// used; later mounts reuse the already open socket.
    pub socket_token: String,
}

impl MountConfig {
    /// Read the mount settings from an element's `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MissingAttribute`] when either attribute is
    /// absent.
    pub fn from_dataset(get: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let channel_id = get(CHANNEL_ID_ATTR).ok_or(ChatError::MissingAttribute("data-channel-id"))?;
        let socket_token = get(SOCKET_TOKEN_ATTR).ok_or(ChatError::MissingAttribute("data-socket-token"))?;
        Ok(Self { channel_id, socket_token })
    }
}
