//! Crate-wide error type.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is retried. Errors surface at callback boundaries (socket
//! replies, DOM listeners, hook lifecycle) where they are logged and the
//! single failed operation is abandoned.

/// Error returned by fallible client operations.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The hook element is missing a required `data-*` attribute.
    #[error("hook element is missing data attribute `{0}`")]
    MissingAttribute(&'static str),
    /// An element the chat view binds to is not in the document.
    #[error("element `#{0}` not found")]
    MissingElement(&'static str),
    /// A required `<meta>` tag is absent.
    #[error("meta tag `{0}` not found")]
    MissingMeta(&'static str),
    /// The channel delivered an event this client does not handle.
    #[error("unknown channel event `{0}`")]
    UnknownEvent(String),
    /// An inbound payload did not match its expected shape.
    #[error("failed to decode `{event}` payload: {source}")]
    Decode {
        event: String,
        #[source]
        source: serde_json::Error,
    },
    /// A configuration value could not be serialized for the page.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A browser API call threw.
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for ChatError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
