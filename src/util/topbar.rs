//! Navigation progress bar.
//!
//! LiveView dispatches `phx:page-loading-start` / `phx:page-loading-stop` on
//! `window` around live navigation and form submits. The page's global
//! `topbar` is shown (after a short delay, so fast patches never flash it)
//! and hidden in response.

#[cfg(test)]
#[path = "topbar_test.rs"]
mod topbar_test;

use std::collections::BTreeMap;

use serde::Serialize;

pub const PAGE_LOADING_START: &str = "phx:page-loading-start";
pub const PAGE_LOADING_STOP: &str = "phx:page-loading-stop";
pub const SHOW_DELAY_MS: u32 = 300;

/// Options passed to `topbar.config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopbarConfig {
    /// Gradient stops, keyed by position (`"0"` .. `"1"`).
    pub bar_colors: BTreeMap<String, String>,
    pub shadow_color: String,
}

impl Default for TopbarConfig {
    fn default() -> Self {
        Self {
            bar_colors: BTreeMap::from([("0".to_owned(), "#29d".to_owned())]),
            shadow_color: "rgba(0, 0, 0, .3)".to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopbarAction {
    Show { delay_ms: u32 },
    Hide,
}

/// Map a window event name to the progress bar action it triggers.
#[must_use]
pub fn action_for(event_name: &str) -> Option<TopbarAction> {
    match event_name {
        PAGE_LOADING_START => Some(TopbarAction::Show { delay_ms: SHOW_DELAY_MS }),
        PAGE_LOADING_STOP => Some(TopbarAction::Hide),
        _ => None,
    }
}

#[cfg(feature = "hydrate")]
mod js {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = topbar, js_name = config)]
        pub fn topbar_config(options: &JsValue);

        #[wasm_bindgen(js_namespace = topbar, js_name = show)]
        pub fn topbar_show(delay_ms: u32);

        #[wasm_bindgen(js_namespace = topbar, js_name = hide)]
        pub fn topbar_hide();
    }
}

#[cfg(feature = "hydrate")]
fn apply(action: TopbarAction) {
    match action {
        TopbarAction::Show { delay_ms } => js::topbar_show(delay_ms),
        TopbarAction::Hide => js::topbar_hide(),
    }
}

/// Configure `topbar` and bind it to the page-loading events for the
/// lifetime of the page.
///
/// # Errors
///
/// Returns [`ChatError::InvalidConfig`](crate::error::ChatError::InvalidConfig)
/// if the config cannot be serialized, or [`ChatError::Js`](crate::error::ChatError::Js)
/// if the window is unavailable or rejects a listener.
#[cfg(feature = "hydrate")]
pub fn install(config: &TopbarConfig) -> Result<(), crate::error::ChatError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::error::ChatError;

    let json = serde_json::to_string(config).map_err(|e| ChatError::InvalidConfig(e.to_string()))?;
    js::topbar_config(&js_sys::JSON::parse(&json)?);

    let window = web_sys::window().ok_or_else(|| ChatError::Js("no window".to_owned()))?;
    for name in [PAGE_LOADING_START, PAGE_LOADING_STOP] {
        let Some(action) = action_for(name) else {
            continue;
        };
        let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| apply(action));
        window.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
        // Page-lifetime listener.
        handler.forget();
    }
    Ok(())
}
