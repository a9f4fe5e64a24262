//! Page bootstrap: LiveView socket, chat hook registration, progress bar.
//!
//! Expects the page to have loaded `Phoenix`, `LiveView` and `topbar` as
//! globals before the wasm module starts.

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "hydrate")]
use crate::config::{CSRF_META, ClientConfig, MountConfig};
#[cfg(feature = "hydrate")]
use crate::error::ChatError;
#[cfg(feature = "hydrate")]
use crate::hook::controller::ChatController;
#[cfg(feature = "hydrate")]
use crate::hook::dom::DomChatView;
#[cfg(feature = "hydrate")]
use crate::hook::event;
#[cfg(feature = "hydrate")]
use crate::hook::session::Session;
#[cfg(feature = "hydrate")]
use crate::hook::timers::GlooTimers;
#[cfg(feature = "hydrate")]
use crate::net::phoenix::PhoenixTransport;
#[cfg(feature = "hydrate")]
use crate::util::topbar::{self, TopbarConfig};

/// Name the hook is registered under; templates use `phx-hook="ChatSetup"`.
pub const CHAT_HOOK_NAME: &str = "ChatSetup";

#[cfg(feature = "hydrate")]
#[wasm_bindgen(inline_js = "export function chat_hook(mounted, destroyed) {
  return {
    mounted() { mounted(this.el); },
    destroyed() { destroyed(this.el); },
  };
}")]
extern "C" {
    fn chat_hook(mounted: &js_sys::Function, destroyed: &js_sys::Function) -> JsValue;
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = LiveView, js_name = LiveSocket)]
    type LiveSocket;

    #[wasm_bindgen(constructor, js_namespace = LiveView, js_class = "LiveSocket")]
    fn new(path: &str, socket: &JsValue, opts: &JsValue) -> LiveSocket;

    #[wasm_bindgen(method)]
    fn connect(this: &LiveSocket);
}

/// Wasm entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = boot() {
        tracing::error!(error = %e, "chat client failed to start");
    }
}

#[cfg(feature = "hydrate")]
fn boot() -> Result<(), ChatError> {
    let window = web_sys::window().ok_or_else(|| ChatError::Js("no window".to_owned()))?;
    let document = window.document().ok_or_else(|| ChatError::Js("no document".to_owned()))?;

    let csrf_token = meta_content(&document, CSRF_META).ok_or(ChatError::MissingMeta(CSRF_META))?;
    let config = ClientConfig::from_lookup(|key| meta_content(&document, key));

    let hooks = js_sys::Object::new();
    set(&hooks, CHAT_HOOK_NAME, &ChatHook::new(&config).into_js())?;

    let params = js_sys::Object::new();
    set(&params, "_csrf_token", &JsValue::from_str(&csrf_token))?;

    #[allow(clippy::cast_precision_loss)]
    let fallback_ms = config.long_poll_fallback_ms as f64;
    let opts = js_sys::Object::new();
    set(&opts, "longPollFallbackMs", &JsValue::from_f64(fallback_ms))?;
    set(&opts, "params", &params)?;
    set(&opts, "hooks", &hooks)?;

    let phoenix = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Phoenix"))?;
    let socket_class = js_sys::Reflect::get(&phoenix, &JsValue::from_str("Socket"))?;
    let live_socket = LiveSocket::new(&config.live_path, &socket_class, &opts);

    topbar::install(&TopbarConfig::default())?;

    live_socket.connect();
    // Exposed for `liveSocket.enableDebug()` and latency simulation.
    set(&window, "liveSocket", &live_socket)?;

    tracing::info!(live_path = %config.live_path, socket_path = %config.socket_path, "chat client started");
    Ok(())
}

#[cfg(feature = "hydrate")]
fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), ChatError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

#[cfg(feature = "hydrate")]
fn meta_content(document: &web_sys::Document, name: &str) -> Option<String> {
    document
        .query_selector(&format!("meta[name='{name}']"))
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("content"))
}

// =============================================================================
// CHAT HOOK
// =============================================================================

#[cfg(feature = "hydrate")]
struct MountedChat {
    el: JsValue,
    stop: futures::future::AbortHandle,
}

/// State shared by every `ChatSetup` mount on the page.
#[cfg(feature = "hydrate")]
struct ChatHook {
    session: RefCell<Session<PhoenixTransport>>,
    config: ClientConfig,
    mounted: RefCell<Vec<MountedChat>>,
}

#[cfg(feature = "hydrate")]
impl ChatHook {
    fn new(config: &ClientConfig) -> Rc<Self> {
        Rc::new(Self {
            session: RefCell::new(Session::new(PhoenixTransport, &config.socket_path)),
            config: config.clone(),
            mounted: RefCell::new(Vec::new()),
        })
    }

    /// Build the JS hook object. The callbacks live as long as the page.
    fn into_js(self: Rc<Self>) -> JsValue {
        let hook = self.clone();
        let mounted = Closure::<dyn FnMut(web_sys::HtmlElement)>::new(move |el: web_sys::HtmlElement| {
            if let Err(e) = hook.mounted(el) {
                tracing::error!(error = %e, "chat hook failed to mount");
            }
        });
        let hook = self;
        let destroyed = Closure::<dyn FnMut(JsValue)>::new(move |el: JsValue| hook.destroyed(&el));

        let object = chat_hook(mounted.as_ref().unchecked_ref(), destroyed.as_ref().unchecked_ref());
        mounted.forget();
        destroyed.forget();
        object
    }

    fn mounted(&self, el: web_sys::HtmlElement) -> Result<(), ChatError> {
        let dataset = el.dataset();
        let mount = MountConfig::from_dataset(|key| dataset.get(key))?;

        let (sink, inbox) = event::inbox();
        let view = DomChatView::bind(&sink)?;
        let timers = GlooTimers::new(sink.clone());
        let controller = {
            let mut session = self.session.borrow_mut();
            ChatController::mount(&mut *session, &mount, &self.config, view, timers, sink)
        };

        let (task, stop) = futures::future::abortable(controller.run(inbox));
        wasm_bindgen_futures::spawn_local(async move {
            let _ = task.await;
        });

        self.mounted.borrow_mut().push(MountedChat { el: el.into(), stop });
        Ok(())
    }

    fn destroyed(&self, el: &JsValue) {
        {
            let mut mounted = self.mounted.borrow_mut();
            if let Some(pos) = mounted.iter().position(|m| &m.el == el) {
                mounted.remove(pos).stop.abort();
            }
        }
        self.session.borrow_mut().detach();
    }
}
