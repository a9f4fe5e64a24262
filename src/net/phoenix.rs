//! Binding of the transport traits to the page's `window.Phoenix.Socket`.
//!
//! The socket client is loaded by the page; this module only calls into it.
//! Payloads cross the boundary as JSON text so every decode goes through
//! `net::types`.
//!
//! ERROR HANDLING
//! ==============
//! Undecodable broadcasts are logged and dropped. A join reply that fails to
//! decode still counts as joined, with no backlog.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::hook::event::{ChatEvent, EventSink, deliver};
use crate::net::transport::{Channel, Socket, Transport};
use crate::net::types::{EVENT_NEW_MESSAGE, EVENT_USER_TYPING, InboundEvent, OutboundEvent, Topic, decode_join_reply};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Phoenix, js_name = Socket)]
    type PhxSocket;

    #[wasm_bindgen(constructor, js_namespace = Phoenix, js_class = "Socket")]
    fn new(endpoint: &str, opts: &JsValue) -> PhxSocket;

    #[wasm_bindgen(method)]
    fn connect(this: &PhxSocket);

    #[wasm_bindgen(method)]
    fn channel(this: &PhxSocket, topic: &str, params: &JsValue) -> PhxChannel;

    #[wasm_bindgen(js_namespace = Phoenix, js_name = Channel)]
    #[derive(Clone)]
    type PhxChannel;

    #[wasm_bindgen(method)]
    fn join(this: &PhxChannel) -> PhxPush;

    #[wasm_bindgen(method)]
    fn push(this: &PhxChannel, event: &str, payload: &JsValue) -> PhxPush;

    #[wasm_bindgen(method)]
    fn on(this: &PhxChannel, event: &str, callback: &js_sys::Function) -> JsValue;

    #[wasm_bindgen(method)]
    fn off(this: &PhxChannel, event: &str, binding: &JsValue);

    #[wasm_bindgen(method)]
    fn leave(this: &PhxChannel) -> PhxPush;

    #[wasm_bindgen(js_namespace = Phoenix, js_name = Push)]
    type PhxPush;

    #[wasm_bindgen(method)]
    fn receive(this: &PhxPush, status: &str, callback: &js_sys::Function) -> PhxPush;
}

/// Serialize through JSON text; `Value` always round-trips.
fn to_js(value: &Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or_else(|_| js_sys::Object::new().into())
}

/// `undefined` and non-JSON values become `Value::Null`.
fn from_js(value: &JsValue) -> Value {
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(Value::Null)
}

/// Register a one-shot reply handler on `push`.
fn on_reply(push: &PhxPush, status: &str, handler: impl FnOnce(Value) + 'static) -> PhxPush {
    let callback = Closure::once_into_js(move |payload: JsValue| handler(from_js(&payload)));
    push.receive(status, callback.unchecked_ref())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PhoenixTransport;

impl Transport for PhoenixTransport {
    type Socket = PhoenixSocket;

    fn open_socket(&self, endpoint: &str, token: &str) -> PhoenixSocket {
        let opts = to_js(&serde_json::json!({ "params": { "token": token } }));
        PhoenixSocket { inner: PhxSocket::new(endpoint, &opts) }
    }
}

pub struct PhoenixSocket {
    inner: PhxSocket,
}

impl Socket for PhoenixSocket {
    type Channel = PhoenixChannel;

    fn connect(&mut self) {
        self.inner.connect();
    }

    fn channel(&mut self, topic: &Topic, sink: EventSink) -> PhoenixChannel {
        let inner = self.inner.channel(topic.as_str(), &js_sys::Object::new());

        let mut bindings = Vec::new();
        for event in [EVENT_NEW_MESSAGE, EVENT_USER_TYPING] {
            let sink = sink.clone();
            let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
                match InboundEvent::decode(event, from_js(&payload)) {
                    Ok(inbound) => deliver(&sink, ChatEvent::Inbound(inbound)),
                    Err(e) => tracing::warn!(error = %e, "dropping channel broadcast"),
                }
            });
            let binding = inner.on(event, callback.as_ref().unchecked_ref());
            bindings.push(Binding { event, binding, _callback: callback });
        }

        PhoenixChannel {
            inner,
            topic: topic.clone(),
            sink,
            bindings: Rc::new(RefCell::new(bindings)),
        }
    }
}

struct Binding {
    event: &'static str,
    binding: JsValue,
    _callback: Closure<dyn FnMut(JsValue)>,
}

#[derive(Clone)]
pub struct PhoenixChannel {
    inner: PhxChannel,
    topic: Topic,
    sink: EventSink,
    bindings: Rc<RefCell<Vec<Binding>>>,
}

impl Channel for PhoenixChannel {
    fn topic(&self) -> &Topic {
        &self.topic
    }

    fn join(&self) {
        let push = self.inner.join();

        let sink = self.sink.clone();
        let push = on_reply(&push, "ok", move |payload| {
            let reply = decode_join_reply(payload).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring malformed join backlog");
                crate::net::types::JoinReply::default()
            });
            deliver(&sink, ChatEvent::Joined(reply));
        });

        let sink = self.sink.clone();
        on_reply(&push, "error", move |payload| deliver(&sink, ChatEvent::JoinFailed(payload)));
    }

    fn push(&self, event: &OutboundEvent) {
        let push = self.inner.push(event.name(), &to_js(&event.payload()));
        if !matches!(event, OutboundEvent::NewMessage { .. }) {
            return;
        }

        let sink = self.sink.clone();
        let push = on_reply(&push, "ok", move |_| deliver(&sink, ChatEvent::SendAcked));
        let sink = self.sink.clone();
        on_reply(&push, "error", move |payload| deliver(&sink, ChatEvent::SendRejected(payload)));
    }

    fn leave(&self) {
        // Unbind before dropping the callbacks so the socket never calls a
        // freed closure.
        for binding in self.bindings.borrow_mut().drain(..) {
            self.inner.off(binding.event, &binding.binding);
        }
        self.inner.leave();
    }
}
