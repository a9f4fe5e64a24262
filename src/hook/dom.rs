//! DOM implementation of [`ChatView`] over the chat page markup.
//!
//! All elements are resolved once when the hook mounts. The form and input
//! listeners feed the controller inbox and are removed when the view drops.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement};

use crate::error::ChatError;
use crate::hook::event::{ChatEvent, EventSink, deliver};
use crate::hook::view::{ChatView, ids};
use crate::util::render::{MESSAGE_ROW_CLASS, MessageCard};

/// An event listener that unregisters itself on drop.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self, ChatError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

pub struct DomChatView {
    document: Document,
    messages: Element,
    container: Element,
    input: HtmlInputElement,
    indicator: HtmlElement,
    typing_users: Element,
    _listeners: [Listener; 2],
}

fn by_id(document: &Document, id: &'static str) -> Result<Element, ChatError> {
    document.get_element_by_id(id).ok_or(ChatError::MissingElement(id))
}

fn by_id_as<T: JsCast>(document: &Document, id: &'static str) -> Result<T, ChatError> {
    by_id(document, id)?
        .dyn_into::<T>()
        .map_err(|_| ChatError::MissingElement(id))
}

impl DomChatView {
    /// Resolve the chat elements and route form events into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MissingElement`] if any required element is
    /// absent, or [`ChatError::Js`] if a listener cannot be attached.
    pub fn bind(sink: &EventSink) -> Result<Self, ChatError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ChatError::Js("no document".to_owned()))?;

        let messages = by_id(&document, ids::MESSAGES)?;
        let container = by_id(&document, ids::MESSAGES_CONTAINER)?;
        let input = by_id_as::<HtmlInputElement>(&document, ids::MESSAGE_INPUT)?;
        let form = by_id(&document, ids::MESSAGE_FORM)?;
        let indicator = by_id_as::<HtmlElement>(&document, ids::TYPING_INDICATOR)?;
        let typing_users = by_id(&document, ids::TYPING_USERS)?;

        let submit = {
            let sink = sink.clone();
            Listener::new(&form, "submit", move |event: Event| {
                event.prevent_default();
                deliver(&sink, ChatEvent::Submit);
            })?
        };
        let keystroke = {
            let sink = sink.clone();
            Listener::new(&input, "input", move |_: Event| deliver(&sink, ChatEvent::Input))?
        };

        Ok(Self {
            document,
            messages,
            container,
            input,
            indicator,
            typing_users,
            _listeners: [submit, keystroke],
        })
    }

    fn set_indicator_display(&self, display: &str) {
        if let Err(e) = self.indicator.style().set_property("display", display) {
            tracing::warn!(error = ?e, "failed to toggle typing indicator");
        }
    }
}

impl ChatView for DomChatView {
    fn clear_messages(&mut self) {
        self.messages.set_inner_html("");
    }

    fn append_message(&mut self, card: &MessageCard) {
        let row = match self.document.create_element("div") {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(error = ?e, "failed to create message row");
                return;
            }
        };
        row.set_class_name(MESSAGE_ROW_CLASS);
        row.set_inner_html(&card.to_html());
        if let Err(e) = self.messages.append_child(&row) {
            tracing::warn!(error = ?e, "failed to append message row");
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.container.set_scroll_top(self.container.scroll_height());
    }

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn focus_input(&mut self) {
        let _ = self.input.focus();
    }

    fn show_typing(&mut self, text: &str) {
        self.typing_users.set_text_content(Some(text));
        self.set_indicator_display("block");
    }

    fn hide_typing(&mut self) {
        self.set_indicator_display("none");
    }

    fn alert(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
