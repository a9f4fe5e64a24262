//! The chat hook's event loop.
//!
//! A [`ChatController`] binds one mounted element to one channel. It owns the
//! view, the timers and the typing set, and reacts to one [`ChatEvent`] at a
//! time.
//!
//! ERROR HANDLING
//! ==============
//! A failed join is logged. A rejected send is logged and alerted. Neither is
//! retried; the user retries through the form.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::time::Duration;

use futures::StreamExt;

use crate::config::{ClientConfig, MountConfig};
use crate::hook::event::{ChatEvent, EventInbox, EventSink};
use crate::hook::session::Session;
use crate::hook::timers::{TimerId, Timers};
use crate::hook::view::{ChatView, SEND_FAILED_ALERT};
use crate::net::transport::{Channel, Socket, Transport};
use crate::net::types::{ChatMessage, InboundEvent, JoinReply, OutboundEvent, TypingNotice};
use crate::state::typing::TypingSet;
use crate::util::render::MessageCard;

pub struct ChatController<C, V, T> {
    channel: C,
    view: V,
    timers: T,
    typing: TypingSet,
    typing_expiry: Duration,
    typing_idle: Duration,
    idle_timer: Option<TimerId>,
}

impl<C, V, T> ChatController<C, V, T>
where
    C: Channel,
    V: ChatView,
    T: Timers,
{
    /// Attach to `mount`'s channel through `session` and start joining.
    ///
    /// Any channel the session already holds is left first. Join replies and
    /// broadcasts are delivered to `sink`, which must feed the inbox later
    /// passed to [`run`](Self::run).
    pub fn mount<Tr>(
        session: &mut Session<Tr>,
        mount: &MountConfig,
        config: &ClientConfig,
        mut view: V,
        timers: T,
        sink: EventSink,
    ) -> Self
    where
        Tr: Transport,
        Tr::Socket: Socket<Channel = C>,
    {
        let channel = session.attach(mount, sink);
        tracing::info!(topic = %channel.topic(), "joining channel");
        channel.join();
        view.focus_input();

        Self {
            channel,
            view,
            timers,
            typing: TypingSet::new(),
            typing_expiry: config.typing_expiry,
            typing_idle: config.typing_idle,
            idle_timer: None,
        }
    }

    /// Handle events until every sender of `inbox` is gone.
    pub async fn run(mut self, mut inbox: EventInbox) {
        while let Some(event) = inbox.next().await {
            self.handle(event);
        }
        tracing::debug!(topic = %self.channel.topic(), "controller inbox closed");
    }

    pub fn handle(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Joined(reply) => self.on_joined(reply),
            ChatEvent::JoinFailed(reason) => {
                tracing::warn!(topic = %self.channel.topic(), %reason, "unable to join channel");
            }
            ChatEvent::Inbound(InboundEvent::NewMessage(message)) => self.on_new_message(&message),
            ChatEvent::Inbound(InboundEvent::UserTyping(notice)) => self.on_user_typing(notice),
            ChatEvent::Submit => self.on_submit(),
            ChatEvent::Input => self.on_input(),
            ChatEvent::SendAcked => self.view.set_input_value(""),
            ChatEvent::SendRejected(reason) => {
                tracing::error!(topic = %self.channel.topic(), %reason, "error sending message");
                self.view.alert(SEND_FAILED_ALERT);
            }
            ChatEvent::TypingExpired(username) => {
                self.typing.remove(&username);
                self.refresh_typing();
            }
            ChatEvent::TypingIdle => {
                // Re-armed on every keystroke; has no effect when it fires.
                self.idle_timer = None;
            }
        }
    }

    #[must_use]
    pub fn typing(&self) -> &TypingSet {
        &self.typing
    }

    #[must_use]
    pub fn channel(&self) -> &C {
        &self.channel
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    fn on_joined(&mut self, reply: JoinReply) {
        let Some(messages) = reply.messages else {
            tracing::info!(topic = %self.channel.topic(), "joined channel");
            return;
        };
        tracing::info!(topic = %self.channel.topic(), backlog = messages.len(), "joined channel");

        self.view.clear_messages();
        for message in &messages {
            self.view.append_message(&MessageCard::from_message(message));
        }
        self.view.scroll_to_bottom();
    }

    fn on_new_message(&mut self, message: &ChatMessage) {
        self.view.append_message(&MessageCard::from_message(message));
        self.view.scroll_to_bottom();
    }

    fn on_user_typing(&mut self, notice: TypingNotice) {
        if self.typing.insert(&notice.username) {
            self.refresh_typing();
        }
        // Every notice arms its own expiry; an earlier one may still remove
        // the user first.
        self.timers
            .schedule(self.typing_expiry, ChatEvent::TypingExpired(notice.username));
    }

    fn on_submit(&mut self) {
        let content = self.view.input_value().trim().to_owned();
        if content.is_empty() {
            return;
        }
        self.channel.push(&OutboundEvent::NewMessage { content });
    }

    fn on_input(&mut self) {
        if let Some(id) = self.idle_timer.take() {
            self.timers.cancel(id);
        }
        self.channel.push(&OutboundEvent::Typing);
        self.idle_timer = Some(self.timers.schedule(self.typing_idle, ChatEvent::TypingIdle));
    }

    fn refresh_typing(&mut self) {
        match self.typing.indicator_text() {
            Some(text) => self.view.show_typing(&text),
            None => self.view.hide_typing(),
        }
    }
}
