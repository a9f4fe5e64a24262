//! Inputs to the chat controller.
//!
//! Socket replies, channel broadcasts, DOM events and timer expiries all
//! arrive as a [`ChatEvent`] on one inbox, so the controller sees them in the
//! order they happened and never needs a lock.

use futures::channel::mpsc;
use serde_json::Value;

use crate::net::types::{InboundEvent, JoinReply};

/// Sending half of a controller inbox.
pub type EventSink = mpsc::UnboundedSender<ChatEvent>;
/// Receiving half of a controller inbox.
pub type EventInbox = mpsc::UnboundedReceiver<ChatEvent>;

/// Create a fresh controller inbox.
#[must_use]
pub fn inbox() -> (EventSink, EventInbox) {
    mpsc::unbounded()
}

/// Deliver an event, ignoring a closed inbox.
///
/// Timers and socket callbacks can outlive the controller that armed them;
/// their late events are dropped here.
pub fn deliver(sink: &EventSink, event: ChatEvent) {
    if sink.unbounded_send(event).is_err() {
        tracing::trace!("controller inbox closed; event dropped");
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChatEvent {
    /// The channel join was accepted.
    Joined(JoinReply),
    /// The channel join was refused or failed.
    JoinFailed(Value),
    /// A broadcast arrived on the channel.
    Inbound(InboundEvent),
    /// The message form was submitted.
    Submit,
    /// The message input changed.
    Input,
    /// The server acknowledged a `new_message` push.
    SendAcked,
    /// The server rejected a `new_message` push.
    SendRejected(Value),
    /// A typing notice for this user has aged out.
    TypingExpired(String),
    /// The local typing idle timer fired.
    TypingIdle,
}
