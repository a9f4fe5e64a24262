//! Capability traits over the external socket/channel client.
//!
//! DESIGN
//! ======
//! The chat hook never speaks the socket protocol itself. It asks a
//! [`Transport`] for a socket, a [`Socket`] for a channel, and a [`Channel`]
//! to join, push and leave. Replies and broadcasts come back as
//! [`ChatEvent`](crate::hook::event::ChatEvent)s on the sink handed to
//! [`Socket::channel`], so implementations stay callback-shaped while the
//! controller stays a plain event loop.

use crate::hook::event::EventSink;
use crate::net::types::{OutboundEvent, Topic};

/// Factory for the session's socket.
pub trait Transport {
    type Socket: Socket;

    /// Build (but do not connect) a socket to `endpoint`, authenticating
    /// with `token`.
    fn open_socket(&self, endpoint: &str, token: &str) -> Self::Socket;
}

/// A connected (or connecting) realtime socket.
pub trait Socket {
    type Channel: Channel;

    fn connect(&mut self);

    /// Create a channel on `topic`.
    ///
    /// The implementation must route the join reply (`Joined` /
    /// `JoinFailed`), `new_message` push replies (`SendAcked` /
    /// `SendRejected`) and decoded broadcasts (`Inbound`) into `sink`.
    fn channel(&mut self, topic: &Topic, sink: EventSink) -> Self::Channel;
}

/// Handle to one channel. Clones refer to the same underlying channel.
pub trait Channel: Clone {
    fn topic(&self) -> &Topic;
    fn join(&self);
    fn push(&self, event: &OutboundEvent);
    fn leave(&self);
}
