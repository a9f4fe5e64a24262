//! Page-scoped socket and current-channel context.
//!
//! DESIGN
//! ======
//! One socket per page, opened lazily by the first mount and reused by every
//! later one. At most one channel is current: attaching always leaves the
//! previous channel before creating the next. The session is passed to the
//! hook explicitly instead of living on `window`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::MountConfig;
use crate::hook::event::EventSink;
use crate::net::transport::{Channel, Socket, Transport};
use crate::net::types::Topic;

pub struct Session<T: Transport> {
    transport: T,
    endpoint: String,
    socket: Option<T::Socket>,
    current: Option<<T::Socket as Socket>::Channel>,
}

impl<T: Transport> Session<T> {
    #[must_use]
    pub fn new(transport: T, endpoint: &str) -> Self {
        Self { transport, endpoint: endpoint.to_owned(), socket: None, current: None }
    }

    /// Make `mount`'s channel the current one and return a handle to it.
    ///
    /// The channel is created but not joined; replies and broadcasts flow
    /// into `sink`.
    pub fn attach(&mut self, mount: &MountConfig, sink: EventSink) -> <T::Socket as Socket>::Channel {
        if let Some(previous) = self.current.take() {
            tracing::info!(topic = %previous.topic(), "leaving previous channel");
            previous.leave();
        }

        let socket = self.socket.get_or_insert_with(|| {
            tracing::info!(endpoint = %self.endpoint, "opening socket");
            let mut socket = self.transport.open_socket(&self.endpoint, &mount.socket_token);
            socket.connect();
            socket
        });

        let topic = Topic::for_channel(&mount.channel_id);
        let channel = socket.channel(&topic, sink);
        self.current = Some(channel.clone());
        channel
    }

    /// Leave and forget the current channel, if any. The socket stays open.
    pub fn detach(&mut self) {
        if let Some(channel) = self.current.take() {
            tracing::info!(topic = %channel.topic(), "leaving channel");
            channel.leave();
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&<T::Socket as Socket>::Channel> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.socket.is_some()
    }
}
