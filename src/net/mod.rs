//! Networking modules for the chat channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the channel payloads, `transport` the capability traits
//! the hook talks to, and `phoenix` (browser only) binds those traits to the
//! page's `Phoenix.Socket`.

#[cfg(feature = "hydrate")]
pub mod phoenix;
pub mod transport;
pub mod types;
