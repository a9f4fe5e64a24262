//! # chat-client
//!
//! Browser glue between a server-rendered chat page and its realtime
//! backend. A LiveView hook (`ChatSetup`) binds the chat markup to one
//! `channel:<id>` topic: it renders the join backlog and live messages,
//! sends new messages, signals typing, and shows who else is typing.
//! The page's LiveView socket and navigation progress bar are wired here too.
//!
//! The controller, session, wire payloads and rendering are plain Rust and
//! test natively. Everything that needs a browser (the `Phoenix.Socket`
//! binding, the DOM view, the bootstrap) is behind the `hydrate` feature.

pub mod app;
pub mod config;
pub mod error;
pub mod hook;
pub mod net;
pub mod state;
pub mod util;
