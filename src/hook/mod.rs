//! The `ChatSetup` hook: one mounted element, one realtime channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` holds the page's socket and current channel, `controller` runs
//! the per-mount event loop, `event` is its inbox protocol, and `view` /
//! `timers` are the page capabilities it draws on. `dom` (browser only)
//! implements the view over the chat markup; `app` registers the hook with
//! LiveView.

pub mod controller;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod event;
pub mod session;
pub mod timers;
pub mod view;

#[cfg(test)]
mod fakes;
