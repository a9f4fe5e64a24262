//! Client-side state owned by a mounted chat hook.
//!
//! Messages are rendered straight to the page and never kept here; the only
//! state that outlives a single event is who is typing.

pub mod typing;
