//! Session state shared with the rest of the client.
//!
//! This module provides:
//! - The session observer, sole writer of the session
//! - A read-only context handed to every consumer
//! - Callback listeners for consumers that prefer push notifications

mod context;
mod listener;
mod observer;

pub use context::SessionContext;
pub use listener::SessionListener;
pub use observer::SessionObserver;
