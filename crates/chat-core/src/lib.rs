//! Client-side synchronization core for the chat client.
//!
//! Reconciles a one-shot history snapshot with a live push channel into a
//! single ordered [`store::MessageStore`], gated on identity resolution,
//! with optimistic local sends.

pub mod ports;
pub mod event_bus;
pub mod store;
pub mod identity;
pub mod snapshot;
pub mod channel;
pub mod composer;
pub mod session;
