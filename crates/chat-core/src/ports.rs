//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use std::pin::Pin;
use async_trait::async_trait;
use futures::Stream;
use chat_types::{
    Result,
    event::ChannelFrame,
    identity::Identity,
    message::Message,
};

// ─── Chat API Port ───────────────────────────────────────────

/// Request/response side of the chat service. Both calls must bypass
/// any HTTP cache.
#[async_trait(?Send)]
pub trait ChatApiPort {
    /// `GET /users/me`
    async fn fetch_identity(&self) -> Result<Identity>;

    /// `GET /messages`, in server order
    async fn fetch_messages(&self) -> Result<Vec<Message>>;
}

// ─── Live Channel Port ───────────────────────────────────────

/// Inbound frames in arrival order. The stream ends when the transport
/// closes, for whatever reason.
pub type FrameStream = Pin<Box<dyn Stream<Item = ChannelFrame>>>;

/// Outbound half of an open connection
pub trait FrameSender {
    /// Queue a text frame. Fails only if the connection is already gone.
    fn send_text(&self, text: String) -> Result<()>;

    /// Release the transport. Safe to call more than once.
    fn close(&self);
}

pub struct LiveConnection {
    pub sender: Box<dyn FrameSender>,
    pub frames: FrameStream,
}

#[async_trait(?Send)]
pub trait LiveChannelPort {
    /// Open a new connection to the push endpoint
    async fn connect(&self) -> Result<LiveConnection>;
}

// ─── Timer Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TimerPort {
    async fn sleep_ms(&self, ms: u32);
}
