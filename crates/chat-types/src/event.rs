use crate::identity::Identity;
use crate::message::LocalId;
use crate::state::ChannelState;

/// Events emitted by the chat session.
/// UI subscribes to these for status updates; the message store remains
/// the source of truth for what is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// `/users/me` answered with a valid identity
    IdentityResolved { identity: Identity },

    /// Identity could not be obtained; terminal for the session
    IdentityFailed { message: String },

    /// History replaced the store contents
    SnapshotLoaded { count: usize },

    SnapshotFailed { message: String },

    /// A live frame was decoded and appended
    MessageReceived { id: Option<i64> },

    /// A live frame could not be decoded and was discarded
    FrameDropped { reason: String },

    ChannelStateChanged { state: ChannelState },

    /// An optimistic message was appended and handed to the open channel
    MessageSent { local_id: LocalId },

    /// An optimistic message was appended but no channel was open to carry it
    SendDropped { local_id: LocalId },
}

/// Frames exchanged with the live channel transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelFrame {
    Text(String),
    Binary(Vec<u8>),
}
