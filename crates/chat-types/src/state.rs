//! Lifecycle states observed by the presentation layer.

use crate::identity::Identity;

/// Outcome of identity resolution. Leaves `Loading` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityState {
    Loading,
    Resolved(Identity),
    Failed(String),
}

impl IdentityState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityState::Resolved(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, IdentityState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotState {
    Idle,
    Loading,
    Loaded { count: usize },
    /// Non-terminal: the conversation keeps whatever it already holds
    Failed(String),
}

/// Live channel lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelState {
    Closed,
    Connecting,
    Open,
    Errored(String),
}

impl ChannelState {
    /// True while a connection exists or is being established
    pub fn is_active(&self) -> bool {
        matches!(self, ChannelState::Connecting | ChannelState::Open)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChannelState::Closed => "Disconnected",
            ChannelState::Connecting => "Connecting...",
            ChannelState::Open => "Live",
            ChannelState::Errored(_) => "Connection lost",
        }
    }
}
