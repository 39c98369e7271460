//! UI-level state that drives status rendering.
//! Updated each frame by draining the EventBus; the conversation itself is
//! read straight from the message store.

use chat_types::event::ChatEvent;
use chat_types::state::ChannelState;

/// State visible to UI panels
pub struct UiState {
    /// Live channel status as last reported
    pub channel_state: ChannelState,
    /// Shown above the conversation when history could not be loaded
    pub snapshot_notice: Option<String>,
    /// Inbound frames discarded as malformed this session
    pub dropped_frames: usize,
    /// Sends that had no open channel to travel on
    pub undelivered_sends: usize,
    /// Status line text
    pub status_text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            channel_state: ChannelState::Closed,
            snapshot_notice: None,
            dropped_frames: 0,
            undelivered_sends: 0,
            status_text: "Loading...".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::IdentityResolved { identity } => {
                    self.status_text = format!("Signed in as {}", identity.name);
                }
                ChatEvent::IdentityFailed { .. } => {
                    self.status_text = "Failed to load user".to_string();
                }
                ChatEvent::SnapshotLoaded { .. } => {
                    self.snapshot_notice = None;
                }
                ChatEvent::SnapshotFailed { message } => {
                    self.snapshot_notice =
                        Some(format!("Message history is unavailable ({})", message));
                }
                ChatEvent::MessageReceived { .. } | ChatEvent::MessageSent { .. } => {}
                ChatEvent::FrameDropped { reason } => {
                    self.dropped_frames += 1;
                    log::debug!("UI noted dropped frame: {}", reason);
                }
                ChatEvent::ChannelStateChanged { state } => {
                    self.status_text = state.label().to_string();
                    self.channel_state = state;
                }
                ChatEvent::SendDropped { .. } => {
                    self.undelivered_sends += 1;
                }
            }
        }
    }

    pub fn is_live(&self) -> bool {
        self.channel_state == ChannelState::Open
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
