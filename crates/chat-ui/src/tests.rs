#[cfg(test)]
mod tests {
    use crate::panels::chat::{can_submit, channel_color, entry_label};
    use crate::state::*;
    use crate::theme::*;
    use chat_types::event::ChatEvent;
    use chat_types::identity::Identity;
    use chat_types::message::{LocalId, Message, StoreEntry};
    use chat_types::state::ChannelState;

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert_eq!(state.channel_state, ChannelState::Closed);
        assert!(state.snapshot_notice.is_none());
        assert_eq!(state.dropped_frames, 0);
        assert_eq!(state.undelivered_sends, 0);
        assert_eq!(state.status_text, "Loading...");
        assert!(!state.is_live());
    }

    #[test]
    fn test_ui_state_identity_resolved() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::IdentityResolved {
            identity: Identity::new(1, "Ada"),
        }]);
        assert_eq!(state.status_text, "Signed in as Ada");
    }

    #[test]
    fn test_ui_state_channel_transitions() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::ChannelStateChanged { state: ChannelState::Connecting },
            ChatEvent::ChannelStateChanged { state: ChannelState::Open },
        ]);
        assert!(state.is_live());
        assert_eq!(state.status_text, "Live");

        state.process_events(vec![ChatEvent::ChannelStateChanged {
            state: ChannelState::Errored("gone".to_string()),
        }]);
        assert!(!state.is_live());
        assert_eq!(state.status_text, "Connection lost");
    }

    #[test]
    fn test_ui_state_snapshot_notice() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::SnapshotFailed {
            message: "HTTP 500".to_string(),
        }]);
        let notice = state.snapshot_notice.clone().unwrap();
        assert!(notice.contains("HTTP 500"));

        state.process_events(vec![ChatEvent::SnapshotLoaded { count: 2 }]);
        assert!(state.snapshot_notice.is_none());
    }

    #[test]
    fn test_ui_state_counts_drops() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::FrameDropped { reason: "bad json".to_string() },
            ChatEvent::FrameDropped { reason: "binary".to_string() },
            ChatEvent::SendDropped { local_id: LocalId::new() },
            ChatEvent::MessageReceived { id: Some(3) },
        ]);
        assert_eq!(state.dropped_frames, 2);
        assert_eq!(state.undelivered_sends, 1);
    }

    #[test]
    fn test_ui_state_default() {
        let state = UiState::default();
        assert_eq!(state.status_text, "Loading...");
    }

    // ─── Panel Helper Tests ──────────────────────────────────

    #[test]
    fn test_can_submit() {
        assert!(can_submit("hello", true));
        assert!(!can_submit("hello", false));
        assert!(!can_submit("   ", true));
        assert!(!can_submit("", true));
    }

    #[test]
    fn test_entry_labels() {
        let mine = StoreEntry::Pending {
            local_id: LocalId::new(),
            message: Message::optimistic("hi", 1),
        };
        let theirs = StoreEntry::Confirmed(Message::bot(2, "hello", 1));

        assert_eq!(entry_label(&mine), ("You", ACCENT));
        assert_eq!(entry_label(&theirs), ("Bot", BOT));
    }

    #[test]
    fn test_channel_colors() {
        assert_eq!(channel_color(&ChannelState::Open), SUCCESS);
        assert_eq!(channel_color(&ChannelState::Connecting), WARNING);
        assert_eq!(channel_color(&ChannelState::Errored("x".into())), ERROR);
        assert_eq!(channel_color(&ChannelState::Closed), TEXT_SECONDARY);
    }
}
