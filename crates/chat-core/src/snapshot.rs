//! Snapshot loading: one history fetch that replaces the store.

use std::cell::RefCell;
use chat_types::{
    ChatError, Result,
    event::ChatEvent,
    identity::Identity,
    state::SnapshotState,
};
use crate::event_bus::EventBus;
use crate::ports::ChatApiPort;
use crate::store::MessageStore;

pub struct SnapshotLoader {
    state: RefCell<SnapshotState>,
    event_bus: EventBus,
}

impl SnapshotLoader {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            state: RefCell::new(SnapshotState::Idle),
            event_bus,
        }
    }

    pub fn state(&self) -> SnapshotState {
        self.state.borrow().clone()
    }

    /// Fetch the full history and replace the store with it.
    ///
    /// On failure the store is left untouched and the state records the
    /// error; the caller still receives the `Err`.
    pub async fn load_history(
        &self,
        identity: Option<&Identity>,
        api: &dyn ChatApiPort,
        store: &MessageStore,
    ) -> Result<usize> {
        if identity.is_none() {
            return Err(ChatError::NotReady(
                "history requested before identity resolved".to_string(),
            ));
        }

        *self.state.borrow_mut() = SnapshotState::Loading;

        match api.fetch_messages().await {
            Ok(messages) => {
                let count = messages.len();
                store.replace_all(messages);
                log::info!("Loaded {} messages from history", count);
                *self.state.borrow_mut() = SnapshotState::Loaded { count };
                self.event_bus.emit(ChatEvent::SnapshotLoaded { count });
                Ok(count)
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("Failed to load message history: {}", message);
                *self.state.borrow_mut() = SnapshotState::Failed(message.clone());
                self.event_bus.emit(ChatEvent::SnapshotFailed {
                    message: message.clone(),
                });
                Err(ChatError::Snapshot(message))
            }
        }
    }
}
