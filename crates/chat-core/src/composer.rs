//! Outbound draft and the send/cancel operations.

use std::cell::RefCell;
use chat_types::{
    event::ChatEvent,
    identity::Identity,
    message::{LocalId, Message, OutboundFrame},
};
use crate::channel::LiveChannelManager;
use crate::event_bus::EventBus;
use crate::store::MessageStore;

pub struct Composer {
    draft: RefCell<String>,
    event_bus: EventBus,
}

impl Composer {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            draft: RefCell::new(String::new()),
            event_bus,
        }
    }

    pub fn draft(&self) -> String {
        self.draft.borrow().clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        *self.draft.borrow_mut() = text.into();
    }

    /// Send the current draft.
    ///
    /// No-op (returns `None`) without an identity or with a blank draft.
    /// Otherwise the message is shown immediately as pending, handed to the
    /// live channel if one is open, and the draft is cleared. The pending
    /// entry stays even if nothing could be transmitted.
    pub fn send(
        &self,
        identity: Option<&Identity>,
        store: &MessageStore,
        channel: &LiveChannelManager,
    ) -> Option<LocalId> {
        let identity = identity?;
        let content = self.draft();
        if content.trim().is_empty() {
            return None;
        }

        let frame = OutboundFrame {
            content: content.clone(),
            user_id: identity.id,
        };
        let local_id = store.append_pending(Message::optimistic(content, identity.id));

        match channel.transmit(&frame) {
            Ok(()) => self.event_bus.emit(ChatEvent::MessageSent { local_id }),
            Err(e) => {
                log::debug!("Message {} not transmitted: {}", local_id, e);
                self.event_bus.emit(ChatEvent::SendDropped { local_id });
            }
        }

        self.draft.borrow_mut().clear();
        Some(local_id)
    }

    /// Discard the draft. The store is not touched.
    pub fn cancel(&self) {
        self.draft.borrow_mut().clear();
    }
}
