//! Outbox of session events for the presentation layer.
//!
//! Session components push as things happen; the app takes the whole
//! backlog once per frame. Single-threaded, like the rest of the session.

use std::cell::RefCell;
use std::rc::Rc;
use chat_types::event::ChatEvent;

/// Shared handle to the session's event outbox. Clones see the same queue.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<Vec<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ChatEvent) {
        log::trace!("Session event: {:?}", event);
        self.queue.borrow_mut().push(event);
    }

    /// Take every event emitted since the last call, oldest first.
    pub fn drain(&self) -> Vec<ChatEvent> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}
