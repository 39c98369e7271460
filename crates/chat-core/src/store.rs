//! The ordered message sequence that snapshot, live and optimistic writes
//! all land in.
//!
//! Only two mutations exist: append one entry, or replace everything.
//! Entries are never edited or removed individually.

use std::cell::RefCell;
use std::rc::Rc;
use chat_types::message::{LocalId, Message, StoreEntry};

/// Shared message store: clone-cheap via Rc, like the event bus.
#[derive(Clone, Default)]
pub struct MessageStore {
    entries: Rc<RefCell<Vec<StoreEntry>>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a server-confirmed message
    pub fn append(&self, message: Message) {
        self.entries.borrow_mut().push(StoreEntry::Confirmed(message));
    }

    /// Append a locally-authored message awaiting confirmation
    pub fn append_pending(&self, message: Message) -> LocalId {
        let local_id = LocalId::new();
        self.entries
            .borrow_mut()
            .push(StoreEntry::Pending { local_id, message });
        local_id
    }

    /// Swap the whole conversation for a snapshot. Pending entries go too.
    pub fn replace_all(&self, messages: Vec<Message>) {
        let mut entries = self.entries.borrow_mut();
        entries.clear();
        entries.extend(messages.into_iter().map(StoreEntry::Confirmed));
    }

    pub fn entries(&self) -> Vec<StoreEntry> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.entries
            .borrow()
            .iter()
            .map(|e| e.message().clone())
            .collect()
    }

    /// Borrow the entries without cloning. `f` must not touch the store.
    pub fn with_entries<R>(&self, f: impl FnOnce(&[StoreEntry]) -> R) -> R {
        f(&self.entries.borrow())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
