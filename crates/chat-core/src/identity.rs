//! Identity resolution: the gate in front of everything else.
//!
//! One request, no retries. Whatever happens, the state leaves `Loading`
//! exactly once; later calls replay the settled outcome.

use std::cell::RefCell;
use chat_types::{
    ChatError, Result,
    event::ChatEvent,
    identity::Identity,
    state::IdentityState,
};
use crate::event_bus::EventBus;
use crate::ports::ChatApiPort;

pub struct IdentityResolver {
    state: RefCell<IdentityState>,
    event_bus: EventBus,
}

impl IdentityResolver {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            state: RefCell::new(IdentityState::Loading),
            event_bus,
        }
    }

    pub fn state(&self) -> IdentityState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub async fn resolve(&self, api: &dyn ChatApiPort) -> Result<Identity> {
        if let Some(settled) = self.settled_outcome() {
            return settled;
        }

        let outcome = api.fetch_identity().await;

        // A concurrent resolve may have settled first
        if let Some(settled) = self.settled_outcome() {
            return settled;
        }

        match outcome {
            Ok(identity) => {
                log::info!("Identity resolved: {} (id {})", identity.name, identity.id);
                *self.state.borrow_mut() = IdentityState::Resolved(identity.clone());
                self.event_bus.emit(ChatEvent::IdentityResolved {
                    identity: identity.clone(),
                });
                Ok(identity)
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("Failed to fetch user: {}", message);
                *self.state.borrow_mut() = IdentityState::Failed(message.clone());
                self.event_bus.emit(ChatEvent::IdentityFailed {
                    message: message.clone(),
                });
                Err(ChatError::Identity(message))
            }
        }
    }

    fn settled_outcome(&self) -> Option<Result<Identity>> {
        match &*self.state.borrow() {
            IdentityState::Loading => None,
            IdentityState::Resolved(identity) => Some(Ok(identity.clone())),
            IdentityState::Failed(message) => Some(Err(ChatError::Identity(message.clone()))),
        }
    }
}
