//! Chat session: the explicit context shared by the bootstrap task and
//! the UI.
//!
//! Bootstrap order:
//! 1. Resolve identity. Failure ends the bootstrap; nothing else runs.
//! 2. Load the snapshot and run the live channel side by side.
//!
//! Single writer per field:
//! - identity state: `IdentityResolver`
//! - message store: `SnapshotLoader` (replace), the channel pump (append
//!   confirmed), `Composer` (append pending)
//! - channel state and handle: `LiveChannelManager`
//! - draft: `Composer`
//!
//! Everything runs on one logical thread; borrows never span an await.

use std::rc::Rc;

use chat_types::{
    Result,
    config::ClientConfig,
    identity::Identity,
    message::{LocalId, Message, StoreEntry},
    state::{ChannelState, IdentityState, SnapshotState},
};
use crate::channel::LiveChannelManager;
use crate::composer::Composer;
use crate::event_bus::EventBus;
use crate::identity::IdentityResolver;
use crate::ports::{ChatApiPort, LiveChannelPort, TimerPort};
use crate::snapshot::SnapshotLoader;
use crate::store::MessageStore;

pub struct ChatSession {
    api: Rc<dyn ChatApiPort>,
    event_bus: EventBus,
    store: MessageStore,
    identity: IdentityResolver,
    snapshot: SnapshotLoader,
    channel: LiveChannelManager,
    composer: Composer,
}

impl ChatSession {
    pub fn new(
        config: ClientConfig,
        api: Rc<dyn ChatApiPort>,
        live: Rc<dyn LiveChannelPort>,
        timer: Rc<dyn TimerPort>,
        event_bus: EventBus,
    ) -> Self {
        let channel = LiveChannelManager::new(
            live,
            timer,
            config.reconnect,
            event_bus.clone(),
        );
        Self {
            api,
            store: MessageStore::new(),
            identity: IdentityResolver::new(event_bus.clone()),
            snapshot: SnapshotLoader::new(event_bus.clone()),
            composer: Composer::new(event_bus.clone()),
            channel,
            event_bus,
        }
    }

    /// Run the whole session: identity, then snapshot and live channel.
    ///
    /// Resolves once identity fails, or once both the snapshot has settled
    /// and the live channel has stopped for good. A snapshot failure is
    /// logged and leaves the conversation as it is; the channel still runs.
    pub async fn bootstrap(&self) -> Result<()> {
        let identity = self.identity.resolve(self.api.as_ref()).await?;

        let (snapshot, ()) = futures::join!(
            self.snapshot
                .load_history(Some(&identity), self.api.as_ref(), &self.store),
            self.channel.run(&identity, &self.store),
        );

        if let Err(e) = snapshot {
            log::warn!("Continuing without history: {}", e);
        }
        Ok(())
    }

    /// Close the live channel. Safe to call repeatedly.
    ///
    /// In-flight identity and history requests are not cancelled.
    pub fn teardown(&self) {
        self.channel.close();
    }

    pub fn send_draft(&self) -> Option<LocalId> {
        let identity = self.identity.identity();
        self.composer
            .send(identity.as_ref(), &self.store, &self.channel)
    }

    pub fn cancel_draft(&self) {
        self.composer.cancel();
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn channel(&self) -> &LiveChannelManager {
        &self.channel
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.identity()
    }

    pub fn identity_state(&self) -> IdentityState {
        self.identity.state()
    }

    pub fn snapshot_state(&self) -> SnapshotState {
        self.snapshot.state()
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    pub fn entries(&self) -> Vec<StoreEntry> {
        self.store.entries()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store.messages()
    }
}
