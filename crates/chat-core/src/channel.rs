//! Live channel lifecycle: open, pump inbound frames into the store,
//! close, and optionally reconnect.
//!
//! State machine:
//!
//! ```text
//!   Closed ──open──▶ Connecting ──ok──▶ Open ──transport ends──▶ Errored
//!     ▲                  │                │                        │
//!     └──────close───────┴──────close─────┴─────────close──────────┘
//! ```
//!
//! At most one connection exists at a time. Every `close()` bumps a
//! generation counter; a connection, pump or reconnect loop started under
//! an older generation stops touching shared state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::stream::{self, AbortHandle, Abortable};
use futures::StreamExt;

use chat_types::{
    ChatError, Result,
    config::ReconnectPolicy,
    event::{ChannelFrame, ChatEvent},
    identity::Identity,
    message::{Message, OutboundFrame},
    state::ChannelState,
};
use crate::event_bus::EventBus;
use crate::ports::{FrameSender, FrameStream, LiveChannelPort, TimerPort};
use crate::store::MessageStore;

const MAX_LOGGED_FRAME: usize = 120;

struct ActiveConnection {
    identity_id: i64,
    sender: Box<dyn FrameSender>,
    abort: AbortHandle,
}

/// Inbound half of a connection opened by [`LiveChannelManager::open`].
/// Ends as soon as the manager is closed.
pub struct InboundFrames {
    frames: Abortable<FrameStream>,
    generation: u64,
}

/// Why a frame pump stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOutcome {
    /// `close()` was called
    Closed,
    /// The transport went away on its own after delivering `received` frames
    Dropped { received: usize },
}

pub struct LiveChannelManager {
    port: Rc<dyn LiveChannelPort>,
    timer: Rc<dyn TimerPort>,
    policy: ReconnectPolicy,
    state: RefCell<ChannelState>,
    active: RefCell<Option<ActiveConnection>>,
    generation: Cell<u64>,
    event_bus: EventBus,
}

impl LiveChannelManager {
    pub fn new(
        port: Rc<dyn LiveChannelPort>,
        timer: Rc<dyn TimerPort>,
        policy: ReconnectPolicy,
        event_bus: EventBus,
    ) -> Self {
        Self {
            port,
            timer,
            policy,
            state: RefCell::new(ChannelState::Closed),
            active: RefCell::new(None),
            generation: Cell::new(0),
            event_bus,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.active.borrow().is_some()
    }

    /// Open the connection for `identity`.
    ///
    /// Returns `Ok(None)` without connecting when a connection for the same
    /// identity already exists or is being established, or when `close()`
    /// ran while this call was connecting.
    pub async fn open(&self, identity: &Identity) -> Result<Option<InboundFrames>> {
        let existing = self.active.borrow().as_ref().map(|a| a.identity_id);
        match existing {
            Some(id) if id == identity.id => {
                log::debug!("Live channel already open for user {}", id);
                return Ok(None);
            }
            Some(id) => {
                log::info!("Live channel belongs to user {}, reopening for {}", id, identity.id);
                self.close();
            }
            None => {}
        }
        if *self.state.borrow() == ChannelState::Connecting {
            return Ok(None);
        }

        let generation = self.generation.get();
        self.set_state(ChannelState::Connecting);

        let connection = match self.port.connect().await {
            Ok(connection) => connection,
            Err(e) => {
                if self.generation.get() == generation {
                    self.set_state(ChannelState::Errored(e.to_string()));
                }
                return Err(ChatError::Channel(e.to_string()));
            }
        };

        if self.generation.get() != generation {
            log::debug!("Live channel closed while connecting; discarding connection");
            connection.sender.close();
            return Ok(None);
        }

        let (frames, abort) = stream::abortable(connection.frames);
        *self.active.borrow_mut() = Some(ActiveConnection {
            identity_id: identity.id,
            sender: connection.sender,
            abort,
        });
        self.set_state(ChannelState::Open);

        Ok(Some(InboundFrames { frames, generation }))
    }

    /// Feed inbound frames into the store in arrival order until the
    /// connection ends. A malformed frame is dropped; the stream goes on.
    pub async fn pump(&self, inbound: InboundFrames, store: &MessageStore) -> PumpOutcome {
        let InboundFrames { mut frames, generation } = inbound;
        let mut received = 0;

        while let Some(frame) = frames.next().await {
            if self.generation.get() != generation {
                break;
            }
            received += 1;
            self.handle_frame(frame, store);
        }

        if self.generation.get() != generation {
            return PumpOutcome::Closed;
        }

        log::warn!("Live channel closed unexpectedly after {} frames", received);
        let active = self.active.borrow_mut().take();
        if let Some(active) = active {
            active.sender.close();
        }
        self.set_state(ChannelState::Errored(
            "connection closed by transport".to_string(),
        ));
        PumpOutcome::Dropped { received }
    }

    /// Open, pump, and reconnect per the policy until closed or given up.
    ///
    /// The attempt counter only resets once a connection has delivered a
    /// frame; a server that accepts and hangs up straight away is retried
    /// with growing delays and eventually given up on.
    pub async fn run(&self, identity: &Identity, store: &MessageStore) {
        let generation = self.generation.get();
        let mut attempt = 0u32;

        loop {
            match self.open(identity).await {
                Ok(Some(frames)) => match self.pump(frames, store).await {
                    PumpOutcome::Closed => return,
                    PumpOutcome::Dropped { received } if received > 0 => attempt = 0,
                    PumpOutcome::Dropped { .. } => {}
                },
                Ok(None) => return,
                Err(e) => log::warn!("Live channel failed to open: {}", e),
            }

            if self.generation.get() != generation {
                return;
            }
            let Some(delay) = self.policy.delay_ms(attempt) else {
                log::info!("Live channel will not reconnect");
                return;
            };
            attempt += 1;
            log::info!("Reconnecting live channel in {}ms (attempt {})", delay, attempt);
            self.timer.sleep_ms(delay).await;
            if self.generation.get() != generation {
                return;
            }
        }
    }

    /// Hand an outbound frame to the open connection.
    pub fn transmit(&self, frame: &OutboundFrame) -> Result<()> {
        let payload = frame.to_json()?;
        let active = self.active.borrow();
        match active.as_ref() {
            Some(active) => active.sender.send_text(payload),
            None => Err(ChatError::NotReady("no live channel open".to_string())),
        }
    }

    /// Release the connection, stop the pump and any pending reconnect.
    /// Idempotent.
    pub fn close(&self) {
        self.generation.set(self.generation.get() + 1);

        let active = self.active.borrow_mut().take();
        if let Some(active) = active {
            active.abort.abort();
            active.sender.close();
        }

        if *self.state.borrow() != ChannelState::Closed {
            self.set_state(ChannelState::Closed);
        }
    }

    fn handle_frame(&self, frame: ChannelFrame, store: &MessageStore) {
        match frame {
            ChannelFrame::Text(text) => match Message::from_frame(&text) {
                Ok(message) => {
                    let id = message.id;
                    store.append(message);
                    self.event_bus.emit(ChatEvent::MessageReceived { id });
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse message: {} ({})",
                        e,
                        preview(&text)
                    );
                    self.event_bus.emit(ChatEvent::FrameDropped {
                        reason: e.to_string(),
                    });
                }
            },
            ChannelFrame::Binary(bytes) => {
                log::warn!("Dropping binary frame of {} bytes", bytes.len());
                self.event_bus.emit(ChatEvent::FrameDropped {
                    reason: format!("unexpected binary frame ({} bytes)", bytes.len()),
                });
            }
        }
    }

    fn set_state(&self, state: ChannelState) {
        log::info!("Live channel: {:?}", state);
        *self.state.borrow_mut() = state.clone();
        self.event_bus.emit(ChatEvent::ChannelStateChanged { state });
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(MAX_LOGGED_FRAME) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
