//! Live channel adapter: a browser WebSocket via gloo-net.
//!
//! Architecture:
//! - The socket is split into its sink and stream halves.
//! - Outbound text is queued on an unbounded channel and forwarded to the
//!   sink by a `spawn_local` task, so `send_text` never blocks the caller.
//! - Dropping the queue ends the forwarder, which closes the socket.
//! - The stream half is handed to the core as a `FrameStream`; it ends on
//!   the first transport error or close event.
//!
//! `WebSocket::open` returns before the handshake completes, so `connect`
//! polls the socket's ready state until it leaves `Connecting`. A refused
//! or dropped handshake is reported as a connect error, never as an open
//! connection with an empty stream.

use std::cell::RefCell;

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::{future, SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message as WsMessage, State};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use chat_core::ports::{FrameSender, LiveChannelPort, LiveConnection};
use chat_types::{
    ChatError, Result,
    config::ClientConfig,
    event::ChannelFrame,
};

pub struct WsLiveChannel {
    url: String,
}

impl WsLiveChannel {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            url: config.live_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl LiveChannelPort for WsLiveChannel {
    async fn connect(&self) -> Result<LiveConnection> {
        let socket = WebSocket::open(&self.url)
            .map_err(|e| ChatError::Channel(format!("failed to open {}: {}", self.url, e)))?;
        log::info!("WebSocket opening: {}", self.url);
        await_handshake(&socket, &self.url).await?;
        log::info!("WebSocket open: {}", self.url);

        let (mut sink, stream) = socket.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded::<String>();

        spawn_local(async move {
            while let Some(text) = outbound_rx.next().await {
                if let Err(e) = sink.send(WsMessage::Text(text)).await {
                    log::warn!("WebSocket send failed: {}", e);
                    break;
                }
            }
            if let Err(e) = sink.close().await {
                log::debug!("WebSocket close: {}", e);
            }
        });

        let frames = stream
            .take_while(|item| {
                future::ready(match item {
                    Ok(_) => true,
                    Err(e) => {
                        log::info!("WebSocket ended: {}", e);
                        false
                    }
                })
            })
            .filter_map(|item| future::ready(item.ok()))
            .map(channel_frame);

        Ok(LiveConnection {
            sender: Box::new(WsSender {
                outbound: RefCell::new(Some(outbound_tx)),
            }),
            frames: Box::pin(frames),
        })
    }
}

const HANDSHAKE_POLL_MS: u32 = 50;

/// Wait until the socket is open. The browser enforces its own handshake
/// timeout and moves the socket to `Closed` when it expires.
async fn await_handshake(socket: &WebSocket, url: &str) -> Result<()> {
    loop {
        match socket.state() {
            State::Connecting => TimeoutFuture::new(HANDSHAKE_POLL_MS).await,
            State::Open => return Ok(()),
            State::Closing | State::Closed => {
                return Err(ChatError::Channel(format!("handshake with {} failed", url)));
            }
        }
    }
}

/// Map a gloo WebSocket message onto the core's frame type
pub fn channel_frame(message: WsMessage) -> ChannelFrame {
    match message {
        WsMessage::Text(text) => ChannelFrame::Text(text),
        WsMessage::Bytes(bytes) => ChannelFrame::Binary(bytes),
    }
}

struct WsSender {
    outbound: RefCell<Option<mpsc::UnboundedSender<String>>>,
}

impl FrameSender for WsSender {
    fn send_text(&self, text: String) -> Result<()> {
        match self.outbound.borrow().as_ref() {
            Some(tx) => tx
                .unbounded_send(text)
                .map_err(|e| ChatError::Channel(e.to_string())),
            None => Err(ChatError::Channel("socket closed".to_string())),
        }
    }

    fn close(&self) {
        if self.outbound.borrow_mut().take().is_some() {
            log::info!("WebSocket closing");
        }
    }
}
