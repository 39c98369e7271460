//! Request/response adapter for the chat service.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility. Every
//! request is sent with `cache: "no-store"` so identity and history are
//! always read fresh.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use web_sys::RequestCache;

use chat_core::ports::ChatApiPort;
use chat_types::{
    ChatError, Result,
    config::ClientConfig,
    identity::Identity,
    message::Message,
};

pub struct HttpChatApi {
    identity_url: String,
    messages_url: String,
}

impl HttpChatApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            identity_url: config.identity_url(),
            messages_url: config.messages_url(),
        }
    }

    pub fn identity_url(&self) -> &str {
        &self.identity_url
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }
}

#[async_trait(?Send)]
impl ChatApiPort for HttpChatApi {
    async fn fetch_identity(&self) -> Result<Identity> {
        get_json(&self.identity_url).await
    }

    async fn fetch_messages(&self) -> Result<Vec<Message>> {
        get_json(&self.messages_url).await
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let response = Request::get(url)
        .cache(RequestCache::NoStore)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ChatError::Http {
            status: response.status(),
            url: url.to_string(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ChatError::Decode(e.to_string()))
}
